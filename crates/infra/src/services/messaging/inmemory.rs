use super::IMessagingGateway;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub instance: String,
    pub number: String,
    pub text: String,
}

/// Gateway that records every message instead of delivering it. Numbers
/// registered with `fail_for` are reported as failed sends.
#[derive(Default)]
pub struct InMemoryMessagingGateway {
    sent: Mutex<Vec<SentMessage>>,
    failing_numbers: Mutex<Vec<String>>,
}

impl InMemoryMessagingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, number: &str) {
        self.failing_numbers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(number.to_string());
    }

    /// Every delivered message, in send order
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl IMessagingGateway for InMemoryMessagingGateway {
    async fn send_text(&self, instance: &str, number: &str, text: &str) -> bool {
        let fails = self
            .failing_numbers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|n| n == number);
        if fails {
            return false;
        }

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentMessage {
                instance: instance.to_string(),
                number: number.to_string(),
                text: text.to_string(),
            });
        true
    }
}
