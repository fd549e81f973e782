mod evolution_api;
mod inmemory;

pub use evolution_api::EvolutionApi;
pub use inmemory::{InMemoryMessagingGateway, SentMessage};

/// WhatsApp gateway the reminder messages are delivered through
#[async_trait::async_trait]
pub trait IMessagingGateway: Send + Sync {
    /// Sends `text` to `number` (digits only) through the gateway session
    /// `instance`. Every failure is logged and reported as `false`.
    async fn send_text(&self, instance: &str, number: &str, text: &str) -> bool;
}
