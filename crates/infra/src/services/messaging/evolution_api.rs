use super::IMessagingGateway;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendTextRequest<'a> {
    number: &'a str,
    text: &'a str,
    link_preview: bool,
}

/// Client of the Evolution API WhatsApp gateway
pub struct EvolutionApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EvolutionApi {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn send_text_url(&self, instance: &str) -> String {
        format!("{}/message/sendText/{}", self.base_url, instance)
    }
}

#[async_trait::async_trait]
impl IMessagingGateway for EvolutionApi {
    async fn send_text(&self, instance: &str, number: &str, text: &str) -> bool {
        let body = SendTextRequest {
            number,
            text,
            link_preview: false,
        };
        match self
            .client
            .post(&self.send_text_url(instance))
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => {
                info!("Message sent to: {} through instance: {}", number, instance);
                true
            }
            Ok(res) => {
                let status = res.status();
                let body = res.text().await.unwrap_or_default();
                error!(
                    "[Unexpected Response] Evolution API sendText to: {} failed with status: {}. Response body: {}",
                    number, status, body
                );
                false
            }
            Err(e) => {
                error!(
                    "[Network Error] Evolution API sendText to: {} failed. Error message: {:?}",
                    number, e
                );
                false
            }
        }
    }
}
