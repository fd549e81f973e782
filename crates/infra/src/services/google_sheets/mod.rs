mod auth_provider;
mod sheets_api;

use crate::services::spreadsheet::{ISpreadsheetService, SheetValues};
use auth_provider::ServiceAccountAuth;
use reqwest::Client;
use sheets_api::GoogleSheetsRestApi;
use std::path::PathBuf;

/// A Google spreadsheet accessed with a service account
pub struct GoogleSheetsProvider {
    auth: ServiceAccountAuth,
    api: GoogleSheetsRestApi,
}

impl GoogleSheetsProvider {
    pub fn new(spreadsheet_id: String, credentials_file: PathBuf) -> Self {
        let client = Client::new();
        Self {
            auth: ServiceAccountAuth::new(client.clone(), credentials_file),
            api: GoogleSheetsRestApi::new(client, spreadsheet_id),
        }
    }
}

#[async_trait::async_trait]
impl ISpreadsheetService for GoogleSheetsProvider {
    async fn get_values(&self, range: &str) -> anyhow::Result<SheetValues> {
        let access_token = self.auth.get_access_token().await?;
        self.api.get_values(&access_token, range).await
    }

    async fn update_values(&self, range: &str, values: SheetValues) -> anyhow::Result<()> {
        let access_token = self.auth.get_access_token().await?;
        self.api.update_values(&access_token, range, values).await
    }

    async fn append_values(&self, range: &str, values: SheetValues) -> anyhow::Result<()> {
        let access_token = self.auth.get_access_token().await?;
        self.api.append_values(&access_token, range, values).await
    }
}
