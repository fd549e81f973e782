mod google_sheets;
mod messaging;
mod sheet_sync;
mod spreadsheet;

pub use google_sheets::GoogleSheetsProvider;
pub use messaging::{EvolutionApi, IMessagingGateway, InMemoryMessagingGateway, SentMessage};
pub use sheet_sync::{sheet_timestamp, SheetSynchronizer, SyncOutcome};
pub use spreadsheet::{ISpreadsheetService, InMemorySpreadsheet, SheetCall, SheetValues};

use crate::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    pub messaging: Arc<dyn IMessagingGateway>,
    pub sheet_sync: SheetSynchronizer,
}

impl Services {
    pub fn create(config: &Config) -> Self {
        let messaging = Arc::new(EvolutionApi::new(
            &config.evolution_api_url,
            config.evolution_api_key.clone(),
        ));
        let sheet_sync = match &config.google_sheet_id {
            Some(sheet_id) => SheetSynchronizer::new(
                Arc::new(GoogleSheetsProvider::new(
                    sheet_id.clone(),
                    config.google_credentials_file.clone(),
                )),
                config.google_sheet_name.clone(),
            ),
            None => SheetSynchronizer::disabled(),
        };
        Self {
            messaging,
            sheet_sync,
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            messaging: Arc::new(InMemoryMessagingGateway::new()),
            sheet_sync: SheetSynchronizer::disabled(),
        }
    }
}
