use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        /// Whether delivered reminders are written to the contact sheet
        pub spreadsheet_sync: bool,
        /// Whether this instance runs the due reminders job
        pub reminders_job: bool,
    }
}
