use crate::dtos::ReminderDTO;
use nuntius_scheduler_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod create_reminder {
    use super::*;
    use nuntius_scheduler_domain::Recipient;
    use serde_json::Value;

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// `prueba`, `semanal`, `mensual`, `revision`, `aniversario` or
        /// `cumpleanos` (the english names are accepted too)
        #[serde(default)]
        pub kind: Option<String>,
        #[serde(default)]
        pub instance_name: Option<String>,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub recipient_selection_mode: Option<Value>,
        #[serde(default)]
        pub recipients: Vec<Recipient>,
        #[serde(default)]
        pub lead_days: Option<i64>,
        #[serde(default)]
        pub send_weekday: Option<String>,
        /// `HH:MM`
        #[serde(default)]
        pub send_time: Option<String>,
        /// When a one time reminder should go out, defaults to now
        #[serde(default)]
        pub send_at: Option<i64>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod toggle_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}
