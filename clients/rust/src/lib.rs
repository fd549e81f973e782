mod base;
mod reminder;
mod status;
mod template;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse, API_KEY_HEADER, OWNER_HEADER};
pub use nuntius_scheduler_api_structs::dtos::*;
pub use nuntius_scheduler_domain::{Recipient, ReminderKind, ID};
use reminder::ReminderClient;
pub use reminder::CreateReminderInput;
use status::StatusClient;
use std::sync::Arc;
use template::TemplateClient;
pub use template::UpdateTemplateInput;

pub use nuntius_scheduler_api_structs::dtos::ExecutionRecordDTO as ExecutionRecord;
pub use nuntius_scheduler_api_structs::dtos::MessageTemplateDTO as MessageTemplate;
pub use nuntius_scheduler_api_structs::dtos::ReminderDTO as Reminder;

/// Nuntius Scheduler SDK
///
/// Talks to the reminder API on behalf of one owner. Passing the admin api
/// key gives access to the data of every owner.
#[derive(Clone)]
pub struct NuntiusSDK {
    pub reminder: ReminderClient,
    pub template: TemplateClient,
    pub status: StatusClient,
}

impl NuntiusSDK {
    pub fn new<T: Into<String>>(address: String, owner: Option<T>, api_key: Option<T>) -> Self {
        let mut base = BaseClient::new(address);
        if let Some(owner) = owner {
            base.set_owner(owner.into());
        }
        if let Some(api_key) = api_key {
            base.set_api_key(api_key.into());
        }
        let base = Arc::new(base);

        Self {
            reminder: ReminderClient::new(base.clone()),
            template: TemplateClient::new(base.clone()),
            status: StatusClient::new(base),
        }
    }
}
