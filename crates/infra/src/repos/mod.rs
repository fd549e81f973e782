mod message_template;
mod reminder;
mod shared;

pub use message_template::{
    FileMessageTemplateRepo, IMessageTemplateRepo, InMemoryMessageTemplateRepo,
};
pub use reminder::{FileReminderRepo, IReminderRepo, InMemoryReminderRepo};
use chrono_tz::Tz;
use std::{path::Path, sync::Arc};
use tracing::info;

const REMINDERS_FILE: &str = "recordatorios.json";
const TEMPLATES_FILE: &str = "plantillas.json";

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub templates: Arc<dyn IMessageTemplateRepo>,
}

impl Repos {
    /// Repositories backed by the JSON store files in `data_dir`, which are
    /// created when missing. Stored dates without an offset are read in
    /// `timezone`.
    pub async fn create_file(data_dir: &Path, timezone: Tz) -> anyhow::Result<Self> {
        let reminders = FileReminderRepo::new(data_dir.join(REMINDERS_FILE), timezone);
        let templates = FileMessageTemplateRepo::new(data_dir.join(TEMPLATES_FILE), timezone);
        reminders.init().await?;
        templates.init().await?;
        info!("Using the reminder store in directory: {:?}", data_dir);

        Ok(Self {
            reminders: Arc::new(reminders),
            templates: Arc::new(templates),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            templates: Arc::new(InMemoryMessageTemplateRepo::new()),
        }
    }
}
