mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    FileMessageTemplateRepo, FileReminderRepo, IMessageTemplateRepo, IReminderRepo,
    InMemoryMessageTemplateRepo, InMemoryReminderRepo, Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, ManualClock, RealSys};

#[derive(Clone)]
pub struct NuntiusContext {
    pub repos: Repos,
    pub services: Services,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl NuntiusContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = Repos::create_file(&config.data_dir, config.timezone).await?;
        Ok(Self {
            repos,
            services: Services::create(&config),
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// Context with inmemory repositories and services, the due reminders
    /// job is disabled and recipients are not throttled
    pub fn create_inmemory() -> Self {
        let mut config = Config::new();
        config.reminders_job_enabled = false;
        config.send_delay_millis = 0;
        config.google_sheet_id = None;
        Self {
            repos: Repos::create_inmemory(),
            services: Services::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<NuntiusContext> {
    NuntiusContext::create(Config::new()).await
}
