use chrono_tz::{America::Bogota, Tz};
use nuntius_scheduler_utils::create_random_secret;
use std::{fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Key that grants access to the reminders and templates of every owner
    pub admin_api_key: String,
    /// Base url of the Evolution API messaging gateway
    pub evolution_api_url: String,
    pub evolution_api_key: String,
    /// Contact spreadsheet, synchronization is disabled when not set
    pub google_sheet_id: Option<String>,
    /// Google service account key file used to access the spreadsheet
    pub google_credentials_file: PathBuf,
    pub google_sheet_name: String,
    /// Directory of the reminder and template stores
    pub data_dir: PathBuf,
    /// How often the due reminders job runs
    pub poll_interval_secs: u64,
    /// Pause after every recipient, the gateway bans numbers that send
    /// bursts of messages
    pub send_delay_millis: u64,
    /// Timezone used for every wall-clock computation of the scheduler
    pub timezone: Tz,
    /// Whether the application starts the due reminders job
    pub reminders_job_enabled: bool,
}

impl Config {
    pub fn new() -> Self {
        let admin_api_key = match std::env::var("ADMIN_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find ADMIN_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(32);
                info!("Admin api key was generated and set to: {}", key);
                key
            }
        };
        let google_sheet_id = std::env::var("GOOGLE_SHEET_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());
        if google_sheet_id.is_none() {
            info!("GOOGLE_SHEET_ID is not set, spreadsheet synchronization is disabled.");
        }

        Self {
            port: parse_env("PORT", 3000),
            admin_api_key,
            evolution_api_url: env_or("EVOLUTION_API_URL", "http://localhost:8080"),
            evolution_api_key: env_or("EVOLUTION_API_KEY", ""),
            google_sheet_id,
            google_credentials_file: env_or("GOOGLE_CREDENTIALS_FILE", "credentials.json").into(),
            google_sheet_name: env_or("GOOGLE_SHEET_NAME", "Clientes"),
            data_dir: env_or("DATA_DIR", "data").into(),
            poll_interval_secs: parse_env("REMINDERS_POLL_INTERVAL_SECS", 60),
            send_delay_millis: parse_env("REMINDERS_SEND_DELAY_MILLIS", 2000),
            timezone: parse_env("SCHEDULER_TIMEZONE", Bogota),
            reminders_job_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr + Display>(name: &str, default: T) -> T {
    let value = match std::env::var(name) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                name, value, default
            );
            default
        }
    }
}
