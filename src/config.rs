use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::Recipient;
use crate::utils::secrets::read_env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default = "WebhookConfig::default_path_prefix")]
    pub path_prefix: String,
}

impl WebhookConfig {
    fn default_path_prefix() -> String {
        "/api/v1".to_string()
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path_prefix: Self::default_path_prefix(),
        }
    }
}

/// One entry of the `jobs` list. `at` is a UTC wall-clock time (`HH:MM`);
/// without it the job runs at startup and then every 24 hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub id: String,
    #[serde(default = "JobConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub at: Option<String>,
}

impl JobConfig {
    fn default_enabled() -> bool {
        true
    }

    fn new(id: &str, at: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            enabled: true,
            at: at.map(str::to_string),
        }
    }

    pub fn fire_time(&self) -> AppResult<Option<NaiveTime>> {
        self.at
            .as_deref()
            .map(|raw| {
                NaiveTime::parse_from_str(raw, "%H:%M").map_err(|e| {
                    AppError::Config(format!("job {}: invalid time '{raw}': {e}", self.id))
                })
            })
            .transpose()
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::new("heartbeat", Some("21:59")),
            Self::new("calendar_news", Some("22:00")),
            Self::new("xau_stats", None),
            Self::new("xau_sheet", None),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_address")]
    pub address: String,
    #[serde(default = "Settings::default_port")]
    pub port: u16,
    #[serde(default)]
    pub telegram_bot_token: String,
    pub telegram_api_base_url: String,
    #[serde(default = "Settings::default_send_message")]
    pub telegram_api_send_message: String,
    pub economic_calendar_url: String,
    #[serde(alias = "economic_calendar_api_key")]
    pub economic_calendar_apy_key: String,
    pub financial_modeling_prep_url: String,
    pub sheet_id: i64,
    pub spread_sheet_id: String,
    pub read_range: String,
    pub write_range: String,
    pub key_file: String,
    #[serde(default = "Settings::default_recipients_file")]
    pub recipients_file: String,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default = "JobConfig::defaults")]
    pub jobs: Vec<JobConfig>,
}

impl Settings {
    fn default_address() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_send_message() -> String {
        "/sendMessage".to_string()
    }

    fn default_recipients_file() -> String {
        "recipients.json".to_string()
    }

    pub fn load_from(path: impl AsRef<Path>) -> AppResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("CALBOT").separator("__"));
        let cfg = builder.build()?;
        let mut settings: Settings = cfg.try_deserialize()?;
        settings.apply_port_override(read_env("PORT"))?;
        Ok(settings)
    }

    fn apply_port_override(&mut self, port: Option<String>) -> AppResult<()> {
        if let Some(raw) = port.filter(|p| !p.trim().is_empty()) {
            self.port = raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("invalid PORT '{raw}': {e}")))?;
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// `{token}` in the base URL is substituted with the bot token.
    pub fn telegram_send_url(&self) -> String {
        let base = self
            .telegram_api_base_url
            .replace("{token}", &self.telegram_bot_token);
        format!("{base}{}", self.telegram_api_send_message)
    }

    pub fn load_recipients(&self) -> AppResult<Vec<Recipient>> {
        load_recipients(&self.recipients_file)
    }
}

pub fn load_recipients(path: impl AsRef<Path>) -> AppResult<Vec<Recipient>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        AppError::Config(format!("unable to read recipients {}: {e}", path.display()))
    })?;
    let recipients: Vec<Recipient> = serde_json::from_slice(&bytes)?;
    Ok(recipients)
}
