use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("provider error: {0}")]
    Provider(String),

    #[error("sheets error: {0}")]
    Sheets(String),

    #[error("auth error: {0}")]
    Auth(String),

    #[error("other: {0}")]
    Other(String),
}

/// Request URLs carry API keys and the bot token, so they are stripped
/// before the error can reach a log line.
impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e.without_url())
    }
}

pub type AppResult<T, E = AppError> = Result<T, E>;
