pub mod app;
pub mod config;
pub mod errors;
pub mod jobs;
pub mod messages;
pub mod models;
pub mod notify;
pub mod providers;
pub mod scheduler;
pub mod sheets;
pub mod telemetry;
pub mod utils;
pub mod webhook;

pub use app::App;
pub use config::Settings;
pub use errors::{AppError, AppResult};
