use std::sync::Arc;

use reqwest::Client;
use tracing::{error, info};

use crate::config::Settings;
use crate::errors::{AppError, AppResult};
use crate::jobs::{JobContext, plan_jobs};
use crate::notify::{Notifier, TelegramClient};
use crate::providers::{EconomicCalendarClient, FmpClient};
use crate::scheduler::Scheduler;
use crate::sheets::{GoogleSheetsClient, ServiceAccountKey, TokenProvider};
use crate::webhook::{self, WebhookState};

const USER_AGENT: &str = concat!("calbot/", env!("CARGO_PKG_VERSION"));

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(self) -> AppResult<()> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        let notifier: Arc<dyn Notifier> = Arc::new(TelegramClient::new(
            http.clone(),
            self.settings.telegram_send_url(),
        ));
        let ctx = self.job_context(http, notifier.clone())?;
        info!(recipients = ctx.recipients.len(), "recipients loaded");

        // Everything fallible happens before the first job task is spawned.
        let planned = plan_jobs(&self.settings.jobs, &ctx)?;
        let server = webhook::serve(
            &self.settings.listen_addr(),
            &self.settings.webhook.path_prefix,
            WebhookState::new(notifier),
        )?;
        let server_handle = server.handle();
        let mut server_task = tokio::spawn(server);

        let mut scheduler = Scheduler::new();
        for (job, cadence) in planned {
            scheduler.schedule(job, cadence);
        }
        if scheduler.is_empty() {
            info!("no jobs enabled, serving webhook only");
        } else {
            info!(jobs = scheduler.len(), "scheduler started");
        }

        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("shutdown requested");
            }
            exited = &mut server_task => {
                error!("webhook server exited unexpectedly");
                exited.map_err(|e| AppError::Other(e.to_string()))??;
            }
        }

        scheduler.shutdown().await;
        server_handle.stop(true).await;
        if !server_task.is_finished() {
            server_task.abort();
        }
        Ok(())
    }

    /// Startup-fatal: missing recipients, credentials or a bad key abort here.
    fn job_context(&self, http: Client, notifier: Arc<dyn Notifier>) -> AppResult<JobContext> {
        let settings = &self.settings;
        let recipients = settings.load_recipients()?;

        let key = ServiceAccountKey::from_file(&settings.key_file)?;
        let tokens = Arc::new(TokenProvider::new(http.clone(), key)?);
        let sheets = GoogleSheetsClient::new(http.clone(), tokens, &settings.spread_sheet_id)?;

        Ok(JobContext {
            recipients: Arc::new(recipients),
            notifier,
            calendar: Arc::new(EconomicCalendarClient::new(
                http.clone(),
                &settings.economic_calendar_url,
                &settings.economic_calendar_apy_key,
            )),
            market: Arc::new(FmpClient::new(http, &settings.financial_modeling_prep_url)),
            sheets: Arc::new(sheets),
            sheet_id: settings.sheet_id,
            read_range: settings.read_range.clone(),
            write_range: settings.write_range.clone(),
        })
    }

}
