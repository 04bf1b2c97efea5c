pub mod command;
mod handler;

pub use command::Command;
pub use handler::{WebhookState, configure, dispatch};

use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::errors::AppResult;

/// Binds the webhook listener. The returned server must be awaited (or
/// spawned) to start accepting requests; signals are left to the caller.
pub fn serve(addr: &str, path_prefix: &str, state: WebhookState) -> AppResult<Server> {
    let data = web::Data::new(state);
    let prefix = path_prefix.to_string();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Dms"))
            .app_data(data.clone())
            .configure(|cfg| configure(cfg, &prefix))
    })
    .bind(addr)?
    .disable_signals()
    .run();
    info!(%addr, prefix = %path_prefix, "webhook listening");
    Ok(server)
}
