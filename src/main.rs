use calbot::{App, AppResult, Settings, telemetry};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about = "Economic calendar and XAUUSD notification bot")]
struct Cli {
    #[arg(short, long, default_value = "config.json")]
    config: String,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();
    let settings = Settings::load_from(&cli.config)?;
    telemetry::init(&settings.telemetry)?;
    let app = App::new(settings);
    app.run().await
}
