use anyhow::Result;
use clap::Parser;
use dashboard::{cli::Cli, commands, telemetry::setup_telemetry};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let _log_guard = setup_telemetry(cli.log_dir.as_deref());

    if let Err(e) = commands::run(cli).await {
        error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}
