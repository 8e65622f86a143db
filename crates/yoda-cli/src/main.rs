//! YODA CLI main entry point

use anyhow::Result;
use clap::Parser;
use yoda_cli::commands::{Cli, CommandExecutor};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let executor = CommandExecutor::new(cli.mqa_config());
    let result = executor.execute(cli.command).await?;

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
