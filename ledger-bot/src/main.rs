//! Binary for the accounting Telegram bot.

use anyhow::Result;
use clap::Parser;
use ledger_bot::{handle_purge, load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Purge { database_url, days } => handle_purge(database_url, days).await,
    }
}
