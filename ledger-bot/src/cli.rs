//! CLI parser and one-shot subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::env;

use storage::DebtorRepository;

use crate::config::BotConfig;
use crate::sweeper::purge_once;

#[derive(Parser)]
#[command(name = "ledger-bot")]
#[command(about = "Accounting Telegram bot: run, purge", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Run one debtor retention sweep and exit. Does not need a bot token.
    Purge {
        /// Database URL; defaults to DATABASE_URL or sqlite:accounting.db.
        #[arg(long)]
        database_url: Option<String>,
        /// Retention window; defaults to DEBTOR_RETENTION_DAYS or 30.
        #[arg(long)]
        days: Option<i64>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// One-shot retention sweep for the `purge` subcommand.
pub async fn handle_purge(database_url: Option<String>, days: Option<i64>) -> Result<()> {
    let database_url = database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:accounting.db".to_string());
    let days = days
        .or_else(|| env::var("DEBTOR_RETENTION_DAYS").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(30);
    if days < 0 {
        anyhow::bail!("retention days must not be negative, got {}", days);
    }

    let debtors = DebtorRepository::new(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database {}: {}", database_url, e))?;
    let removed = purge_once(&debtors, days).await?;

    println!(
        "Removed {} paid debtor(s) older than {} day(s) from {}",
        removed, days, database_url
    );
    Ok(())
}
