//! Base config: Telegram Bot connection, logging, database, retention. Loaded from env.

use anyhow::Result;
use std::env;

/// Base config: Telegram-related, logging, database, report and retention knobs.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// SQLite database URL (e.g. `sqlite:accounting.db`)
    pub database_url: String,
    /// How many transactions /report shows
    pub report_limit: i64,
    /// Days a paid debtor stays on record before the sweeper purges it
    pub debtor_retention_days: i64,
    /// Seconds between sweeper runs
    pub cleanup_interval_secs: u64,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:accounting.db".to_string());
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/ledger-bot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let report_limit = env::var("REPORT_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let debtor_retention_days = env::var("DEBTOR_RETENTION_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let cleanup_interval_secs = env::var("CLEANUP_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            database_url,
            report_limit,
            debtor_retention_days,
            cleanup_interval_secs,
        })
    }

    /// Validate config (url wellformedness, positive intervals).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.report_limit <= 0 {
            anyhow::bail!("REPORT_LIMIT must be positive, got {}", self.report_limit);
        }
        if self.debtor_retention_days < 0 {
            anyhow::bail!(
                "DEBTOR_RETENTION_DAYS must not be negative, got {}",
                self.debtor_retention_days
            );
        }
        if self.cleanup_interval_secs == 0 {
            anyhow::bail!("CLEANUP_INTERVAL_SECS must be positive");
        }
        Ok(())
    }
}
