//! BotConfig: wrapper over BaseConfig. Use load() for env-based loading.

use anyhow::Result;

use super::BaseConfig;

/// Bot config. Use BotConfig::load() for env-based loading.
pub struct BotConfig {
    pub base: BaseConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it
    /// overrides BOT_TOKEN. Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        Ok(Self { base })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn report_limit(&self) -> i64 {
        self.base.report_limit
    }
    pub fn debtor_retention_days(&self) -> i64 {
        self.base.debtor_retention_days
    }
    pub fn cleanup_interval_secs(&self) -> u64 {
        self.base.cleanup_interval_secs
    }
}
