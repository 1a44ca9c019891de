//! Bot configuration: Telegram connection, logging, database, retention.

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
