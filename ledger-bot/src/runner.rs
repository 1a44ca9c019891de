//! Main entry: init logging, validate config, build components, start the
//! sweeper and the dispatcher.

use std::path::Path;

use anyhow::Result;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::components::{build_bot_components, build_handler_chain, BotComponents};
use crate::config::BotConfig;
use crate::core::{init_tracing, Message as CoreMessage};
use crate::sweeper::run_sweeper;
use crate::telegram::run_dispatcher;

/// LedgerBot: config, components, and handler chain. Exists mainly so tests
/// can build the full stack and drive it with synthetic messages.
pub struct LedgerBot {
    pub config: BotConfig,
    pub components: BotComponents,
    pub handler_chain: HandlerChain,
}

impl LedgerBot {
    /// Creates a LedgerBot from config, optionally overriding the Bot impl
    /// handlers send through (e.g. a mock in tests).
    pub async fn new(
        config: BotConfig,
        handler_bot_override: Option<std::sync::Arc<dyn crate::core::Bot>>,
    ) -> Result<Self> {
        let components = build_bot_components(&config, handler_bot_override).await?;
        let handler_chain = build_handler_chain(&components);
        Ok(Self {
            config,
            components,
            handler_chain,
        })
    }

    /// Drives the handler chain with a core message (for integration tests).
    pub async fn handle_core_message(&self, message: &CoreMessage) -> Result<()> {
        if let Err(e) = self.handler_chain.handle(message).await {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
        }
        Ok(())
    }
}

/// Runs the bot: validate config, init logging, build components, spawn the
/// retention sweeper, then dispatch Telegram updates until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    if let Some(parent) = Path::new(config.log_file()).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        retention_days = config.debtor_retention_days(),
        "Initializing bot"
    );

    let components = build_bot_components(&config, None).await?;
    let handler_chain = build_handler_chain(&components);

    tokio::spawn(run_sweeper(
        components.debtors.clone(),
        config.debtor_retention_days(),
        config.cleanup_interval_secs(),
    ));

    info!("Bot started successfully");

    run_dispatcher(
        components.teloxide_bot.clone(),
        handler_chain,
        components.bot_username.clone(),
    )
    .await
}
