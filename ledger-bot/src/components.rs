//! Component factory: builds BotComponents from config. Isolates assembly
//! logic from the runner.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, instrument};

use storage::{DebtorRepository, SqlitePoolManager, TransactionRepository};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot;
use crate::dialogue::DialogueStore;
use crate::handlers::{CallbackHandler, CommandHandler, DialogueHandler};
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for run_bot / LedgerBot; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub transactions: Arc<TransactionRepository>,
    pub debtors: Arc<DebtorRepository>,
    pub teloxide_bot: teloxide::Bot,
    /// The Bot impl handlers send through; tests override with a mock.
    pub handler_bot: Arc<dyn Bot>,
    pub bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
    pub dialogues: DialogueStore,
    pub report_limit: i64,
}

/// Builds BotComponents: one shared SQLite pool, both repositories, the
/// teloxide bot (honoring a custom API URL), and the dialogue store.
///
/// When `handler_bot_override` is `Some`, handlers send through it instead of
/// Telegram (used by integration tests).
#[instrument(skip(config, handler_bot_override))]
pub async fn build_bot_components(
    config: &BotConfig,
    handler_bot_override: Option<Arc<dyn Bot>>,
) -> Result<BotComponents> {
    let pool = SqlitePoolManager::new(config.database_url())
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url(),
                "Failed to open database"
            );
            anyhow::anyhow!("Failed to open database: {}", e)
        })?;

    let transactions = Arc::new(
        TransactionRepository::with_pool(pool.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize transaction storage: {}", e))?,
    );
    let debtors = Arc::new(
        DebtorRepository::with_pool(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize debtor storage: {}", e))?,
    );

    let mut teloxide_bot = teloxide::Bot::new(config.bot_token());
    if let Some(url) = config.telegram_api_url() {
        let url = reqwest::Url::parse(url)
            .map_err(|e| anyhow::anyhow!("Invalid Telegram API URL: {}", e))?;
        info!(api_url = %url, "Using custom Telegram API URL");
        teloxide_bot = teloxide_bot.set_api_url(url);
    }

    let handler_bot = handler_bot_override
        .unwrap_or_else(|| Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())));

    Ok(BotComponents {
        transactions,
        debtors,
        teloxide_bot,
        handler_bot,
        bot_username: Arc::new(tokio::sync::RwLock::new(None)),
        dialogues: DialogueStore::new(),
        report_limit: config.report_limit(),
    })
}

/// Wires the handler chain: commands, inline buttons, dialogue steps.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            components.handler_bot.clone(),
            components.transactions.clone(),
            components.debtors.clone(),
            components.dialogues.clone(),
            components.bot_username.clone(),
            components.report_limit,
        )))
        .add_handler(Arc::new(CallbackHandler::new(
            components.handler_bot.clone(),
            components.transactions.clone(),
            components.debtors.clone(),
            components.dialogues.clone(),
            components.report_limit,
        )))
        .add_handler(Arc::new(DialogueHandler::new(
            components.handler_bot.clone(),
            components.transactions.clone(),
            components.debtors.clone(),
            components.dialogues.clone(),
        )))
}
