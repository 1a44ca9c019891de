//! Slash-command handler: parses `/`-messages with teloxide's BotCommands
//! derive and runs the matching repository operation.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::utils::command::BotCommands;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use storage::{DebtorRepository, TransactionKind, TransactionRepository};

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use crate::dialogue::{DialogueState, DialogueStore};
use crate::ui;

/// Chat commands. Argument-carrying commands take the rest of the line and
/// parse it themselves (amounts are validated, names may contain spaces).
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case")]
pub enum Command {
    /// Show the main menu.
    Start,
    /// Record an income: /in <amount> [note]
    In(String),
    /// Record an expense: /out <amount> [note]
    Out(String),
    /// Show the latest transactions and totals.
    Report,
    /// Register a debtor: /set_debtor <name> <amount>
    SetDebtor(String),
    /// List all debtors.
    DebtorList,
    /// Edit a debtor: /edit_debtor <id>
    EditDebtor(String),
    /// Delete all transactions and debtors.
    ClearData,
    /// Delete all transactions.
    ClearRep,
    /// Delete all debtors.
    ClearDebtorList,
    /// Health check: reply with record counts.
    Test,
}

/// Handles `message_type == "command"`; ignores everything else so the chain
/// can pass plain text on to the dialogue handler.
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    transactions: Arc<TransactionRepository>,
    debtors: Arc<DebtorRepository>,
    dialogues: DialogueStore,
    bot_username: Arc<RwLock<Option<String>>>,
    report_limit: i64,
}

impl CommandHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        transactions: Arc<TransactionRepository>,
        debtors: Arc<DebtorRepository>,
        dialogues: DialogueStore,
        bot_username: Arc<RwLock<Option<String>>>,
        report_limit: i64,
    ) -> Self {
        Self {
            bot,
            transactions,
            debtors,
            dialogues,
            bot_username,
            report_limit,
        }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn send_main_menu(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot
            .send_menu(&message.chat, &text, &ui::main_menu())
            .await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn record_entry(
        &self,
        message: &Message,
        kind: TransactionKind,
        args: &str,
    ) -> Result<HandlerResponse> {
        let (amount, note) = match ui::parse_amount_and_note(args) {
            Ok(parsed) => parsed,
            Err(e) => {
                let usage = match kind {
                    TransactionKind::Income => "/in <amount> [note]",
                    TransactionKind::Expense => "/out <amount> [note]",
                };
                return self.reply(message, format!("{} Usage: {}", e, usage)).await;
            }
        };

        let record = self.transactions.add(kind, amount, note).await?;
        info!(
            user_id = message.user.id,
            id = record.id,
            kind = %kind,
            amount,
            "Recorded transaction"
        );
        self.send_main_menu(
            message,
            format!(
                "{} of {} recorded successfully!",
                capitalized_kind(kind),
                ui::format_amount(amount)
            ),
        )
        .await
    }

    async fn report(&self, message: &Message) -> Result<HandlerResponse> {
        let recent = self.transactions.recent(self.report_limit).await?;
        let summary = self.transactions.summary().await?;
        self.send_main_menu(message, ui::format_report(&recent, &summary))
            .await
    }

    async fn set_debtor(&self, message: &Message, args: &str) -> Result<HandlerResponse> {
        let (name, amount) = match ui::parse_name_and_amount(args) {
            Ok(parsed) => parsed,
            Err(e) => {
                return self
                    .reply(message, format!("{} Usage: /set_debtor <name> <amount>", e))
                    .await;
            }
        };

        let record = self.debtors.add(&name, amount).await?;
        self.reply(
            message,
            format!(
                "Debtor #{} registered: {} owes {}.",
                record.id,
                record.name,
                ui::format_amount(record.amount)
            ),
        )
        .await
    }

    async fn debtor_list(&self, message: &Message) -> Result<HandlerResponse> {
        let debtors = self.debtors.list().await?;
        let text = ui::format_debtor_list(&debtors);
        let keyboard = ui::debtor_menu(&debtors);
        if keyboard.is_empty() {
            self.reply(message, text).await
        } else {
            self.bot.send_menu(&message.chat, &text, &keyboard).await?;
            Ok(HandlerResponse::Reply(text))
        }
    }

    async fn edit_debtor(&self, message: &Message, args: &str) -> Result<HandlerResponse> {
        let id: i64 = match args.trim().parse() {
            Ok(id) => id,
            Err(_) => {
                return self
                    .reply(message, "Usage: /edit_debtor <id>".to_string())
                    .await;
            }
        };

        match self.debtors.get(id).await? {
            Some(debtor) => {
                self.dialogues
                    .set(message.chat.id, DialogueState::EditingDebtor { id })
                    .await;
                self.reply(
                    message,
                    format!(
                        "Editing debtor #{} ({}, {}). Send the new <name> <amount>:",
                        debtor.id,
                        debtor.name,
                        ui::format_amount(debtor.amount)
                    ),
                )
                .await
            }
            None => self.reply(message, format!("Debtor #{} not found.", id)).await,
        }
    }

    async fn clear_data(&self, message: &Message) -> Result<HandlerResponse> {
        let transactions = self.transactions.clear().await?;
        let debtors = self.debtors.clear().await?;
        self.dialogues.clear(message.chat.id).await;
        self.reply(
            message,
            format!(
                "All data cleared: {} transactions, {} debtors removed.",
                transactions, debtors
            ),
        )
        .await
    }

    async fn health_check(&self, message: &Message) -> Result<HandlerResponse> {
        let transactions = self.transactions.count().await?;
        let debtors = self.debtors.count().await?;
        self.reply(
            message,
            format!(
                "OK. {} transactions, {} debtors on record.",
                transactions, debtors
            ),
        )
        .await
    }
}

fn capitalized_kind(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_command() {
            return Ok(HandlerResponse::Ignore);
        }

        let username = self.bot_username.read().await.clone().unwrap_or_default();
        let command = match Command::parse(&message.content, username.as_str()) {
            Ok(command) => command,
            Err(e) => {
                warn!(
                    user_id = message.user.id,
                    content = %message.content,
                    error = %e,
                    "Unparseable command"
                );
                return self
                    .reply(message, "Unknown command. Try /start.".to_string())
                    .await;
            }
        };

        // A fresh command abandons any half-finished dialogue.
        self.dialogues.clear(message.chat.id).await;

        match command {
            Command::Start => {
                self.send_main_menu(
                    message,
                    "Welcome to your Accounting Bot! Please choose an option:".to_string(),
                )
                .await
            }
            Command::In(args) => {
                self.record_entry(message, TransactionKind::Income, &args)
                    .await
            }
            Command::Out(args) => {
                self.record_entry(message, TransactionKind::Expense, &args)
                    .await
            }
            Command::Report => self.report(message).await,
            Command::SetDebtor(args) => self.set_debtor(message, &args).await,
            Command::DebtorList => self.debtor_list(message).await,
            Command::EditDebtor(args) => self.edit_debtor(message, &args).await,
            Command::ClearData => self.clear_data(message).await,
            Command::ClearRep => {
                let removed = self.transactions.clear().await?;
                self.reply(message, format!("{} transactions removed.", removed))
                    .await
            }
            Command::ClearDebtorList => {
                let removed = self.debtors.clear().await?;
                self.reply(message, format!("{} debtors removed.", removed))
                    .await
            }
            Command::Test => self.health_check(message).await,
        }
    }
}
