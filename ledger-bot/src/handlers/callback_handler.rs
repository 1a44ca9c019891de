//! Inline button handler: interprets callback data from the main menu, the
//! edit menu, and the debtor list.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use storage::{DebtorRepository, StorageError, TransactionKind, TransactionRepository};

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use crate::dialogue::{DialogueState, DialogueStore};
use crate::ui;

/// How many transactions the edit menu offers.
const EDIT_MENU_LIMIT: i64 = 5;

/// Handles `message_type == "callback"` (content = callback data); ignores
/// everything else.
pub struct CallbackHandler {
    bot: Arc<dyn Bot>,
    transactions: Arc<TransactionRepository>,
    debtors: Arc<DebtorRepository>,
    dialogues: DialogueStore,
    report_limit: i64,
}

impl CallbackHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        transactions: Arc<TransactionRepository>,
        debtors: Arc<DebtorRepository>,
        dialogues: DialogueStore,
        report_limit: i64,
    ) -> Self {
        Self {
            bot,
            transactions,
            debtors,
            dialogues,
            report_limit,
        }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn start_amount_dialogue(
        &self,
        message: &Message,
        kind: TransactionKind,
    ) -> Result<HandlerResponse> {
        self.dialogues
            .set(message.chat.id, DialogueState::AwaitingAmount { kind })
            .await;
        let prompt = match kind {
            TransactionKind::Income => "Please enter the income amount:",
            TransactionKind::Expense => "Please enter the expense amount:",
        };
        self.reply(message, prompt.to_string()).await
    }

    async fn show_report(&self, message: &Message) -> Result<HandlerResponse> {
        let recent = self.transactions.recent(self.report_limit).await?;
        let summary = self.transactions.summary().await?;
        let text = ui::format_report(&recent, &summary);
        self.bot
            .send_menu(&message.chat, &text, &ui::main_menu())
            .await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn show_edit_menu(&self, message: &Message) -> Result<HandlerResponse> {
        let recent = self.transactions.recent(EDIT_MENU_LIMIT).await?;
        if recent.is_empty() {
            let text = "No transactions to edit.".to_string();
            self.bot
                .send_menu(&message.chat, &text, &ui::main_menu())
                .await?;
            return Ok(HandlerResponse::Reply(text));
        }

        let text = "Select a transaction to edit:".to_string();
        self.bot
            .send_menu(&message.chat, &text, &ui::edit_menu(&recent))
            .await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn start_transaction_edit(&self, message: &Message, id: i64) -> Result<HandlerResponse> {
        match self.transactions.get(id).await? {
            Some(record) => {
                self.dialogues
                    .set(message.chat.id, DialogueState::EditingTransaction { id })
                    .await;
                self.reply(
                    message,
                    format!(
                        "Editing: {}. Send the new <amount> [note]:",
                        ui::transaction_line(&record)
                    ),
                )
                .await
            }
            None => {
                self.reply(message, format!("Transaction #{} not found.", id))
                    .await
            }
        }
    }

    async fn mark_debtor_paid(&self, message: &Message, id: i64) -> Result<HandlerResponse> {
        match self.debtors.mark_paid(id).await {
            Ok(()) => {
                info!(user_id = message.user.id, debtor_id = id, "Debtor marked paid");
                self.reply(message, format!("Debtor #{} marked as paid.", id))
                    .await
            }
            Err(StorageError::NotFound(_)) => {
                self.reply(message, format!("Debtor #{} not found.", id)).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn show_main_menu(&self, message: &Message) -> Result<HandlerResponse> {
        let text = "Please choose an option:".to_string();
        self.bot
            .send_menu(&message.chat, &text, &ui::main_menu())
            .await?;
        Ok(HandlerResponse::Reply(text))
    }
}

#[async_trait]
impl Handler for CallbackHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_callback() {
            return Ok(HandlerResponse::Ignore);
        }

        let data = message.content.as_str();
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            data,
            "Handling callback"
        );

        if let Some(raw_id) = data.strip_prefix(ui::CB_EDIT_TX_PREFIX) {
            return match raw_id.parse() {
                Ok(id) => self.start_transaction_edit(message, id).await,
                Err(_) => {
                    warn!(data, "Malformed edit callback");
                    Ok(HandlerResponse::Stop)
                }
            };
        }

        if let Some(raw_id) = data.strip_prefix(ui::CB_DEBTOR_PAID_PREFIX) {
            return match raw_id.parse() {
                Ok(id) => self.mark_debtor_paid(message, id).await,
                Err(_) => {
                    warn!(data, "Malformed debtor callback");
                    Ok(HandlerResponse::Stop)
                }
            };
        }

        match data {
            ui::CB_INCOME => {
                self.start_amount_dialogue(message, TransactionKind::Income)
                    .await
            }
            ui::CB_EXPENSE => {
                self.start_amount_dialogue(message, TransactionKind::Expense)
                    .await
            }
            ui::CB_REPORT => self.show_report(message).await,
            ui::CB_EDIT => self.show_edit_menu(message).await,
            ui::CB_MAIN_MENU => self.show_main_menu(message).await,
            other => {
                warn!(data = other, "Unknown callback data");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
