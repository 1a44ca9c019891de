//! Plain-text handler: consumes pending dialogue state (amount, note, and
//! edit answers). Without a pending state, plain text falls through the chain.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use storage::{DebtorRepository, StorageError, TransactionKind, TransactionRepository};

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use crate::dialogue::{DialogueState, DialogueStore};
use crate::ui;

pub struct DialogueHandler {
    bot: Arc<dyn Bot>,
    transactions: Arc<TransactionRepository>,
    debtors: Arc<DebtorRepository>,
    dialogues: DialogueStore,
}

impl DialogueHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        transactions: Arc<TransactionRepository>,
        debtors: Arc<DebtorRepository>,
        dialogues: DialogueStore,
    ) -> Self {
        Self {
            bot,
            transactions,
            debtors,
            dialogues,
        }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    /// Invalid input keeps the dialogue alive so the user can retry.
    async fn retry(
        &self,
        message: &Message,
        state: DialogueState,
        text: String,
    ) -> Result<HandlerResponse> {
        self.dialogues.set(message.chat.id, state).await;
        self.reply(message, text).await
    }

    async fn on_amount(&self, message: &Message, kind: TransactionKind) -> Result<HandlerResponse> {
        let amount = match ui::parse_amount(&message.content) {
            Ok(amount) => amount,
            Err(e) => {
                return self
                    .retry(message, DialogueState::AwaitingAmount { kind }, e)
                    .await;
            }
        };

        self.dialogues
            .set(message.chat.id, DialogueState::AwaitingNote { kind, amount })
            .await;
        self.reply(
            message,
            "Please enter a description for this transaction (or '-' for none):".to_string(),
        )
        .await
    }

    async fn on_note(
        &self,
        message: &Message,
        kind: TransactionKind,
        amount: f64,
    ) -> Result<HandlerResponse> {
        let note = match message.content.trim() {
            "" | "-" => None,
            text => Some(text.to_string()),
        };

        let record = self.transactions.add(kind, amount, note).await?;
        info!(
            user_id = message.user.id,
            id = record.id,
            kind = %kind,
            amount,
            "Recorded transaction via dialogue"
        );

        let text = format!(
            "{} of {} recorded successfully!",
            match kind {
                TransactionKind::Income => "Income",
                TransactionKind::Expense => "Expense",
            },
            ui::format_amount(amount)
        );
        self.bot
            .send_menu(&message.chat, &text, &ui::main_menu())
            .await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn on_transaction_edit(&self, message: &Message, id: i64) -> Result<HandlerResponse> {
        let (amount, note) = match ui::parse_amount_and_note(&message.content) {
            Ok(parsed) => parsed,
            Err(e) => {
                return self
                    .retry(
                        message,
                        DialogueState::EditingTransaction { id },
                        format!("{} Send <amount> [note]:", e),
                    )
                    .await;
            }
        };

        match self.transactions.update(id, amount, note).await {
            Ok(()) => {
                self.reply(message, format!("Transaction #{} updated.", id))
                    .await
            }
            Err(StorageError::NotFound(_)) => {
                self.reply(message, format!("Transaction #{} not found.", id))
                    .await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn on_debtor_edit(&self, message: &Message, id: i64) -> Result<HandlerResponse> {
        let (name, amount) = match ui::parse_name_and_amount(&message.content) {
            Ok(parsed) => parsed,
            Err(e) => {
                return self
                    .retry(
                        message,
                        DialogueState::EditingDebtor { id },
                        format!("{} Send <name> <amount>:", e),
                    )
                    .await;
            }
        };

        match self.debtors.update(id, &name, amount).await {
            Ok(()) => self.reply(message, format!("Debtor #{} updated.", id)).await,
            Err(StorageError::NotFound(_)) => {
                self.reply(message, format!("Debtor #{} not found.", id)).await
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Handler for DialogueHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() {
            return Ok(HandlerResponse::Ignore);
        }

        let Some(state) = self.dialogues.take(message.chat.id).await else {
            return Ok(HandlerResponse::Ignore);
        };

        match state {
            DialogueState::AwaitingAmount { kind } => self.on_amount(message, kind).await,
            DialogueState::AwaitingNote { kind, amount } => {
                self.on_note(message, kind, amount).await
            }
            DialogueState::EditingTransaction { id } => {
                self.on_transaction_edit(message, id).await
            }
            DialogueState::EditingDebtor { id } => self.on_debtor_edit(message, id).await,
        }
    }
}
