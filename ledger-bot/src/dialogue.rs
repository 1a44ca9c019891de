//! Per-chat conversation state.
//!
//! The record-income/expense and edit flows span several messages: the bot
//! prompts, the user answers with a plain text message, and the pending
//! [`DialogueState`] tells the chain what that answer means. State lives in
//! memory only and is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use storage::TransactionKind;

/// What the next plain text message from a chat will be interpreted as.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueState {
    /// Menu button pressed; waiting for the amount.
    AwaitingAmount { kind: TransactionKind },
    /// Amount received; waiting for the note (`-` skips).
    AwaitingNote { kind: TransactionKind, amount: f64 },
    /// Edit button pressed; waiting for `<amount> [note]`.
    EditingTransaction { id: i64 },
    /// `/edit_debtor <id>` received; waiting for `<name> <amount>`.
    EditingDebtor { id: i64 },
}

/// Shared map of chat id → pending dialogue state.
#[derive(Clone, Default)]
pub struct DialogueStore {
    states: Arc<RwLock<HashMap<i64, DialogueState>>>,
}

impl DialogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pending state for a chat.
    pub async fn set(&self, chat_id: i64, state: DialogueState) {
        self.states.write().await.insert(chat_id, state);
    }

    /// Removes and returns the pending state, if any.
    pub async fn take(&self, chat_id: i64) -> Option<DialogueState> {
        self.states.write().await.remove(&chat_id)
    }

    /// Drops the pending state without reading it.
    pub async fn clear(&self, chat_id: i64) {
        self.states.write().await.remove(&chat_id);
    }
}
