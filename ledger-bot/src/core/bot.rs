//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; the teloxide implementation lives in
//! [`crate::telegram::TelegramBotAdapter`]. Tests substitute a mock impl
//! that collects sent messages.

use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::types::{Chat, Keyboard, Message};

/// Abstraction for sending messages, with or without an inline keyboard.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a text message with an inline keyboard attached.
    async fn send_menu(&self, chat: &Chat, text: &str, keyboard: &Keyboard) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
