//! Message and direction types for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// A single update with user, chat, and content.
///
/// `message_type` is `"command"` for `/`-messages, `"callback"` for inline
/// button presses (content carries the callback data), `"text"` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_command(&self) -> bool {
        self.message_type == "command"
    }

    pub fn is_callback(&self) -> bool {
        self.message_type == "callback"
    }

    pub fn is_text(&self) -> bool {
        self.message_type == "text"
    }
}
