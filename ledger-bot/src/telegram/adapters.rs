//! Conversions from teloxide types to core types.

use chrono::Utc;

use crate::core::{Chat, Message, MessageDirection, ToCoreMessage, ToCoreUser, User};

/// Telegram user → core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram message → core [`Message`]. Text starting with `/` is typed
/// `"command"`, other text `"text"`; content is empty for non-text messages.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let content = self.0.text().unwrap_or("").to_string();
        let message_type = if content.starts_with('/') {
            "command"
        } else {
            "text"
        };

        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content,
            message_type: message_type.to_string(),
            direction: MessageDirection::Incoming,
            created_at: Utc::now(),
        }
    }
}

/// Callback query → core [`Message`] with `message_type = "callback"` and
/// content = callback data. Returns `None` when the query has no data or no
/// originating message (nothing to act on).
pub fn callback_to_core(query: &teloxide::types::CallbackQuery) -> Option<Message> {
    let data = query.data.as_ref()?;
    let message = query.message.as_ref()?;

    Some(Message {
        id: message.id().to_string(),
        user: TelegramUserWrapper(&query.from).to_core(),
        chat: Chat {
            id: message.chat().id.0,
            chat_type: format!("{:?}", message.chat().kind),
        },
        content: data.clone(),
        message_type: "callback".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let wrapper = TelegramUserWrapper(&user);
        let core_user = wrapper.to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }
}
