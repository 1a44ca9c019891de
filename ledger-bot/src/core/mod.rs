//! Core types and traits: Handler, Bot, Message, Keyboard, error, logger.
//! Transport-agnostic; the teloxide side lives in [`crate::telegram`].

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Button, Chat, Handler, HandlerResponse, Keyboard, Message, MessageDirection, ToCoreMessage,
    ToCoreUser, User,
};
