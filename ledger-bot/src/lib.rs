//! # Accounting Telegram bot
//!
//! Records income/expense transactions and debtors in SQLite, replies with
//! formatted text and inline keyboards, and purges paid debtors after a
//! retention window. Core (Handler, Bot, Message), chain (HandlerChain), and
//! telegram (dispatcher, adapters) are transport-split so handlers can be
//! tested without Telegram.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod dialogue;
pub mod handlers;
pub mod runner;
pub mod sweeper;
pub mod telegram;
pub mod ui;

pub use cli::{handle_purge, load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, Bot, BotError, Button, Chat, Handler, HandlerError, HandlerResponse, Keyboard,
    Message, MessageDirection, Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{callback_to_core, run_dispatcher, TelegramBotAdapter, TelegramMessageWrapper};

pub use config::{BaseConfig, BotConfig};
pub use runner::{run_bot, LedgerBot};

pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use dialogue::{DialogueState, DialogueStore};
pub use handlers::{CallbackHandler, Command, CommandHandler, DialogueHandler};
