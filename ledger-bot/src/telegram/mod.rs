//! Telegram transport: adapters to core types, the core Bot impl, and the
//! dispatcher runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{callback_to_core, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_dispatcher;
