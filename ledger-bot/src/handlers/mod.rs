//! Handler implementations: commands, inline buttons, dialogue steps.

mod callback_handler;
mod command_handler;
mod dialogue_handler;

pub use callback_handler::CallbackHandler;
pub use command_handler::{Command, CommandHandler};
pub use dialogue_handler::DialogueHandler;
