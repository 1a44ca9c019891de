//! Dispatcher runner: converts teloxide updates (messages and callback
//! queries) to core messages and passes them to the HandlerChain. Calls
//! get_me to populate the bot_username cache used for command parsing.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;

use super::adapters::{callback_to_core, TelegramMessageWrapper};

/// Starts the dispatcher with the given teloxide Bot, HandlerChain, and
/// bot_username cache. Each update is converted to a core message and handled
/// in a spawned task so the dispatcher loop returns immediately.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            *bot_username.write().await = Some(username.clone());
            info!(username = %username, "Bot username set before dispatch");
        }
    }

    let message_chain = handler_chain.clone();
    let callback_chain = handler_chain;

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(
            move |msg: teloxide::types::Message| {
                let chain = message_chain.clone();
                async move {
                    on_message(chain, msg).await;
                    respond(())
                }
            },
        ))
        .branch(Update::filter_callback_query().endpoint(
            move |bot: Bot, query: CallbackQuery| {
                let chain = callback_chain.clone();
                async move {
                    on_callback(bot, chain, query).await;
                    respond(())
                }
            },
        ));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn on_message(chain: HandlerChain, msg: teloxide::types::Message) {
    let wrapper = TelegramMessageWrapper(&msg);
    let core_msg = wrapper.to_core();

    match msg.text() {
        Some(text) => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_content = %text,
                "Received message"
            );
        }
        None => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Received non-text message, ignoring"
            );
            return;
        }
    }

    // Run handler chain in a spawned task so the dispatcher returns immediately
    tokio::spawn(async move {
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });
}

async fn on_callback(bot: Bot, chain: HandlerChain, query: CallbackQuery) {
    // Acknowledge the press so the client stops the spinner.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        error!(error = %e, "Failed to answer callback query");
    }

    let Some(core_msg) = callback_to_core(&query) else {
        info!("Callback query without data or message, ignoring");
        return;
    };

    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        data = %core_msg.content,
        "Received callback query"
    );

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });
}
