//! Event handlers.
//!
//! - [`on_message`] - every message: moderation pipeline, then commands
//! - [`welcome`] - chat member joins

pub mod welcome;

use std::future::Future;

use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::BotCommands;
use tracing::debug;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::moderation::hygiene::{is_command, should_delete_command_message};
use crate::moderation::{InboundMessage, Verdict};
use crate::plugins::{self, Command};

/// Telegram entry point for every inbound message.
pub async fn on_message(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    me: Me,
) -> anyhow::Result<()> {
    let inbound = InboundMessage::from_telegram(&msg);
    let (bot, msg, me, shared) = (&bot, &msg, &me, &state);

    moderate_and_dispatch(&state, &inbound, move || async move {
        let Some(text) = msg.text() else {
            return Ok(());
        };
        match Command::parse(text, me.username()) {
            Ok(cmd) => plugins::handle(bot, shared, cmd, msg).await,
            Err(e) => {
                debug!("Not one of our commands in {}: {}", msg.chat.id, e);
                Ok(())
            }
        }
    })
    .await
}

/// Run the pipeline on `inbound`, then `dispatch` if it is a command, then
/// command cleanup.
///
/// A consumed message never reaches `dispatch`. Cleanup waits for
/// `dispatch` to finish and runs even when it fails; the dispatch result is
/// returned afterwards.
pub async fn moderate_and_dispatch<F, Fut>(
    state: &AppState,
    inbound: &InboundMessage,
    dispatch: F,
) -> anyhow::Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let config = match state.pipeline.process(inbound).await? {
        Verdict::Passed(config) => config,
        Verdict::Consumed { .. } => return Ok(()),
    };

    if !inbound.text.as_deref().is_some_and(is_command) {
        return Ok(());
    }

    let handled = dispatch().await;

    if should_delete_command_message(inbound.chat_kind, config.auto_delete_commands_enabled) {
        if let Err(e) = state.actuator.delete_message(inbound.chat, inbound.message).await {
            debug!("Could not delete command message in {}: {}", inbound.chat, e);
        }
    }

    handled
}
