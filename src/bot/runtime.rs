//! Bot runtime - Polling and Webhook runners.

use teloxide::dispatching::DefaultKey;
use teloxide::prelude::*;
use teloxide::types::AllowedUpdate;
use teloxide::update_listeners::Polling;
use tracing::info;

use super::dispatcher::ThrottledBot;
use super::webhook;
use crate::config::{BotMode, Config};

/// Update kinds the dispatcher handles. `chat_member` is not delivered
/// unless asked for.
pub const ALLOWED_UPDATES: [AllowedUpdate; 3] = [
    AllowedUpdate::Message,
    AllowedUpdate::ChatMember,
    AllowedUpdate::CallbackQuery,
];

/// Run the bot with the configured mode.
pub async fn run(
    config: &Config,
    bot: ThrottledBot,
    mut dispatcher: Dispatcher<ThrottledBot, anyhow::Error, DefaultKey>,
) -> anyhow::Result<()> {
    match config.bot_mode {
        BotMode::Polling => {
            info!("Starting bot in polling mode...");
            // A webhook left over from an earlier deployment blocks getUpdates.
            let listener = Polling::builder(bot)
                .allowed_updates(ALLOWED_UPDATES.to_vec())
                .delete_webhook()
                .await
                .build();
            let error_handler = LoggingErrorHandler::with_custom_text("Error from update listener");
            dispatcher.dispatch_with_listener(listener, error_handler).await;
        }
        BotMode::Webhook => {
            info!("Starting bot in webhook mode...");
            webhook::start_webhook(config, dispatcher, bot).await?;
        }
    }

    info!("Bot stopped");
    Ok(())
}
