//! Welcome message for new members.

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberUpdated, ParseMode};
use tracing::{debug, info};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::plugins::welcome::{render_welcome, Newcomer, DEFAULT_WELCOME};

/// Returns the handler for new member events.
pub fn handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(is_new_member).endpoint(welcome_handler)
}

/// A non-bot user who was not in the chat before and is now.
fn is_new_member(update: ChatMemberUpdated) -> bool {
    let joining = !update.old_chat_member.is_present() && update.new_chat_member.is_present();
    joining && !update.new_chat_member.user.is_bot
}

async fn welcome_handler(
    bot: ThrottledBot,
    update: ChatMemberUpdated,
    state: AppState,
) -> anyhow::Result<()> {
    let chat = &update.chat;
    let user = &update.new_chat_member.user;

    let config = state.settings.load(chat.id.into()).await?;
    if !config.welcome_enabled {
        debug!("Welcome disabled for chat {}", chat.id);
        return Ok(());
    }

    let newcomer = Newcomer {
        id: user.id.0,
        first_name: &user.first_name,
        username: user.username.as_deref(),
    };
    let template = config.welcome_template.as_deref().unwrap_or(DEFAULT_WELCOME);
    let text = render_welcome(template, &newcomer, chat.title().unwrap_or("Grup"));

    bot.send_message(chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;

    info!("Welcomed {} in chat {}", user.id, chat.id);
    Ok(())
}
