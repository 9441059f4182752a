//! Command handlers.
//!
//! Every command goes through [`execute`]: the group-only and role checks
//! happen once here, then the command's plugin builds a [`Reply`]. Plugins
//! never talk to Telegram directly; [`respond`] sends the reply.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding a variant to [`Command`] and a match arm to [`execute`]

pub mod antiflood;
pub mod ban;
pub mod help;
pub mod mute;
pub mod owner;
pub mod panel;
pub mod ping;
pub mod purge;
pub mod rules;
pub mod settings;
pub mod warn;
pub mod welcome;

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, ParseMode, ReplyParameters};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::moderation::content;
use crate::moderation::{ChatKind, ChatRef, CommandError, MessageRef, Role, Toggle, UserRef};

/// How long ephemeral confirmations stay visible.
const EPHEMERAL_TTL: Duration = Duration::from_secs(3);

const STORE_FAILURE: &str = "⚠️ Pengaturan tidak bisa dibaca saat ini. Coba lagi nanti.";

/// All bot commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Perintah yang tersedia:")]
pub enum Command {
    #[command(description = "Cek bot aktif")]
    Ping,

    #[command(description = "Bantuan")]
    Help,

    #[command(description = "Panel pengaturan")]
    Panel,

    #[command(description = "Lihat peraturan grup")]
    Rules,

    #[command(description = "Atur peraturan grup")]
    Setrules(String),

    #[command(description = "AntiLink on/off")]
    Antilink(String),

    #[command(description = "LockMedia on/off")]
    Lockmedia(String),

    #[command(description = "Hapus pesan perintah on/off")]
    Autodelcmd(String),

    #[command(description = "AntiFlood on/off")]
    Antiflood(String),

    #[command(description = "Atur limit flood")]
    Setflood(String),

    #[command(description = "Welcome on/off")]
    Welcome(String),

    #[command(description = "Atur pesan welcome")]
    Setwelcome(String),

    #[command(description = "Beri peringatan user")]
    Warn(String),

    #[command(description = "Reset peringatan user")]
    Resetwarn(String),

    #[command(description = "Lihat peringatan user")]
    Warnings(String),

    #[command(description = "Ban user")]
    Ban(String),

    #[command(description = "Kick user")]
    Kick(String),

    #[command(description = "Mute user")]
    Mute(String),

    #[command(description = "Unmute user")]
    Unmute(String),

    #[command(description = "Hapus banyak pesan")]
    Purge(String),

    #[command(description = "Cek owner bot")]
    Owner,

    #[command(description = "Keluarkan bot dari grup")]
    Leave,
}

impl Command {
    pub fn required_role(&self) -> Role {
        match self {
            Self::Ping | Self::Help | Self::Rules | Self::Warnings(_) => Role::Member,
            Self::Owner | Self::Leave => Role::Owner,
            _ => Role::Admin,
        }
    }

    pub fn group_only(&self) -> bool {
        !matches!(self, Self::Ping | Self::Help | Self::Owner)
    }
}

/// The replied-to message of a command.
#[derive(Debug, Clone)]
pub struct ReplyTarget {
    pub message: MessageRef,
    pub sender: Option<UserRef>,
    pub text: Option<String>,
}

/// Transport-free view of a command message.
#[derive(Debug, Clone)]
pub struct CommandInput {
    pub chat: ChatRef,
    pub chat_kind: ChatKind,
    pub message: MessageRef,
    pub sender: Option<UserRef>,
    pub reply_to: Option<ReplyTarget>,
}

impl CommandInput {
    pub fn from_telegram(msg: &Message) -> Self {
        let reply_to = msg.reply_to_message().map(|reply| ReplyTarget {
            message: reply.id.into(),
            sender: reply.from.as_ref().map(|user| user.id.into()),
            text: content::text_of(reply).map(str::to_owned),
        });

        Self {
            chat: msg.chat.id.into(),
            chat_kind: ChatKind::from(&msg.chat),
            message: msg.id.into(),
            sender: msg.from.as_ref().map(|user| user.id.into()),
            reply_to,
        }
    }

    pub fn reply_sender(&self) -> Option<UserRef> {
        self.reply_to.as_ref().and_then(|reply| reply.sender)
    }
}

/// What to send back for a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Nothing,
    Text(String),
    Html(String),
    Markup {
        html: String,
        keyboard: InlineKeyboardMarkup,
    },
    /// Plain text removed again after a few seconds.
    Ephemeral(String),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Run one command after the group-only and role checks.
pub async fn execute(
    state: &AppState,
    cmd: Command,
    input: &CommandInput,
) -> Result<Reply, CommandError> {
    if cmd.group_only() && !input.chat_kind.is_group() {
        return Err(CommandError::usage("Perintah ini hanya bisa dipakai di grup."));
    }

    let role = cmd.required_role();
    if role != Role::Member {
        let allowed = match input.sender {
            Some(user) => state.gate.authorize(role, input.chat, user).await,
            None => false,
        };
        if !allowed {
            return Err(CommandError::Denied(role.denial()));
        }
    }

    match cmd {
        Command::Ping => Ok(ping::ping_command()),
        Command::Help => Ok(help::help_command(state)),
        Command::Panel => panel::panel_command(state, input).await,
        Command::Rules => rules::rules_command(state, input).await,
        Command::Setrules(args) => rules::setrules_command(state, input, &args).await,
        Command::Antilink(args) => settings::toggle_command(state, input, Toggle::Antilink, &args).await,
        Command::Lockmedia(args) => settings::toggle_command(state, input, Toggle::Lockmedia, &args).await,
        Command::Autodelcmd(args) => {
            settings::toggle_command(state, input, Toggle::AutoDeleteCommands, &args).await
        }
        Command::Antiflood(args) => settings::toggle_command(state, input, Toggle::Antiflood, &args).await,
        Command::Setflood(args) => antiflood::setflood_command(state, input, &args).await,
        Command::Welcome(args) => settings::toggle_command(state, input, Toggle::Welcome, &args).await,
        Command::Setwelcome(args) => welcome::setwelcome_command(state, input, &args).await,
        Command::Warn(args) => warn::warn_command(state, input, &args).await,
        Command::Resetwarn(args) => warn::resetwarn_command(state, input, &args).await,
        Command::Warnings(args) => warn::warnings_command(state, input, &args).await,
        Command::Ban(args) => ban::ban_command(state, input, &args).await,
        Command::Kick(args) => ban::kick_command(state, input, &args).await,
        Command::Mute(args) => mute::mute_command(state, input, &args).await,
        Command::Unmute(args) => mute::unmute_command(state, input, &args).await,
        Command::Purge(args) => purge::purge_command(state, input, &args).await,
        Command::Owner => Ok(owner::owner_command()),
        Command::Leave => owner::leave_command(state, input).await,
    }
}

/// Execute a command and send its reply.
///
/// Usage and denial errors become replies. A store failure is reported to
/// the chat and then returned.
pub async fn handle(
    bot: &ThrottledBot,
    state: &AppState,
    cmd: Command,
    msg: &Message,
) -> anyhow::Result<()> {
    let input = CommandInput::from_telegram(msg);
    debug!("Command {:?} in chat {} from {:?}", cmd, input.chat, input.sender);

    let reply = match execute(state, cmd, &input).await {
        Ok(reply) => reply,
        Err(CommandError::Store(e)) => {
            respond(bot, msg.chat.id, msg.id, Reply::text(STORE_FAILURE)).await?;
            return Err(e.into());
        }
        Err(e) => Reply::Text(e.to_string()),
    };

    respond(bot, msg.chat.id, msg.id, reply).await
}

/// Send a [`Reply`] to the chat.
pub async fn respond(
    bot: &ThrottledBot,
    chat_id: ChatId,
    reply_to: teloxide::types::MessageId,
    reply: Reply,
) -> anyhow::Result<()> {
    let params = ReplyParameters::new(reply_to).allow_sending_without_reply();

    match reply {
        Reply::Nothing => {}
        Reply::Text(text) => {
            bot.send_message(chat_id, text)
                .reply_parameters(params)
                .await?;
        }
        Reply::Html(html) => {
            bot.send_message(chat_id, html)
                .parse_mode(ParseMode::Html)
                .reply_parameters(params)
                .await?;
        }
        Reply::Markup { html, keyboard } => {
            bot.send_message(chat_id, html)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .reply_parameters(params)
                .await?;
        }
        Reply::Ephemeral(text) => {
            let confirm = bot.send_message(chat_id, text).await?;
            let bot = bot.clone();

            // Auto-delete confirmation after a few seconds
            tokio::spawn(async move {
                tokio::time::sleep(EPHEMERAL_TTL).await;
                if let Err(e) = bot.delete_message(chat_id, confirm.id).await {
                    error!("Failed to delete confirmation in {}: {}", chat_id, e);
                }
            });
        }
    }

    Ok(())
}
