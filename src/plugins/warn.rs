//! Warning command handlers.
//!
//! /warn bans on the third warning. The ban does not reset the counter;
//! only /resetwarn does, so every further /warn requests the ban again.

use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::moderation::warns::{reaches_ban, WARN_LIMIT};
use crate::moderation::{ActionOutcome, CommandError, UserRef};
use crate::utils::resolve_target;

use super::{CommandInput, Reply};

const TARGET_USAGE: &str = "Reply ke pesan user, atau berikan user id.";

/// Link to a user by id.
pub fn mention(user: UserRef) -> String {
    format!("<a href=\"tg://user?id={0}\">{0}</a>", user)
}

/// Permission hint shown when an enforcement request fails.
pub fn failure_hint(reason: &str) -> String {
    format!(
        "❌ Gagal: {}\nPastikan bot admin dengan izin yang cukup.",
        crate::utils::html_escape(reason)
    )
}

pub(super) fn target(input: &CommandInput, args: &str) -> Result<(UserRef, usize), CommandError> {
    resolve_target(input.reply_sender(), args).ok_or_else(|| CommandError::usage(TARGET_USAGE))
}

/// Handle /warn.
pub async fn warn_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let (user, _) = target(input, args)?;
    let count = state.warns.warn(input.chat, user).await?;

    if !reaches_ban(count) {
        return Ok(Reply::Html(format!(
            "⚠️ {} mendapat peringatan {}/{}.",
            mention(user),
            count,
            WARN_LIMIT
        )));
    }

    let outcome = ActionOutcome::from(state.actuator.ban(input.chat, user).await);
    state.gate.forget(input.chat, user);

    Ok(Reply::Html(match outcome {
        ActionOutcome::Done => {
            info!("User {} reached warn limit in chat {}, banned", user, input.chat);
            format!(
                "🔨 {} mencapai {}/{} peringatan dan di-ban.",
                mention(user),
                count,
                WARN_LIMIT
            )
        }
        ActionOutcome::Failed(reason) => format!(
            "⚠️ {} mencapai {}/{} peringatan.\n{}",
            mention(user),
            count,
            WARN_LIMIT,
            failure_hint(&reason)
        ),
    }))
}

/// Handle /resetwarn.
pub async fn resetwarn_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let (user, _) = target(input, args)?;
    state.warns.reset(input.chat, user).await?;
    Ok(Reply::Html(format!("✅ Peringatan {} direset.", mention(user))))
}

/// Handle /warnings. Without a target it shows the sender's own count.
pub async fn warnings_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let user = match resolve_target(input.reply_sender(), args) {
        Some((user, _)) => Some(user),
        None if args.trim().is_empty() => input.sender,
        None => None,
    }
    .ok_or_else(|| CommandError::usage(TARGET_USAGE))?;

    let count = state.warns.get(input.chat, user).await?;
    Ok(Reply::Html(format!(
        "{} memiliki {}/{} peringatan.",
        mention(user),
        count,
        WARN_LIMIT
    )))
}
