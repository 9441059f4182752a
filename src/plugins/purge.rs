//! Purge command handler.
//!
//! - `/purge <n>` deletes the n messages before the command
//! - `/purge` as a reply deletes from the replied message up to the command
//!
//! Either way at most [`PURGE_MAX`] messages go per invocation.

use crate::bot::dispatcher::AppState;
use crate::moderation::{CommandError, MessageRef};

use super::{CommandInput, Reply};

pub const PURGE_MAX: i32 = 100;

const USAGE: &str = "Reply ke pesan untuk memulai purge, atau: /purge <jumlah>";

/// Message ids a purge removes, oldest first. The command itself is not
/// included.
pub fn purge_range(
    invoking: MessageRef,
    reply: Option<MessageRef>,
    args: &str,
) -> Result<Vec<MessageRef>, CommandError> {
    let start = match args.split_whitespace().next() {
        Some(raw) => {
            let count: i32 = raw.parse().map_err(|_| CommandError::usage(USAGE))?;
            if count < 1 {
                return Err(CommandError::usage(USAGE));
            }
            invoking.0 - count.min(PURGE_MAX)
        }
        None => {
            let reply = reply.ok_or_else(|| CommandError::usage(USAGE))?;
            reply.0.max(invoking.0 - PURGE_MAX)
        }
    };

    Ok((start.max(1)..invoking.0).map(MessageRef).collect())
}

/// Handle /purge command.
pub async fn purge_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let reply = input.reply_to.as_ref().map(|reply| reply.message);
    let ids = purge_range(input.message, reply, args)?;

    let deleted = state.actuator.delete_messages(input.chat, &ids).await;
    Ok(Reply::Ephemeral(format!("✅ Berhasil menghapus {} pesan.", deleted)))
}
