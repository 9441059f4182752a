//! Ban management commands.
//!
//! Commands for banning and kicking users.

use crate::bot::dispatcher::AppState;
use crate::moderation::{ActionOutcome, CommandError};

use super::warn::{failure_hint, mention, target};
use super::{CommandInput, Reply};

/// Handle /ban command.
pub async fn ban_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let (user, _) = target(input, args)?;
    let outcome = ActionOutcome::from(state.actuator.ban(input.chat, user).await);
    state.gate.forget(input.chat, user);

    Ok(Reply::Html(match outcome {
        ActionOutcome::Done => format!("🔨 {} di-ban.", mention(user)),
        ActionOutcome::Failed(reason) => failure_hint(&reason),
    }))
}

/// Handle /kick command.
pub async fn kick_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let (user, _) = target(input, args)?;
    let outcome = ActionOutcome::from(state.actuator.kick(input.chat, user).await);
    state.gate.forget(input.chat, user);

    Ok(Reply::Html(match outcome {
        ActionOutcome::Done => format!("👢 {} dikeluarkan.", mention(user)),
        ActionOutcome::Failed(reason) => failure_hint(&reason),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::testing::{Call, RecordingActuator};
    use crate::plugins::fixtures::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ban_reply_target() {
        let h = harness();
        let reply = ban_command(&h.state, &replying(ADMIN, MEMBER, "hi"), "").await.unwrap();
        assert_eq!(h.actuator.calls(), vec![Call::Ban(MEMBER)]);
        assert_eq!(
            reply,
            Reply::Html("🔨 <a href=\"tg://user?id=3\">3</a> di-ban.".into())
        );
    }

    #[tokio::test]
    async fn test_kick_by_id() {
        let h = harness();
        kick_command(&h.state, &input(ADMIN), "12345").await.unwrap();
        assert_eq!(h.actuator.calls(), vec![Call::Kick(crate::moderation::UserRef(12345))]);
    }

    #[tokio::test]
    async fn test_failed_ban_gives_permission_hint() {
        let h = harness_with(Arc::new(MemoryStore::new()), RecordingActuator::failing());
        let reply = ban_command(&h.state, &input(ADMIN), "3").await.unwrap();
        assert!(matches!(reply, Reply::Html(text) if text.starts_with("❌ Gagal")));
    }
}
