//! Owner-only commands: /owner and /leave.

use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::moderation::{ActionOutcome, CommandError};

use super::warn::failure_hint;
use super::{CommandInput, Reply};

pub fn owner_command() -> Reply {
    Reply::text("Kamu owner bot.")
}

/// Make the bot leave the chat. Nothing is sent on success.
pub async fn leave_command(state: &AppState, input: &CommandInput) -> Result<Reply, CommandError> {
    match ActionOutcome::from(state.actuator.leave_chat(input.chat).await) {
        ActionOutcome::Done => {
            info!("Left chat {} on owner request", input.chat);
            Ok(Reply::Nothing)
        }
        ActionOutcome::Failed(reason) => Ok(Reply::Html(failure_hint(&reason))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::testing::Call;
    use crate::plugins::fixtures::*;
    use crate::plugins::{execute, Command};

    #[tokio::test]
    async fn test_owner_leaves() {
        let h = harness();
        let reply = execute(&h.state, Command::Leave, &input(OWNER)).await.unwrap();
        assert_eq!(reply, Reply::Nothing);
        assert_eq!(h.actuator.calls(), vec![Call::Leave(CHAT)]);
    }

    #[tokio::test]
    async fn test_admin_cannot_make_bot_leave() {
        let h = harness();
        assert!(execute(&h.state, Command::Leave, &input(ADMIN)).await.is_err());
        assert!(h.actuator.calls().is_empty());
    }
}
