//! Mute management commands.
//!
//! `/mute <target> [duration]` with duration `<n>m`, `<n>h` or `<n>d`;
//! 10 minutes when missing or invalid.

use crate::bot::dispatcher::AppState;
use crate::moderation::{ActionOutcome, CommandError};
use crate::utils::{format_duration, parse_mute_duration, PERMANENT_MUTE};

use super::warn::{failure_hint, mention, target};
use super::{CommandInput, Reply};

/// Handle /mute command.
pub async fn mute_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let (user, skip) = target(input, args)?;
    let duration = parse_mute_duration(args.split_whitespace().nth(skip));

    let outcome = ActionOutcome::from(state.actuator.mute(input.chat, user, duration).await);
    Ok(Reply::Html(match outcome {
        ActionOutcome::Done if duration > PERMANENT_MUTE => {
            format!("🔇 {} di-mute permanen.", mention(user))
        }
        ActionOutcome::Done => format!(
            "🔇 {} di-mute selama {}.",
            mention(user),
            format_duration(duration)
        ),
        ActionOutcome::Failed(reason) => failure_hint(&reason),
    }))
}

/// Handle /unmute command.
pub async fn unmute_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let (user, _) = target(input, args)?;

    let outcome = ActionOutcome::from(state.actuator.unmute(input.chat, user).await);
    Ok(Reply::Html(match outcome {
        ActionOutcome::Done => format!("🔊 {} di-unmute.", mention(user)),
        ActionOutcome::Failed(reason) => failure_hint(&reason),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::testing::Call;
    use crate::plugins::fixtures::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_mute_with_duration_after_id() {
        let h = harness();
        let reply = mute_command(&h.state, &input(ADMIN), "3 2h").await.unwrap();
        assert_eq!(
            h.actuator.calls(),
            vec![Call::Mute(MEMBER, Duration::from_secs(7200))]
        );
        assert!(matches!(reply, Reply::Html(text) if text.contains("2 jam")));
    }

    #[tokio::test]
    async fn test_mute_reply_defaults_to_ten_minutes() {
        let h = harness();
        mute_command(&h.state, &replying(ADMIN, MEMBER, "x"), "").await.unwrap();
        mute_command(&h.state, &replying(ADMIN, MEMBER, "x"), "forever").await.unwrap();
        assert_eq!(
            h.actuator.calls(),
            vec![
                Call::Mute(MEMBER, Duration::from_secs(600)),
                Call::Mute(MEMBER, Duration::from_secs(600)),
            ]
        );
    }

    #[tokio::test]
    async fn test_mute_reply_with_duration() {
        let h = harness();
        mute_command(&h.state, &replying(ADMIN, MEMBER, "x"), "1d").await.unwrap();
        assert_eq!(
            h.actuator.calls(),
            vec![Call::Mute(MEMBER, Duration::from_secs(86400))]
        );
    }

    #[tokio::test]
    async fn test_oversized_mute_is_reported_permanent() {
        let h = harness();
        let reply = mute_command(&h.state, &input(ADMIN), "3 1000000000d").await.unwrap();
        assert_eq!(
            h.actuator.calls(),
            vec![Call::Mute(MEMBER, Duration::from_secs(86_400_000_000_000))]
        );
        assert!(matches!(reply, Reply::Html(text) if text.ends_with("di-mute permanen.")));
    }

    #[tokio::test]
    async fn test_unmute() {
        let h = harness();
        unmute_command(&h.state, &input(ADMIN), "3").await.unwrap();
        assert_eq!(h.actuator.calls(), vec![Call::Unmute(MEMBER)]);
    }
}
