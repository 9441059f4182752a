//! /setflood - flood guard limits.

use crate::bot::dispatcher::AppState;
use crate::moderation::settings::{
    FLOOD_LIMIT_MAX, FLOOD_LIMIT_MIN, FLOOD_WINDOW_MAX, FLOOD_WINDOW_MIN,
};
use crate::moderation::{CommandError, FloodLimits};

use super::{CommandInput, Reply};

fn usage() -> String {
    format!(
        "Format: /setflood <limit> <detik>\nLimit {}-{}, window {}-{} detik.",
        FLOOD_LIMIT_MIN, FLOOD_LIMIT_MAX, FLOOD_WINDOW_MIN, FLOOD_WINDOW_MAX
    )
}

pub async fn setflood_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [limit, window] = parts.as_slice() else {
        return Err(CommandError::Usage(usage()));
    };

    let limits = FloodLimits::parse(limit, window)
        .map_err(|e| CommandError::Usage(format!("❌ {}\n{}", e, usage())))?;
    state.settings.set_flood(input.chat, limits).await?;

    Ok(Reply::Text(format!(
        "✅ AntiFlood: maksimal {} pesan per {} detik.",
        limits.limit, limits.window_secs
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::fixtures::*;

    #[tokio::test]
    async fn test_setflood_rejects_values_under_minimum() {
        let h = harness();
        for args in ["1 10", "6 2"] {
            let result = setflood_command(&h.state, &input(ADMIN), args).await;
            assert!(matches!(result, Err(CommandError::Usage(_))), "{args}");
        }
        let config = h.state.settings.load(CHAT).await.unwrap();
        assert_eq!((config.flood_limit, config.flood_window_secs), (6, 10));
    }

    #[tokio::test]
    async fn test_setflood_clamps_upper_bounds() {
        let h = harness();
        let reply = setflood_command(&h.state, &input(ADMIN), "50 90").await.unwrap();
        assert_eq!(
            reply,
            Reply::text("✅ AntiFlood: maksimal 20 pesan per 60 detik.")
        );
        let config = h.state.settings.load(CHAT).await.unwrap();
        assert_eq!((config.flood_limit, config.flood_window_secs), (20, 60));
    }

    #[tokio::test]
    async fn test_setflood_needs_two_arguments() {
        let h = harness();
        for args in ["", "6", "6 10 3"] {
            assert!(setflood_command(&h.state, &input(ADMIN), args).await.is_err());
        }
    }
}
