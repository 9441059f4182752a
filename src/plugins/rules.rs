//! /rules and /setrules.

use crate::bot::dispatcher::AppState;
use crate::moderation::CommandError;
use crate::utils::html_escape;

use super::{CommandInput, Reply};

pub const NO_RULES: &str = "Belum ada peraturan untuk grup ini.";

/// Rules message for a chat.
pub fn render_rules(rules: Option<&str>) -> Reply {
    match rules {
        Some(text) => Reply::Html(format!("📜 <b>Peraturan grup</b>\n\n{}", html_escape(text))),
        None => Reply::text(NO_RULES),
    }
}

pub async fn rules_command(state: &AppState, input: &CommandInput) -> Result<Reply, CommandError> {
    let rules = state.settings.rules(input.chat).await?;
    Ok(render_rules(rules.as_deref()))
}

/// Text a /setrules or /setwelcome command stores: the replied-to text,
/// otherwise the inline argument.
pub fn text_argument(input: &CommandInput, args: &str) -> Option<String> {
    input
        .reply_to
        .as_ref()
        .and_then(|reply| reply.text.as_deref())
        .or(Some(args))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

pub async fn setrules_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let text = text_argument(input, args).ok_or_else(|| {
        CommandError::usage("Reply ke pesan berisi peraturan, atau: /setrules <teks>")
    })?;

    state.settings.set_rules(input.chat, &text).await?;
    Ok(Reply::text("✅ Peraturan disimpan."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::fixtures::*;

    #[tokio::test]
    async fn test_rules_from_reply() {
        let h = harness();
        let cmd = replying(ADMIN, MEMBER, "1. No spam\n2. Be <nice>");
        setrules_command(&h.state, &cmd, "").await.unwrap();

        let reply = rules_command(&h.state, &input(MEMBER)).await.unwrap();
        assert_eq!(
            reply,
            Reply::Html("📜 <b>Peraturan grup</b>\n\n1. No spam\n2. Be &lt;nice&gt;".into())
        );
    }

    #[tokio::test]
    async fn test_rules_inline_text() {
        let h = harness();
        setrules_command(&h.state, &input(ADMIN), "  Be kind ").await.unwrap();
        assert_eq!(
            h.state.settings.rules(CHAT).await.unwrap().as_deref(),
            Some("Be kind")
        );
    }

    #[tokio::test]
    async fn test_setrules_needs_text() {
        let h = harness();
        assert!(matches!(
            setrules_command(&h.state, &input(ADMIN), " ").await,
            Err(CommandError::Usage(_))
        ));
    }

    #[tokio::test]
    async fn test_no_rules_notice() {
        let h = harness();
        let reply = rules_command(&h.state, &input(MEMBER)).await.unwrap();
        assert_eq!(reply, Reply::text(NO_RULES));
    }
}
