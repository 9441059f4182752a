//! On/off switches: /antilink, /lockmedia, /autodelcmd, /antiflood, /welcome.

use crate::bot::dispatcher::AppState;
use crate::moderation::settings::on_off;
use crate::moderation::{CommandError, Toggle};

use super::{CommandInput, Reply};

/// Parse an `on`/`off` argument.
fn parse_switch(arg: &str) -> Option<bool> {
    match arg.trim().to_lowercase().as_str() {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

fn command_name(toggle: Toggle) -> &'static str {
    match toggle {
        Toggle::Welcome => "welcome",
        Toggle::Antilink => "antilink",
        Toggle::Lockmedia => "lockmedia",
        Toggle::AutoDeleteCommands => "autodelcmd",
        Toggle::Antiflood => "antiflood",
    }
}

/// Set a toggle, or show its state when no argument is given.
pub async fn toggle_command(
    state: &AppState,
    input: &CommandInput,
    toggle: Toggle,
    args: &str,
) -> Result<Reply, CommandError> {
    let usage = format!("Format: /{} on|off", command_name(toggle));

    if args.trim().is_empty() {
        let enabled = state.settings.get_toggle(input.chat, toggle).await?;
        return Ok(Reply::Text(format!(
            "{}: {}\n{}",
            toggle.label(),
            on_off(enabled),
            usage
        )));
    }

    let enabled = parse_switch(args).ok_or_else(|| CommandError::Usage(usage))?;
    state.settings.set_toggle(input.chat, toggle, enabled).await?;

    Ok(Reply::Text(format!("✅ {} {}", toggle.label(), on_off(enabled))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::fixtures::*;

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("on"), Some(true));
        assert_eq!(parse_switch(" OFF "), Some(false));
        assert_eq!(parse_switch("yes"), None);
    }

    #[tokio::test]
    async fn test_toggle_on_and_off() {
        let h = harness();
        let reply = toggle_command(&h.state, &input(ADMIN), Toggle::Antilink, "on")
            .await
            .unwrap();
        assert_eq!(reply, Reply::text("✅ AntiLink ON"));
        assert!(h.state.settings.load(CHAT).await.unwrap().antilink_enabled);

        toggle_command(&h.state, &input(ADMIN), Toggle::Antilink, "off")
            .await
            .unwrap();
        assert!(!h.state.settings.load(CHAT).await.unwrap().antilink_enabled);
    }

    #[tokio::test]
    async fn test_bad_argument_changes_nothing() {
        let h = harness();
        let result = toggle_command(&h.state, &input(ADMIN), Toggle::AutoDeleteCommands, "maybe").await;
        assert!(matches!(result, Err(CommandError::Usage(u)) if u == "Format: /autodelcmd on|off"));
        assert!(h.state.settings.load(CHAT).await.unwrap().auto_delete_commands_enabled);
    }

    #[tokio::test]
    async fn test_no_argument_shows_state() {
        let h = harness();
        let reply = toggle_command(&h.state, &input(ADMIN), Toggle::Antiflood, "")
            .await
            .unwrap();
        assert_eq!(reply, Reply::text("AntiFlood: ON\nFormat: /antiflood on|off"));
    }
}
