//! Help command plugin.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::dispatcher::AppState;
use crate::utils::html_escape;

use super::panel::{Page, PanelAction};
use super::Reply;

const COMMANDS: &str = "\
<b>Admin</b>
/antilink, /lockmedia, /antiflood, /autodelcmd, /welcome <code>on|off</code>
/setflood <code>&lt;pesan&gt; &lt;detik&gt;</code>
/setrules, /setwelcome <code>&lt;teks&gt;</code> atau reply
/warn, /resetwarn, /ban, /kick, /unmute <code>&lt;reply|id&gt;</code>
/mute <code>&lt;reply|id&gt; [10m|2h|1d]</code>
/purge <code>&lt;reply|jumlah&gt;</code>

<b>Semua member</b>
/rules, /warnings, /ping";

pub fn help_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("⚙️ Panel", PanelAction::Show(Page::Main).encode()),
        InlineKeyboardButton::callback("📜 Rules", PanelAction::Show(Page::Rules).encode()),
    ]])
}

/// Handle /help command.
pub fn help_command(state: &AppState) -> Reply {
    Reply::Markup {
        html: format!(
            "🛡️ <b>{}</b>\n\nGunakan /panel untuk admin settings.\n\n{}",
            html_escape(&state.bot_name),
            COMMANDS
        ),
        keyboard: help_keyboard(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::fixtures::harness;

    #[test]
    fn test_help_names_bot_and_links_panel() {
        let h = harness();
        let Reply::Markup { html, keyboard } = help_command(&h.state) else {
            panic!("help should carry a keyboard");
        };
        assert!(html.starts_with("🛡️ <b>Erlandi Security</b>"));
        assert!(html.contains("/panel"));

        let buttons = &keyboard.inline_keyboard[0];
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].text, "⚙️ Panel");
        assert_eq!(buttons[1].text, "📜 Rules");
    }
}
