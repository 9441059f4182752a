//! Settings panel: `/panel` and its inline buttons.
//!
//! Button data is a [`PanelAction`] encoded as `panel:<token>`. Anything
//! else arriving on the callback branch is ignored.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use tracing::debug;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::moderation::settings::on_off;
use crate::moderation::{ChatConfig, ChatRef, CommandError, Role, Toggle, UserRef};
use crate::store::StoreError;

use super::rules::render_rules;
use super::{respond, CommandInput, Reply, STORE_FAILURE};

const PREFIX: &str = "panel:";
const TITLE: &str = "Panel Settings:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Main,
    Rules,
}

/// What a panel button asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Toggle(Toggle),
    Show(Page),
}

impl PanelAction {
    pub fn encode(self) -> String {
        let token = match self {
            Self::Toggle(toggle) => toggle.token(),
            Self::Show(Page::Main) => "main",
            Self::Show(Page::Rules) => "rules",
        };
        format!("{PREFIX}{token}")
    }

    pub fn decode(data: &str) -> Option<Self> {
        match data.strip_prefix(PREFIX)? {
            "main" => Some(Self::Show(Page::Main)),
            "rules" => Some(Self::Show(Page::Rules)),
            token => Toggle::from_token(token).map(Self::Toggle),
        }
    }

    /// Rules are public; everything else needs an admin.
    fn required_role(self) -> Role {
        match self {
            Self::Show(Page::Rules) => Role::Member,
            _ => Role::Admin,
        }
    }
}

/// Result of a button press, before anything is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelUpdate {
    Denied,
    Toggled {
        toggle: Toggle,
        enabled: bool,
        config: ChatConfig,
    },
    ShowPanel(ChatConfig),
    ShowRules(Option<String>),
}

/// Keyboard with one button per toggle showing its current state.
pub fn panel_keyboard(config: &ChatConfig) -> InlineKeyboardMarkup {
    let rows = Toggle::ALL.into_iter().map(|toggle| {
        vec![InlineKeyboardButton::callback(
            format!("{}: {}", toggle.label(), on_off(config.toggle(toggle))),
            PanelAction::Toggle(toggle).encode(),
        )]
    });
    InlineKeyboardMarkup::new(rows)
}

/// Apply a button press for `user` in `chat`.
pub async fn apply(
    state: &AppState,
    chat: ChatRef,
    user: UserRef,
    action: PanelAction,
) -> Result<PanelUpdate, StoreError> {
    let role = action.required_role();
    if role != Role::Member && !state.gate.authorize(role, chat, user).await {
        return Ok(PanelUpdate::Denied);
    }

    Ok(match action {
        PanelAction::Toggle(toggle) => {
            let enabled = state.settings.flip_toggle(chat, toggle).await?;
            debug!("Panel toggle {:?} pressed by {} in chat {}", toggle, user, chat);
            PanelUpdate::Toggled {
                toggle,
                enabled,
                config: state.settings.load(chat).await?,
            }
        }
        PanelAction::Show(Page::Main) => PanelUpdate::ShowPanel(state.settings.load(chat).await?),
        PanelAction::Show(Page::Rules) => PanelUpdate::ShowRules(state.settings.rules(chat).await?),
    })
}

/// Handle /panel command.
pub async fn panel_command(state: &AppState, input: &CommandInput) -> Result<Reply, CommandError> {
    let config = state.settings.load(input.chat).await?;
    Ok(Reply::Markup {
        html: TITLE.to_string(),
        keyboard: panel_keyboard(&config),
    })
}

/// Handle panel callback queries (panel:*).
pub async fn callback_handler(
    bot: ThrottledBot,
    q: CallbackQuery,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(action) = q.data.as_deref().and_then(PanelAction::decode) else {
        debug!("Ignoring callback data {:?}", q.data);
        return Ok(());
    };
    let Some(message) = &q.message else {
        bot.answer_callback_query(&q.id).await?;
        return Ok(());
    };

    let chat_id = message.chat().id;
    let update = match apply(&state, chat_id.into(), q.from.id.into(), action).await {
        Ok(update) => update,
        Err(e) => {
            bot.answer_callback_query(&q.id)
                .text(STORE_FAILURE)
                .show_alert(true)
                .await?;
            return Err(e.into());
        }
    };

    match update {
        PanelUpdate::Denied => {
            bot.answer_callback_query(&q.id)
                .text(Role::Admin.denial())
                .show_alert(true)
                .await?;
        }
        PanelUpdate::Toggled { config, .. } | PanelUpdate::ShowPanel(config) => {
            bot.answer_callback_query(&q.id).await?;
            // Telegram rejects an edit that changes nothing; that is fine here.
            if let Err(e) = bot
                .edit_message_text(chat_id, message.id(), TITLE)
                .parse_mode(ParseMode::Html)
                .reply_markup(panel_keyboard(&config))
                .await
            {
                debug!("Panel edit in {} skipped: {}", chat_id, e);
            }
        }
        PanelUpdate::ShowRules(rules) => {
            bot.answer_callback_query(&q.id).await?;
            respond(&bot, chat_id, message.id(), render_rules(rules.as_deref())).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::fixtures::*;

    #[test]
    fn test_action_encoding() {
        for toggle in Toggle::ALL {
            let action = PanelAction::Toggle(toggle);
            assert_eq!(PanelAction::decode(&action.encode()), Some(action));
        }
        assert_eq!(PanelAction::Show(Page::Main).encode(), "panel:main");
        assert_eq!(PanelAction::decode("panel:rules"), Some(PanelAction::Show(Page::Rules)));
        assert_eq!(PanelAction::decode("panel:nope"), None);
        assert_eq!(PanelAction::decode("help:main"), None);
    }

    #[test]
    fn test_keyboard_shows_state() {
        let config = ChatConfig {
            antilink_enabled: true,
            ..ChatConfig::default()
        };
        let keyboard = panel_keyboard(&config);
        assert_eq!(keyboard.inline_keyboard.len(), Toggle::ALL.len());
        assert_eq!(keyboard.inline_keyboard[0][0].text, "AntiLink: ON");
        assert_eq!(keyboard.inline_keyboard[1][0].text, "LockMedia: OFF");
    }

    #[tokio::test]
    async fn test_admin_toggles() {
        let h = harness();
        let action = PanelAction::Toggle(Toggle::Lockmedia);

        let update = apply(&h.state, CHAT, ADMIN, action).await.unwrap();
        assert!(matches!(
            update,
            PanelUpdate::Toggled { toggle: Toggle::Lockmedia, enabled: true, ref config }
                if config.lockmedia_enabled
        ));

        let update = apply(&h.state, CHAT, ADMIN, action).await.unwrap();
        assert!(matches!(update, PanelUpdate::Toggled { enabled: false, .. }));
    }

    #[tokio::test]
    async fn test_member_cannot_toggle() {
        let h = harness();
        let update = apply(&h.state, CHAT, MEMBER, PanelAction::Toggle(Toggle::Antilink))
            .await
            .unwrap();
        assert_eq!(update, PanelUpdate::Denied);
        assert!(!h.state.settings.load(CHAT).await.unwrap().antilink_enabled);
    }

    #[tokio::test]
    async fn test_unknown_clicker_is_denied() {
        let h = harness();
        let update = apply(&h.state, CHAT, UserRef(999), PanelAction::Show(Page::Main))
            .await
            .unwrap();
        assert_eq!(update, PanelUpdate::Denied);
    }

    #[tokio::test]
    async fn test_rules_page_is_public() {
        let h = harness();
        h.state.settings.set_rules(CHAT, "Be nice").await.unwrap();
        let update = apply(&h.state, CHAT, MEMBER, PanelAction::Show(Page::Rules))
            .await
            .unwrap();
        assert_eq!(update, PanelUpdate::ShowRules(Some("Be nice".into())));
    }

    #[tokio::test]
    async fn test_panel_command_markup() {
        let h = harness();
        let reply = panel_command(&h.state, &input(ADMIN)).await.unwrap();
        assert!(matches!(reply, Reply::Markup { ref html, .. } if html == TITLE));
    }
}
