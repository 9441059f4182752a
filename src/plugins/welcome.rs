//! /setwelcome and welcome text rendering.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::bot::dispatcher::AppState;
use crate::moderation::CommandError;
use crate::utils::html_escape;

use super::rules::text_argument;
use super::{CommandInput, Reply};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(name|username|id|chat)\}").expect("placeholder pattern is valid")
});

pub const DEFAULT_WELCOME: &str = "👋 Selamat datang {name} di {chat}!";

/// The user a welcome is rendered for.
#[derive(Debug, Clone)]
pub struct Newcomer<'a> {
    pub id: u64,
    pub first_name: &'a str,
    pub username: Option<&'a str>,
}

/// Fill in a welcome template.
///
/// Placeholders:
/// - `{name}` - first name
/// - `{username}` - @username, or the first name
/// - `{id}` - user id
/// - `{chat}` - chat title
///
/// The template is plain text: it is HTML escaped along with every value.
/// Placeholders are filled in a single pass, so a value that looks like a
/// placeholder stays literal.
pub fn render_welcome(template: &str, user: &Newcomer<'_>, chat_title: &str) -> String {
    let username = crate::utils::format_username(user.username, user.first_name);

    PLACEHOLDER
        .replace_all(&html_escape(template), |caps: &Captures<'_>| match &caps[1] {
            "name" => html_escape(user.first_name),
            "username" => html_escape(&username),
            "id" => user.id.to_string(),
            _ => html_escape(chat_title),
        })
        .into_owned()
}

pub async fn setwelcome_command(
    state: &AppState,
    input: &CommandInput,
    args: &str,
) -> Result<Reply, CommandError> {
    let text = text_argument(input, args).ok_or_else(|| {
        CommandError::usage(
            "Reply ke pesan berisi teks welcome, atau: /setwelcome <teks>\n\
             Placeholder: {name} {username} {id} {chat}",
        )
    })?;

    state.settings.set_welcome_template(input.chat, &text).await?;
    Ok(Reply::text("✅ Pesan welcome disimpan."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::fixtures::*;

    #[test]
    fn test_render_all_placeholders() {
        let user = Newcomer {
            id: 77,
            first_name: "Ana",
            username: Some("ana_k"),
        };
        assert_eq!(
            render_welcome("Hi {name} ({username}, {id}) in {chat}", &user, "Kopi & Kode"),
            "Hi Ana (@ana_k, 77) in Kopi &amp; Kode"
        );
    }

    #[test]
    fn test_username_falls_back_to_name() {
        let user = Newcomer {
            id: 1,
            first_name: "<b>Bo</b>",
            username: None,
        };
        assert_eq!(
            render_welcome("{username}", &user, "x"),
            "&lt;b&gt;Bo&lt;/b&gt;"
        );
    }

    #[test]
    fn test_values_are_not_substituted_again() {
        let user = Newcomer {
            id: 5,
            first_name: "{chat}",
            username: None,
        };
        assert_eq!(
            render_welcome("Hi {name} in {chat}", &user, "{id}"),
            "Hi {chat} in {id}"
        );
    }

    #[test]
    fn test_template_markup_is_escaped() {
        let user = Newcomer {
            id: 5,
            first_name: "Ana",
            username: None,
        };
        assert_eq!(
            render_welcome("We <3 {name} & {unknown}", &user, "x"),
            "We &lt;3 Ana &amp; {unknown}"
        );
    }

    #[tokio::test]
    async fn test_setwelcome_stores_template() {
        let h = harness();
        setwelcome_command(&h.state, &input(ADMIN), "Halo {name}!").await.unwrap();
        let config = h.state.settings.load(CHAT).await.unwrap();
        assert_eq!(config.welcome_template.as_deref(), Some("Halo {name}!"));
    }
}
