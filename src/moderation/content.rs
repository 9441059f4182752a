//! Content classifiers: links and restricted media.

use std::sync::LazyLock;

use regex::Regex;
use teloxide::types::Message;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://|t\.me/|www\.)").expect("link pattern is valid")
});

/// True if the text contains `http://`, `https://`, `t.me/` or `www.`
/// anywhere, in any letter case.
pub fn is_link_content(text: &str) -> bool {
    LINK_PATTERN.is_match(text)
}

/// Media kinds blocked by lockmedia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Document,
    Audio,
    Voice,
    Animation,
    Sticker,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Voice => "voice",
            Self::Animation => "animation",
            Self::Sticker => "sticker",
        }
    }
}

/// Restricted media attached to a Telegram message, if any.
pub fn media_kind(msg: &Message) -> Option<MediaKind> {
    if msg.animation().is_some() {
        Some(MediaKind::Animation)
    } else if msg.photo().is_some() {
        Some(MediaKind::Photo)
    } else if msg.video().is_some() {
        Some(MediaKind::Video)
    } else if msg.document().is_some() {
        Some(MediaKind::Document)
    } else if msg.audio().is_some() {
        Some(MediaKind::Audio)
    } else if msg.voice().is_some() {
        Some(MediaKind::Voice)
    } else if msg.sticker().is_some() {
        Some(MediaKind::Sticker)
    } else {
        None
    }
}

/// Text a filter should look at: the message text, or the media caption.
pub fn text_of(msg: &Message) -> Option<&str> {
    msg.text().or_else(|| msg.caption())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_every_link_marker_anywhere() {
        let markers = ["http://", "https://", "t.me/", "www."];
        for marker in markers {
            for text in [
                format!("{marker}example"),
                format!("look: {marker}x.y now"),
                format!("trailing {marker}"),
                format!("{}", marker.to_uppercase()),
            ] {
                assert!(is_link_content(&text), "{text:?}");
            }
        }
    }

    #[test]
    fn test_mixed_case_links() {
        assert!(is_link_content("HtTpS://Example.com"));
        assert!(is_link_content("join T.ME/somegroup"));
        assert!(is_link_content("WwW.site.org"));
    }

    #[test]
    fn test_plain_text_is_not_a_link() {
        for text in [
            "",
            "hello world",
            "http:/broken",
            "https:example",
            "t.m/e",
            "wwwdot",
            "ftp://files.example",
            "example.com",
        ] {
            assert!(!is_link_content(text), "{text:?}");
        }
    }

    #[test]
    fn test_media_kind_names() {
        assert_eq!(MediaKind::Sticker.as_str(), "sticker");
        assert_eq!(MediaKind::Animation.as_str(), "animation");
    }
}
