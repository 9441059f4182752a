//! Command message cleanup.

use super::ids::ChatKind;

/// Whether a processed command message should be removed.
///
/// Only called after the command has finished with the message.
pub fn should_delete_command_message(chat: ChatKind, auto_delete_enabled: bool) -> bool {
    auto_delete_enabled && chat != ChatKind::Private
}

/// Any message starting with `/` counts as a command, known or not.
pub fn is_command(text: &str) -> bool {
    text.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_chats_never_delete() {
        assert!(!should_delete_command_message(ChatKind::Private, true));
        assert!(!should_delete_command_message(ChatKind::Private, false));
    }

    #[test]
    fn test_groups_follow_the_toggle() {
        for kind in [ChatKind::Group, ChatKind::Supergroup, ChatKind::Channel] {
            assert!(should_delete_command_message(kind, true));
            assert!(!should_delete_command_message(kind, false));
        }
    }

    #[test]
    fn test_is_command() {
        assert!(is_command("/warn"));
        assert!(is_command("/unknowncmd@somebot arg"));
        assert!(!is_command("hello /warn"));
        assert!(!is_command(""));
    }
}
