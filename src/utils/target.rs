//! Target resolution for user commands.

use crate::moderation::UserRef;

/// Resolve the user a command acts on.
///
/// Resolution order:
/// 1. Sender of the replied-to message
/// 2. Numeric id as the first argument
///
/// Returns the target and how many argument words it consumed.
pub fn resolve_target(reply_sender: Option<UserRef>, args: &str) -> Option<(UserRef, usize)> {
    if let Some(user) = reply_sender {
        return Some((user, 0));
    }

    let first = args.split_whitespace().next()?;
    first.parse::<UserRef>().ok().map(|user| (user, 1))
}
