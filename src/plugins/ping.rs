//! Ping command plugin.

use super::Reply;

/// Handle the /ping command.
pub fn ping_command() -> Reply {
    Reply::text("Pong! Bot aktif.")
}
