//! Moderation core.
//!
//! Transport-free: everything here talks to the outside world through
//! three ports, [`ConfigStore`](crate::store::ConfigStore),
//! [`Actuator`] and [`MemberLookup`].
//!
//! - `settings` - per-chat configuration
//! - `flood` - sliding-window rate limiter
//! - `content` - link and media classifiers
//! - `warns` - warning ledger
//! - `hygiene` - command message cleanup
//! - `pipeline` - ordered checks for each inbound message
//! - `auth` - role checks for commands

pub mod actuator;
pub mod auth;
pub mod content;
pub mod error;
pub mod flood;
pub mod hygiene;
pub mod ids;
pub mod keys;
pub mod pipeline;
pub mod settings;
pub mod warns;

#[cfg(test)]
pub mod testing;

pub use actuator::{ActionOutcome, Actuator, ActuatorError};
pub use auth::{AdminGate, LookupError, MemberLookup, MemberStatus, Role};
pub use error::CommandError;
pub use flood::FloodGuard;
pub use ids::{ChatKind, ChatRef, MessageRef, UserRef};
pub use keys::Toggle;
pub use pipeline::{InboundMessage, ModerationPipeline, Verdict};
pub use settings::{ChatConfig, ChatSettings, FloodLimits};
pub use warns::WarnLedger;
