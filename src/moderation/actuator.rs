//! Enforcement port.
//!
//! The core decides what to do; an [`Actuator`] does it against the chat
//! platform and reports back.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::ids::{ChatRef, MessageRef, UserRef};

#[derive(Debug, Clone, Error)]
pub enum ActuatorError {
    /// The platform refused, usually for lack of rights.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Network or API failure.
    #[error("api error: {0}")]
    Api(String),
}

/// Result of a best-effort enforcement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    Failed(String),
}

impl ActionOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl<T> From<Result<T, ActuatorError>> for ActionOutcome {
    fn from(result: Result<T, ActuatorError>) -> Self {
        match result {
            Ok(_) => Self::Done,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "done"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

#[async_trait]
pub trait Actuator: Send + Sync {
    async fn delete_message(&self, chat: ChatRef, message: MessageRef) -> Result<(), ActuatorError>;

    /// Delete several messages; returns how many were deleted.
    async fn delete_messages(&self, chat: ChatRef, messages: &[MessageRef]) -> usize;

    /// Revoke all send rights for `duration`.
    async fn mute(&self, chat: ChatRef, user: UserRef, duration: Duration) -> Result<(), ActuatorError>;

    async fn unmute(&self, chat: ChatRef, user: UserRef) -> Result<(), ActuatorError>;

    async fn ban(&self, chat: ChatRef, user: UserRef) -> Result<(), ActuatorError>;

    /// Remove without a lasting ban.
    async fn kick(&self, chat: ChatRef, user: UserRef) -> Result<(), ActuatorError>;

    async fn leave_chat(&self, chat: ChatRef) -> Result<(), ActuatorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(ActionOutcome::from(Ok::<(), ActuatorError>(())), ActionOutcome::Done);
        let failed = ActionOutcome::from(Err::<(), _>(ActuatorError::Forbidden("not enough rights".into())));
        assert_eq!(failed, ActionOutcome::Failed("forbidden: not enough rights".into()));
        assert!(!failed.is_done());
        assert_eq!(failed.to_string(), "failed: forbidden: not enough rights");
    }
}
