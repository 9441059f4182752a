//! Authorization for commands and panel callbacks.
//!
//! Admin status comes from a [`MemberLookup`]. When the lookup fails the
//! requester is treated as unverified and denied.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use super::ids::{ChatRef, UserRef};

/// Role a command requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    Admin,
    Owner,
}

impl Role {
    /// Reply shown when the requester lacks this role.
    pub fn denial(self) -> &'static str {
        match self {
            Self::Member => "",
            Self::Admin => "Admin only.",
            Self::Owner => "Owner only.",
        }
    }
}

/// Membership status of a user in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberStatus {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Creator | Self::Administrator)
    }
}

#[derive(Debug, Clone, Error)]
#[error("member lookup failed: {0}")]
pub struct LookupError(pub String);

#[async_trait]
pub trait MemberLookup: Send + Sync {
    async fn status(&self, chat: ChatRef, user: UserRef) -> Result<MemberStatus, LookupError>;

    /// Drop any cached status for this user.
    fn forget(&self, _chat: ChatRef, _user: UserRef) {}
}

/// Pure authorization rule.
pub fn is_authorized(
    role: Role,
    requester: UserRef,
    status: Option<MemberStatus>,
    owners: &[UserRef],
) -> bool {
    match role {
        Role::Member => true,
        Role::Admin => status.is_some_and(MemberStatus::is_admin),
        Role::Owner => owners.contains(&requester),
    }
}

#[derive(Clone)]
pub struct AdminGate {
    lookup: Arc<dyn MemberLookup>,
    owners: Arc<[UserRef]>,
}

impl AdminGate {
    pub fn new(lookup: Arc<dyn MemberLookup>, owners: Vec<UserRef>) -> Self {
        Self {
            lookup,
            owners: owners.into(),
        }
    }

    /// Check `role` for `requester` in `chat`. Never fails: a lookup error
    /// denies.
    pub async fn authorize(&self, role: Role, chat: ChatRef, requester: UserRef) -> bool {
        let status = match role {
            Role::Admin => match self.lookup.status(chat, requester).await {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!("Cannot verify admin status of {} in {}: {}", requester, chat, e);
                    None
                }
            },
            Role::Member | Role::Owner => None,
        };

        let allowed = is_authorized(role, requester, status, &self.owners);
        if !allowed {
            debug!("Denied {:?} action to {} in chat {}", role, requester, chat);
        }
        allowed
    }

    pub fn forget(&self, chat: ChatRef, user: UserRef) {
        self.lookup.forget(chat, user);
    }
}
