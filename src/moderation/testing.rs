//! Test doubles for the moderation ports.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::actuator::{Actuator, ActuatorError};
use super::auth::{LookupError, MemberLookup, MemberStatus};
use super::ids::{ChatRef, MessageRef, UserRef};
use crate::store::{ConfigStore, StoreError, StoredValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Delete(MessageRef),
    Mute(UserRef, Duration),
    Unmute(UserRef),
    Ban(UserRef),
    Kick(UserRef),
    Leave(ChatRef),
}

/// Actuator that records every request and optionally fails them all.
#[derive(Default)]
pub struct RecordingActuator {
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

impl RecordingActuator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ActuatorError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(ActuatorError::Forbidden("not enough rights".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn delete_message(&self, _chat: ChatRef, message: MessageRef) -> Result<(), ActuatorError> {
        self.record(Call::Delete(message))
    }

    async fn delete_messages(&self, _chat: ChatRef, messages: &[MessageRef]) -> usize {
        messages
            .iter()
            .filter(|&&m| self.record(Call::Delete(m)).is_ok())
            .count()
    }

    async fn mute(&self, _chat: ChatRef, user: UserRef, duration: Duration) -> Result<(), ActuatorError> {
        self.record(Call::Mute(user, duration))
    }

    async fn unmute(&self, _chat: ChatRef, user: UserRef) -> Result<(), ActuatorError> {
        self.record(Call::Unmute(user))
    }

    async fn ban(&self, _chat: ChatRef, user: UserRef) -> Result<(), ActuatorError> {
        self.record(Call::Ban(user))
    }

    async fn kick(&self, _chat: ChatRef, user: UserRef) -> Result<(), ActuatorError> {
        self.record(Call::Kick(user))
    }

    async fn leave_chat(&self, chat: ChatRef) -> Result<(), ActuatorError> {
        self.record(Call::Leave(chat))
    }
}

/// Store whose backend is always down.
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

#[async_trait]
impl ConfigStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<StoredValue>, StoreError> {
        Err(down())
    }

    async fn put(&self, _key: &str, _value: StoredValue) -> Result<(), StoreError> {
        Err(down())
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(down())
    }

    async fn increment(&self, _key: &str, _max: i64) -> Result<i64, StoreError> {
        Err(down())
    }
}

/// Lookup answering from a fixed table; unknown users fail.
#[derive(Default)]
pub struct ScriptedLookup(pub HashMap<u64, MemberStatus>);

impl ScriptedLookup {
    pub fn with(mut self, user: u64, status: MemberStatus) -> Self {
        self.0.insert(user, status);
        self
    }
}

#[async_trait]
impl MemberLookup for ScriptedLookup {
    async fn status(&self, _chat: ChatRef, user: UserRef) -> Result<MemberStatus, LookupError> {
        self.0
            .get(&user.0)
            .copied()
            .ok_or_else(|| LookupError("timeout".into()))
    }
}
