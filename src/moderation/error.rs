use thiserror::Error;

use crate::store::StoreError;

/// Failure of a command.
///
/// `Usage` and `Denied` are shown to the user as-is. `Store` is fatal for
/// the request.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Denied(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CommandError {
    pub fn usage(text: impl Into<String>) -> Self {
        Self::Usage(text.into())
    }
}
