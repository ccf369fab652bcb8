//! Error types for the public API.
//!
//! Internally the crate uses `anyhow` through the `Res<T>` alias. Errors that leave the crate
//! through a command are classified with an `ErrorType` by calling `pub_result`.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The internal result type.
pub(crate) type Res<T> = std::result::Result<T, anyhow::Error>;

/// The public result type returned by commands.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// Reading from or writing to the data store failed.
    Store,
    /// User input was rejected before reaching the store.
    Validation,
    /// There is no signed-in user.
    Session,
    /// Writing command output failed.
    Output,
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// An error returned from the public API, carrying an `ErrorType` and the underlying cause.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:#}", self.error_type, self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Converts an internal result into a public `Result` with the given classification.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}
