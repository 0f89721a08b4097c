//! Error types for seed document loading.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::domain::{UserId, UserValidationError};

/// Errors raised while reading or applying a seed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file at '{path}': {message}")]
    Io {
        /// Path to the seed file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The seed JSON is malformed or missing required fields.
    #[error("invalid seed JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// The seed document version is not supported.
    #[error("unsupported seed version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Supported version number.
        expected: u32,
        /// Version found in the document.
        actual: u32,
    },

    /// A user record failed validation.
    #[error("invalid user at index {index}: {source}")]
    InvalidUser {
        /// Position of the record in the `users` array.
        index: usize,
        /// The validation failure.
        source: UserValidationError,
    },

    /// Two user records share an identifier.
    #[error("duplicate user id {id}")]
    DuplicateUserId {
        /// The repeated identifier.
        id: UserId,
    },

    /// An activity record failed validation.
    #[error("invalid activity at index {index}: {message}")]
    InvalidActivity {
        /// Position of the record in the `activities` array.
        index: usize,
        /// Description of the problem.
        message: String,
    },
}
