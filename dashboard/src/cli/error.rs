//! Error types for the dashboard CLI.

use std::io;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::domain::ParseNotificationKindError;
use crate::domain::ports::PreferencesRepositoryError;
use crate::example_data::SeedError;

/// Errors surfaced while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A configured path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// Offending path.
        path: PathBuf,
    },
    /// A configured path has no file name component.
    #[error("path has no file name: {path}")]
    MissingFileName {
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The directory holding a configured file could not be opened.
    #[error("failed to open directory '{path}': {source}")]
    OpenDirectory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The seed document could not be loaded.
    #[error("seed error: {0}")]
    Seed(#[from] SeedError),
    /// Preferences could not be read or written.
    #[error("preferences error: {0}")]
    Preferences(#[from] PreferencesRepositoryError),
    /// Output could not be serialised.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Rejected `KIND=BOOL` notification toggle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    /// The argument has no `=`.
    #[error("expected KIND=BOOL, got '{input}'")]
    MissingSeparator {
        /// Raw argument.
        input: String,
    },
    /// The kind is not a notification channel.
    #[error(transparent)]
    Kind(#[from] ParseNotificationKindError),
    /// The value is not `true` or `false`.
    #[error("expected true or false, got '{input}'")]
    Value {
        /// Raw value.
        input: String,
    },
}
