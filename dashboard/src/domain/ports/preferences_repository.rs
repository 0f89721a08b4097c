//! Port for preference persistence.
//!
//! The [`PreferencesRepository`] trait stores the dashboard's preference
//! flags outside the process. The settings surface reads them once at start
//! and writes them back on every change.

use crate::domain::Preferences;

use thiserror::Error;

/// Errors raised by preference repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferencesRepositoryError {
    /// Reading or writing the backing store failed.
    #[error("preferences store I/O failed: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },
    /// Stored data could not be encoded or decoded.
    #[error("preferences serialization failed: {message}")]
    Serialization {
        /// Description of the encoding failure.
        message: String,
    },
}

impl PreferencesRepositoryError {
    /// Build an [`Io`](Self::Io) error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Build a [`Serialization`](Self::Serialization) error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Port for preference storage and retrieval.
#[cfg_attr(test, mockall::automock)]
pub trait PreferencesRepository {
    /// Fetch stored preferences.
    ///
    /// Returns `None` when nothing has been saved yet; callers fall back to
    /// [`Preferences::default`].
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesRepositoryError`] when the store cannot be read.
    fn load(&self) -> Result<Option<Preferences>, PreferencesRepositoryError>;

    /// Replace stored preferences.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesRepositoryError`] when the store cannot be
    /// written.
    fn save(&mut self, preferences: &Preferences) -> Result<(), PreferencesRepositoryError>;
}

/// Process-local repository keeping the last saved value.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPreferencesRepository {
    stored: Option<Preferences>,
}

impl InMemoryPreferencesRepository {
    /// Start with `preferences` already stored.
    #[must_use]
    pub const fn with_stored(preferences: Preferences) -> Self {
        Self {
            stored: Some(preferences),
        }
    }

    /// Last saved value, if any.
    #[must_use]
    pub const fn stored(&self) -> Option<&Preferences> {
        self.stored.as_ref()
    }
}

impl PreferencesRepository for InMemoryPreferencesRepository {
    fn load(&self) -> Result<Option<Preferences>, PreferencesRepositoryError> {
        Ok(self.stored)
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), PreferencesRepositoryError> {
        self.stored = Some(*preferences);
        Ok(())
    }
}
