//! Domain-level error types.
//!
//! These errors are presentation agnostic. Callers map them to inline form
//! messages, CLI output, or silent no-ops as the situation calls for.

use thiserror::Error;

use crate::domain::user::{UserId, UserValidationError};

/// Failures raised by directory mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Submitted fields failed validation; nothing was written.
    #[error("invalid {field}: {0}", field = .0.field())]
    Validation(#[from] UserValidationError),
    /// No user carries the requested identifier.
    #[error("user {id} not found")]
    NotFound {
        /// The identifier that was looked up.
        id: UserId,
    },
    /// Seed data listed the same identifier twice.
    #[error("duplicate user id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: UserId,
    },
}

impl DirectoryError {
    /// Form field to highlight, when the error concerns one.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(source) => Some(source.field()),
            Self::NotFound { .. } | Self::DuplicateId { .. } => None,
        }
    }
}

/// Reasons a password change form is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordRejection {
    /// The current password was left blank.
    #[error("Current password is required")]
    MissingCurrent,
    /// The new password is shorter than the minimum.
    #[error("Password must be at least {min} characters")]
    TooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The confirmation does not match the new password.
    #[error("Passwords must match")]
    Mismatch,
}

impl PasswordRejection {
    /// Form field the message belongs next to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingCurrent => "currentPassword",
            Self::TooShort { .. } => "newPassword",
            Self::Mismatch => "confirmPassword",
        }
    }
}

/// Failures raised by session, password, and profile operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation needs a signed-in user.
    #[error("no user is signed in")]
    Unauthenticated,
    /// Email or password was left blank at login.
    #[error("email and password are required")]
    MissingCredentials,
    /// The password change form failed validation.
    #[error(transparent)]
    Password(#[from] PasswordRejection),
    /// The profile form failed validation.
    #[error("invalid profile {field}: {0}", field = .0.field())]
    Profile(#[from] UserValidationError),
}
