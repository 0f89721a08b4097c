//! Dashboard display and notification preferences.
//!
//! Preferences are a flat set of switches. They carry no owner because the
//! dashboard keeps a single profile per installation.

use serde::{Deserialize, Serialize};

/// Notification channel or topic that can be switched on or off.
///
/// # Examples
///
/// ```
/// use dashboard::domain::NotificationKind;
///
/// let kind: NotificationKind = "security".parse().expect("known kind");
/// assert_eq!(kind, NotificationKind::Security);
/// assert_eq!(kind.as_str(), "security");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Email delivery.
    Email,
    /// Push delivery.
    Push,
    /// Product update announcements.
    Updates,
    /// Security alerts.
    Security,
}

impl NotificationKind {
    /// Every kind, in settings display order.
    pub const ALL: [Self; 4] = [Self::Email, Self::Push, Self::Updates, Self::Security];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Push => "push",
            Self::Updates => "updates",
            Self::Security => "security",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown notification kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification kind: {input}")]
pub struct ParseNotificationKindError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::str::FromStr for NotificationKind {
    type Err = ParseNotificationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "push" => Ok(Self::Push),
            "updates" => Ok(Self::Updates),
            "security" => Ok(Self::Security),
            _ => Err(ParseNotificationKindError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Per-kind notification switches. Everything starts enabled.
#[expect(
    clippy::struct_excessive_bools,
    reason = "each switch maps to one independent settings toggle"
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Email delivery.
    pub email: bool,
    /// Push delivery.
    pub push: bool,
    /// Product update announcements.
    pub updates: bool,
    /// Security alerts.
    pub security: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            updates: true,
            security: true,
        }
    }
}

impl NotificationSettings {
    /// Whether `kind` is enabled.
    #[must_use]
    pub const fn is_enabled(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Email => self.email,
            NotificationKind::Push => self.push,
            NotificationKind::Updates => self.updates,
            NotificationKind::Security => self.security,
        }
    }

    /// Switch `kind` on or off.
    pub const fn set(&mut self, kind: NotificationKind, enabled: bool) {
        match kind {
            NotificationKind::Email => self.email = enabled,
            NotificationKind::Push => self.push = enabled,
            NotificationKind::Updates => self.updates = enabled,
            NotificationKind::Security => self.security = enabled,
        }
    }
}

/// Stored dashboard preferences.
///
/// # Examples
///
/// ```
/// use dashboard::domain::{NotificationKind, Preferences};
///
/// let prefs = Preferences::default();
/// assert!(!prefs.dark_mode);
/// assert!(prefs.notifications.is_enabled(NotificationKind::Push));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Preferences {
    /// Dark colour scheme.
    pub dark_mode: bool,
    /// Notification switches.
    pub notifications: NotificationSettings,
}
