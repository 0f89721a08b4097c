//! Bounded audit trail of dashboard actions.
//!
//! The [`ActivityLog`] keeps the most recent [`ACTIVITY_LOG_CAPACITY`]
//! entries, newest first. Entries are immutable once appended and leave the
//! log only through eviction or [`ActivityLog::clear`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::ActivitySink;
use crate::domain::relative_time::format_time_ago;
use crate::domain::user::UserId;

/// Maximum number of entries retained by an [`ActivityLog`].
pub const ACTIVITY_LOG_CAPACITY: usize = 50;

/// Kind of action an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// A user was added to the directory.
    UserAdded,
    /// A directory user was edited.
    UserUpdated,
    /// A directory user was removed.
    UserDeleted,
    /// A session was opened.
    Login,
    /// A session was closed.
    Logout,
    /// The signed-in user changed their password.
    PasswordChanged,
    /// The signed-in user edited their profile.
    ProfileUpdated,
}

impl ActionType {
    /// Snake-case wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserAdded => "user_added",
            Self::UserUpdated => "user_updated",
            Self::UserDeleted => "user_deleted",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::PasswordChanged => "password_changed",
            Self::ProfileUpdated => "profile_updated",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display severity attached to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Neutral information.
    Info,
    /// Something was created.
    Success,
    /// Something changed.
    Warning,
    /// Something was removed.
    Error,
}

impl Severity {
    /// Snake-case wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonically assigned entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(u64);

impl ActivityId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entry content before the log assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    /// Short action label, e.g. `User Added`.
    pub action: String,
    /// Free-text description.
    pub description: String,
    /// User the entry refers to, if any.
    pub user_id: Option<UserId>,
    /// Display name of that user at the time of the action.
    pub user_name: Option<String>,
    /// Kind of action.
    pub action_type: ActionType,
    /// Display severity.
    pub severity: Severity,
}

impl NewActivity {
    /// Start an entry without a user reference.
    pub fn new(
        action_type: ActionType,
        severity: Severity,
        action: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            user_id: None,
            user_name: None,
            action_type,
            severity,
        }
    }

    /// Attach the user the entry refers to.
    #[must_use]
    pub fn for_user(mut self, user_id: UserId, user_name: impl Into<String>) -> Self {
        self.user_id = Some(user_id);
        self.user_name = Some(user_name.into());
        self
    }
}

/// Stored, immutable activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    id: ActivityId,
    action: String,
    description: String,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    action_type: ActionType,
    severity: Severity,
}

impl ActivityEntry {
    /// Entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Short action label.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Referenced user, which may no longer exist in the directory.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Name of the referenced user when the entry was recorded.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Kind of action.
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Display severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Relative age of the entry, e.g. `3 hours ago`.
    #[must_use]
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        format_time_ago(self.timestamp, now)
    }
}

/// Projection parameters for [`ActivityLog::query`].
///
/// # Examples
///
/// ```
/// use dashboard::domain::{ActivityQuery, UserId};
///
/// let user = UserId::new("3").expect("valid id");
/// let query = ActivityQuery::all().for_user(user).limit(5);
/// assert_eq!(query.limit, Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    /// Only entries referring to this user.
    pub user_id: Option<UserId>,
    /// At most this many entries.
    pub limit: Option<usize>,
}

impl ActivityQuery {
    /// Every entry, newest first.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to entries about `user_id`.
    #[must_use]
    pub fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Keep at most `limit` entries.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Newest-first, capacity-bounded activity log.
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    next_id: u64,
    clock: Arc<dyn Clock>,
}

impl ActivityLog {
    /// Create an empty log stamping entries with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTIVITY_LOG_CAPACITY.saturating_add(1)),
            next_id: 1,
            clock,
        }
    }

    /// Append an entry at the front, evicting the oldest beyond capacity.
    pub fn append(&mut self, activity: NewActivity) -> ActivityEntry {
        let timestamp = self.clock.utc();
        self.insert(activity, timestamp)
    }

    /// Append an entry with an explicit creation time.
    ///
    /// Callers replaying history must supply entries oldest first so the log
    /// stays newest-first.
    pub(crate) fn append_at(
        &mut self,
        activity: NewActivity,
        timestamp: DateTime<Utc>,
    ) -> ActivityEntry {
        self.insert(activity, timestamp)
    }

    fn insert(&mut self, activity: NewActivity, timestamp: DateTime<Utc>) -> ActivityEntry {
        let id = ActivityId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let NewActivity {
            action,
            description,
            user_id,
            user_name,
            action_type,
            severity,
        } = activity;
        let entry = ActivityEntry {
            id,
            action,
            description,
            timestamp,
            user_id,
            user_name,
            action_type,
            severity,
        };

        self.entries.push_front(entry.clone());
        if self.entries.len() > ACTIVITY_LOG_CAPACITY {
            let evicted = self.entries.len().saturating_sub(ACTIVITY_LOG_CAPACITY);
            self.entries.truncate(ACTIVITY_LOG_CAPACITY);
            debug!(evicted, "activity log evicted oldest entries");
        }
        entry
    }

    /// Newest-first projection, optionally filtered by user and limited.
    #[must_use]
    pub fn query(&self, query: &ActivityQuery) -> Vec<ActivityEntry> {
        self.entries
            .iter()
            .filter(|entry| {
                query
                    .user_id
                    .as_ref()
                    .is_none_or(|wanted| entry.user_id.as_ref() == Some(wanted))
            })
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// The `limit` most recent entries.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<ActivityEntry> {
        self.query(&ActivityQuery::all().limit(limit))
    }

    /// Remove every entry. Identifiers keep increasing afterwards.
    pub fn clear(&mut self) {
        let cleared = self.entries.len();
        self.entries.clear();
        debug!(cleared, "activity log cleared");
    }

    /// Iterate entries newest first.
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityLog")
            .field("entries", &self.entries)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl ActivitySink for ActivityLog {
    fn record(&mut self, activity: NewActivity) {
        self.append(activity);
    }
}
