//! Seed document types and JSON parsing.
//!
//! A seed document lists initial users and historical activity. Activity
//! records carry an age in seconds so the feed reads naturally whenever the
//! seed is applied.

use std::sync::Arc;

use camino::Utf8Path;
use cap_std::fs::Dir;
use chrono::Duration;
use mockable::Clock;
use serde::Deserialize;
use tracing::info;

use super::error::SeedError;
use crate::domain::{
    ActionType, ActivityLog, DashboardService, DirectoryError, DirectoryStore, NewActivity,
    Severity, User, UserDraft, UserId,
};

/// Current supported seed document version.
const SUPPORTED_VERSION: u32 = 1;

const BUILTIN_SEED: &str = include_str!("../../fixtures/example-data/seed.json");

/// Historical activity entry awaiting replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedActivity {
    activity: NewActivity,
    age: Duration,
}

impl SeedActivity {
    /// Entry content.
    #[must_use]
    pub const fn activity(&self) -> &NewActivity {
        &self.activity
    }

    /// How long before the replay time the entry happened.
    #[must_use]
    pub const fn age(&self) -> Duration {
        self.age
    }
}

/// Validated seed document.
///
/// # Example
///
/// ```
/// use dashboard::example_data::SeedDocument;
///
/// let json = r#"{
///     "version": 1,
///     "users": [{"id": "7", "name": "Ann", "email": "ann@x.com", "role": "user", "status": "active"}],
///     "activities": []
/// }"#;
///
/// let seed = SeedDocument::from_json(json).expect("valid seed");
/// assert_eq!(seed.users().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDocument {
    directory: DirectoryStore,
    activities: Vec<SeedActivity>,
}

impl SeedDocument {
    /// Parses a seed document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if:
    /// - the JSON is malformed or has unknown fields;
    /// - the version is unsupported;
    /// - a user record is invalid or repeats an identifier;
    /// - an activity age does not fit in a duration.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let raw: RawSeedDocument = serde_json::from_str(json).map_err(|e| SeedError::Parse {
            message: e.to_string(),
        })?;

        Self::from_raw(raw)
    }

    /// Loads a seed document from `path` relative to `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the file cannot be read or parsed.
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, SeedError> {
        let contents = dir.read_to_string(path).map_err(|e| SeedError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    /// The bundled demonstration data: five users and six activities.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the bundled document is invalid.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN_SEED)
    }

    fn from_raw(raw: RawSeedDocument) -> Result<Self, SeedError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(SeedError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let users = raw
            .users
            .into_iter()
            .enumerate()
            .map(|(index, user)| {
                let draft = UserDraft::new(user.name, user.email, user.role, user.status);
                User::try_from_strings(user.id, &draft)
                    .map_err(|source| SeedError::InvalidUser { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let directory = DirectoryStore::with_users(users).map_err(|err| match err {
            DirectoryError::DuplicateId { id } => SeedError::DuplicateUserId { id },
            other => SeedError::Parse {
                message: other.to_string(),
            },
        })?;

        let activities = raw
            .activities
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_seed_activity(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            directory,
            activities,
        })
    }

    /// Seeded users in document order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        self.directory.users()
    }

    /// Seeded activity in document order.
    #[must_use]
    pub fn activities(&self) -> &[SeedActivity] {
        &self.activities
    }

    /// Directory holding the seeded users.
    #[must_use]
    pub fn directory(&self) -> DirectoryStore {
        self.directory.clone()
    }

    /// Build an activity log stamped by `clock`, replaying seeded entries
    /// oldest first so the log reads newest first.
    #[must_use]
    pub fn activity_log(&self, clock: Arc<dyn Clock>) -> ActivityLog {
        let now = clock.utc();
        let mut log = ActivityLog::new(clock);
        let mut ordered: Vec<&SeedActivity> = self.activities.iter().collect();
        ordered.sort_by_key(|seeded| std::cmp::Reverse(seeded.age));
        for seeded in ordered {
            let timestamp = now.checked_sub_signed(seeded.age).unwrap_or(now);
            log.append_at(seeded.activity.clone(), timestamp);
        }
        log
    }

    /// Build a dashboard service over the seeded directory and activity.
    #[must_use]
    pub fn into_service(self, clock: Arc<dyn Clock>) -> DashboardService<ActivityLog> {
        let log = self.activity_log(clock);
        info!(
            users = self.directory.len(),
            activities = log.len(),
            "seed applied"
        );
        DashboardService::new(self.directory, log)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSeedDocument {
    version: u32,
    users: Vec<RawSeedUser>,
    #[serde(default)]
    activities: Vec<RawSeedActivity>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSeedUser {
    id: String,
    name: String,
    email: String,
    role: String,
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSeedActivity {
    action: String,
    description: String,
    age_seconds: u64,
    user_id: Option<String>,
    user_name: Option<String>,
    action_type: ActionType,
    severity: Severity,
}

impl RawSeedActivity {
    fn into_seed_activity(self, index: usize) -> Result<SeedActivity, SeedError> {
        let invalid = |message: String| SeedError::InvalidActivity { index, message };
        let age = i64::try_from(self.age_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| invalid(format!("age {} is out of range", self.age_seconds)))?;

        let mut activity =
            NewActivity::new(self.action_type, self.severity, self.action, self.description);
        if let Some(raw_id) = self.user_id {
            let user_id = UserId::new(raw_id).map_err(|err| invalid(err.to_string()))?;
            let user_name = self.user_name.unwrap_or_default();
            activity = activity.for_user(user_id, user_name);
        }
        Ok(SeedActivity { activity, age })
    }
}
