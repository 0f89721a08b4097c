//! Landing-page figures derived from the directory and the activity log.

use serde::Serialize;

use crate::domain::activity::{ActivityEntry, ActivityLog};
use crate::domain::directory::DirectoryStore;
use crate::domain::user::{Role, Status};

/// Number of activity entries shown on the landing page.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;
/// Number of activity entries shown on a user detail view.
pub const USER_ACTIVITY_LIMIT: usize = 5;

/// Directory counts plus the latest activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// All users.
    pub total_users: usize,
    /// Users with [`Status::Active`].
    pub active_users: usize,
    /// Users with [`Status::Inactive`].
    pub inactive_users: usize,
    /// Users with [`Role::Admin`].
    pub admin_users: usize,
    /// Users with [`Role::Editor`].
    pub editor_users: usize,
    /// Newest entries first, at most [`RECENT_ACTIVITY_LIMIT`].
    pub recent_activity: Vec<ActivityEntry>,
}

impl DashboardSummary {
    /// Compute the summary from current state.
    #[must_use]
    pub fn collect(directory: &DirectoryStore, log: &ActivityLog) -> Self {
        let users = directory.users();
        let with_status = |status| users.iter().filter(|user| user.status() == status).count();
        let with_role = |role| users.iter().filter(|user| user.role() == role).count();
        Self {
            total_users: users.len(),
            active_users: with_status(Status::Active),
            inactive_users: with_status(Status::Inactive),
            admin_users: with_role(Role::Admin),
            editor_users: with_role(Role::Editor),
            recent_activity: log.recent(RECENT_ACTIVITY_LIMIT),
        }
    }
}
