//! Domain events emitted by directory mutations.
//!
//! Mutators on [`crate::domain::DirectoryStore`] return these events instead
//! of writing to the activity log directly. A subscriber turns each event into
//! a log entry through [`DirectoryEvent::to_activity`].

use crate::domain::activity::{ActionType, NewActivity, Severity};
use crate::domain::user::User;

/// Event emitted when a user record is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAddedEvent {
    /// The stored record, including its fresh identifier.
    pub user: User,
}

/// Event emitted when a user record is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdatedEvent {
    /// Record before the update.
    pub previous: User,
    /// Record after the update.
    pub current: User,
}

/// Event emitted when a user record is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDeletedEvent {
    /// The removed record.
    pub user: User,
    /// Whether the removal was part of a bulk delete.
    pub bulk: bool,
}

/// Directory lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    /// A user has been added.
    UserAdded(UserAddedEvent),
    /// A user has been updated.
    UserUpdated(UserUpdatedEvent),
    /// A user has been deleted.
    UserDeleted(UserDeletedEvent),
}

impl DirectoryEvent {
    /// The user the event concerns, in its latest known state.
    #[must_use]
    pub const fn user(&self) -> &User {
        match self {
            Self::UserAdded(event) => &event.user,
            Self::UserUpdated(event) => &event.current,
            Self::UserDeleted(event) => &event.user,
        }
    }

    /// Activity entry describing the event.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard::domain::{
    ///     ActionType, DirectoryEvent, User, UserAddedEvent, UserDraft,
    /// };
    ///
    /// let draft = UserDraft::new("Ann", "ann@x.com", "user", "active");
    /// let user = User::try_from_strings("7", &draft).expect("valid user");
    /// let event = DirectoryEvent::UserAdded(UserAddedEvent { user });
    ///
    /// let activity = event.to_activity();
    /// assert_eq!(activity.action_type, ActionType::UserAdded);
    /// assert_eq!(activity.description, "New user Ann was added to the system");
    /// ```
    #[must_use]
    pub fn to_activity(&self) -> NewActivity {
        let user = self.user();
        let activity = match self {
            Self::UserAdded(_) => NewActivity::new(
                ActionType::UserAdded,
                Severity::Success,
                "User Added",
                format!("New user {} was added to the system", user.name()),
            ),
            Self::UserUpdated(event) => NewActivity::new(
                ActionType::UserUpdated,
                Severity::Warning,
                "User Updated",
                describe_update(event),
            ),
            Self::UserDeleted(event) => {
                let suffix = if event.bulk { " (bulk delete)" } else { "" };
                NewActivity::new(
                    ActionType::UserDeleted,
                    Severity::Error,
                    "User Deleted",
                    format!("User {} was removed from the system{suffix}", user.name()),
                )
            }
        };
        activity.for_user(user.id().clone(), user.name().as_ref())
    }
}

fn describe_update(event: &UserUpdatedEvent) -> String {
    let UserUpdatedEvent { previous, current } = event;
    let status_change = (previous.status() != current.status())
        .then(|| {
            format!(
                " (status changed from {} to {})",
                previous.status(),
                current.status()
            )
        })
        .unwrap_or_default();
    let role_change = (previous.role() != current.role())
        .then(|| {
            format!(
                " (role changed from {} to {})",
                previous.role(),
                current.role()
            )
        })
        .unwrap_or_default();
    format!(
        "User {} was updated{status_change}{role_change}",
        current.name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserDraft;
    use rstest::{fixture, rstest};

    #[fixture]
    fn mike() -> User {
        let draft = UserDraft::new("Mike Johnson", "mike@example.com", "editor", "active");
        User::try_from_strings("3", &draft).expect("valid user")
    }

    fn edited(user: &User, role: &str, status: &str) -> User {
        let draft = UserDraft::new(user.name().as_ref(), user.email().as_ref(), role, status);
        User::try_from_strings(user.id().as_str(), &draft).expect("valid user")
    }

    #[rstest]
    fn update_without_transitions_has_plain_description(mike: User) {
        let event = DirectoryEvent::UserUpdated(UserUpdatedEvent {
            previous: mike.clone(),
            current: mike,
        });
        let activity = event.to_activity();
        assert_eq!(activity.description, "User Mike Johnson was updated");
        assert_eq!(activity.severity, Severity::Warning);
    }

    #[rstest]
    fn update_notes_status_transition(mike: User) {
        let current = edited(&mike, "editor", "inactive");
        let event = DirectoryEvent::UserUpdated(UserUpdatedEvent {
            previous: mike,
            current,
        });
        assert_eq!(
            event.to_activity().description,
            "User Mike Johnson was updated (status changed from active to inactive)"
        );
    }

    #[rstest]
    fn update_notes_role_and_status_transitions(mike: User) {
        let current = edited(&mike, "admin", "inactive");
        let event = DirectoryEvent::UserUpdated(UserUpdatedEvent {
            previous: mike,
            current,
        });
        assert_eq!(
            event.to_activity().description,
            "User Mike Johnson was updated (status changed from active to inactive) \
             (role changed from editor to admin)"
        );
    }

    #[rstest]
    #[case::single(false, "User Mike Johnson was removed from the system")]
    #[case::bulk(true, "User Mike Johnson was removed from the system (bulk delete)")]
    fn delete_description_reflects_bulk_flag(
        mike: User,
        #[case] bulk: bool,
        #[case] expected: &str,
    ) {
        let event = DirectoryEvent::UserDeleted(UserDeletedEvent { user: mike, bulk });
        let activity = event.to_activity();
        assert_eq!(activity.description, expected);
        assert_eq!(activity.action_type, ActionType::UserDeleted);
        assert_eq!(activity.severity, Severity::Error);
        assert_eq!(activity.user_name.as_deref(), Some("Mike Johnson"));
    }

    #[rstest]
    fn activity_references_user(mike: User) {
        let id = mike.id().clone();
        let activity = DirectoryEvent::UserAdded(UserAddedEvent { user: mike }).to_activity();
        assert_eq!(activity.user_id, Some(id));
        assert_eq!(activity.severity, Severity::Success);
    }
}
