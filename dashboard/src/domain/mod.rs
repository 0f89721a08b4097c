//! Domain primitives, aggregates, and services.
//!
//! Purpose: model the dashboard's user directory, activity feed, session, and
//! preferences as plain synchronous types. Nothing here performs I/O except
//! through the ports in [`ports`].
//!
//! Public surface:
//! - [`DirectoryStore`] owns user records and returns [`DirectoryEvent`]s.
//! - [`ActivityLog`] is the bounded, newest-first audit trail.
//! - [`DashboardService`] ties both together with the [`Session`].
//! - [`PreferencesService`] persists settings through a
//!   [`ports::PreferencesRepository`].

pub mod activity;
pub mod dashboard_service;
pub mod directory;
pub mod error;
pub mod export;
pub mod password_strength;
pub mod ports;
pub mod preferences;
pub mod preferences_service;
pub mod relative_time;
pub mod session;
pub mod summary;
pub mod user;
pub mod user_events;

pub use self::activity::{
    ACTIVITY_LOG_CAPACITY, ActionType, ActivityEntry, ActivityId, ActivityLog, ActivityQuery,
    NewActivity, Severity,
};
pub use self::dashboard_service::DashboardService;
pub use self::directory::{
    DirectoryStore, SortDirection, SortField, UnknownSelection, UserQuery,
};
pub use self::error::{DirectoryError, PasswordRejection, SessionError};
pub use self::export::export_csv;
pub use self::password_strength::{PASSWORD_MIN_LENGTH, PasswordStrength, StrengthLabel};
pub use self::preferences::{
    NotificationKind, NotificationSettings, ParseNotificationKindError, Preferences,
};
pub use self::preferences_service::PreferencesService;
pub use self::relative_time::format_time_ago;
pub use self::session::{
    ADMIN_USER_ID, ADMIN_USER_NAME, LoginCredentials, PasswordChange, Session, SessionUser,
};
pub use self::summary::{DashboardSummary, RECENT_ACTIVITY_LIMIT, USER_ACTIVITY_LIMIT};
pub use self::user::{
    EmailAddress, Role, Status, User, UserDraft, UserFields, UserId, UserName,
    UserValidationError,
};
pub use self::user_events::{
    DirectoryEvent, UserAddedEvent, UserDeletedEvent, UserUpdatedEvent,
};
