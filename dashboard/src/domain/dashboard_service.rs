//! Dashboard application service.
//!
//! [`DashboardService`] owns the directory, the session, and an
//! [`ActivitySink`]. Every successful mutation forwards exactly one entry per
//! resulting event to the sink; failures forward nothing.

use tracing::debug;

use crate::domain::activity::{ActivityEntry, ActivityLog, ActivityQuery, NewActivity};
use crate::domain::directory::{DirectoryStore, UserQuery};
use crate::domain::error::{DirectoryError, SessionError};
use crate::domain::export::export_csv;
use crate::domain::password_strength::PasswordStrength;
use crate::domain::ports::ActivitySink;
use crate::domain::session::{LoginCredentials, PasswordChange, Session, SessionUser};
use crate::domain::summary::{DashboardSummary, USER_ACTIVITY_LIMIT};
use crate::domain::user::{User, UserDraft, UserId};
use crate::domain::user_events::DirectoryEvent;

/// Entry point for every dashboard operation.
#[derive(Debug)]
pub struct DashboardService<S = ActivityLog> {
    directory: DirectoryStore,
    session: Session,
    sink: S,
}

impl<S> DashboardService<S>
where
    S: ActivitySink,
{
    /// Create a service over `directory`, reporting activity to `sink`.
    /// The session starts signed out.
    #[must_use]
    pub fn new(directory: DirectoryStore, sink: S) -> Self {
        Self {
            directory,
            session: Session::default(),
            sink,
        }
    }

    /// Read access to the directory.
    #[must_use]
    pub const fn directory(&self) -> &DirectoryStore {
        &self.directory
    }

    /// Read access to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Read access to the activity sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    fn publish(&mut self, event: &DirectoryEvent) {
        self.record(event.to_activity());
    }

    fn record(&mut self, activity: NewActivity) {
        debug!(action_type = %activity.action_type, "recording activity");
        self.sink.record(activity);
    }

    /// Add a user and record `User Added`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] for an invalid draft.
    pub fn add_user(&mut self, draft: &UserDraft) -> Result<User, DirectoryError> {
        let event = self.directory.add(draft)?;
        self.publish(&event);
        Ok(event.user().clone())
    }

    /// Edit a user and record `User Updated`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] for an invalid draft and
    /// [`DirectoryError::NotFound`] for an unknown identifier.
    pub fn update_user(
        &mut self,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<User, DirectoryError> {
        let event = self.directory.update(id, draft)?;
        self.publish(&event);
        Ok(event.user().clone())
    }

    /// Remove a user and record `User Deleted`. Unknown ids do nothing.
    pub fn delete_user(&mut self, id: &UserId) -> Option<User> {
        let event = self.directory.delete(id)?;
        self.publish(&event);
        Some(event.user().clone())
    }

    /// Remove several users, recording one entry per removed user in input
    /// order.
    pub fn bulk_delete_users<'a, I>(&mut self, ids: I) -> Vec<User>
    where
        I: IntoIterator<Item = &'a UserId>,
    {
        let events = self.directory.bulk_delete(ids);
        events
            .into_iter()
            .map(|event| {
                self.publish(&event);
                event.user().clone()
            })
            .collect()
    }

    /// Filtered, sorted projection of the directory.
    #[must_use]
    pub fn query_users(&self, query: &UserQuery) -> Vec<User> {
        self.directory.query(query)
    }

    /// CSV rendering of the projection selected by `query`.
    #[must_use]
    pub fn export_users(&self, query: &UserQuery) -> String {
        export_csv(&self.directory.query(query))
    }

    /// Open a session and record `User Login`.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] from the session.
    pub fn login(
        &mut self,
        credentials: &LoginCredentials,
    ) -> Result<&SessionUser, SessionError> {
        let activity = self.session.login(credentials)?;
        self.record(activity);
        self.session.current().ok_or(SessionError::Unauthenticated)
    }

    /// Close the session, recording `User Logout` when one was open.
    /// Returns whether a session was closed.
    pub fn logout(&mut self) -> bool {
        let Some(activity) = self.session.logout() else {
            return false;
        };
        self.record(activity);
        true
    }

    /// Change the signed-in user's password and record `Password Changed`.
    /// Returns the advisory strength of the new password.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unauthenticated`] without a session and
    /// [`SessionError::Password`] when the form is rejected.
    pub fn change_password(
        &mut self,
        change: &PasswordChange,
    ) -> Result<PasswordStrength, SessionError> {
        let activity = self.session.change_password(change)?;
        self.record(activity);
        Ok(change.strength())
    }

    /// Edit the signed-in user's profile and record `Profile Updated`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unauthenticated`] without a session and
    /// [`SessionError::Profile`] when a field is invalid.
    pub fn update_profile(
        &mut self,
        name: &str,
        email: &str,
    ) -> Result<&SessionUser, SessionError> {
        let activity = self.session.update_profile(name, email)?;
        self.record(activity);
        self.session.current().ok_or(SessionError::Unauthenticated)
    }
}

impl DashboardService<ActivityLog> {
    /// Landing-page counts and the latest activity.
    #[must_use]
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::collect(&self.directory, &self.sink)
    }

    /// Latest entries about one user.
    #[must_use]
    pub fn user_activity(&self, id: &UserId) -> Vec<ActivityEntry> {
        let query = ActivityQuery::all()
            .for_user(id.clone())
            .limit(USER_ACTIVITY_LIMIT);
        self.activity(&query)
    }

    /// Arbitrary projection of the activity log.
    #[must_use]
    pub fn activity(&self, query: &ActivityQuery) -> Vec<ActivityEntry> {
        self.sink.query(query)
    }

    /// Empty the activity log.
    pub fn clear_activity(&mut self) {
        self.sink.clear();
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
