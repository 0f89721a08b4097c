//! In-memory user directory.
//!
//! Purpose: own the authoritative collection of [`User`] records and apply
//! validated mutations to it. Mutators return [`DirectoryEvent`]s so the
//! caller decides where activity goes; the store never writes to a log.
//!
//! Invariants:
//! - identifiers are unique across the collection;
//! - a draft that fails validation leaves the collection untouched;
//! - collection order is insertion order and only changes through removal.

mod query;

pub use self::query::{SortDirection, SortField, UnknownSelection, UserQuery};

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::error::DirectoryError;
use crate::domain::user::{User, UserDraft, UserId};
use crate::domain::user_events::{
    DirectoryEvent, UserAddedEvent, UserDeletedEvent, UserUpdatedEvent,
};

/// Authoritative, insertion-ordered user collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryStore {
    users: Vec<User>,
}

impl DirectoryStore {
    /// Create an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Create a directory holding `users` in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateId`] when two records share an
    /// identifier.
    pub fn with_users(users: Vec<User>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(users.len());
        for user in &users {
            if !seen.insert(user.id()) {
                return Err(DirectoryError::DuplicateId {
                    id: user.id().clone(),
                });
            }
        }
        Ok(Self { users })
    }

    /// Validate `draft` and append it under a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] for the first invalid field.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard::domain::{DirectoryEvent, DirectoryStore, UserDraft};
    ///
    /// let mut store = DirectoryStore::new();
    /// let draft = UserDraft::new("Ann", "ann@x.com", "user", "active");
    /// let event = store.add(&draft).expect("valid draft");
    ///
    /// assert!(matches!(event, DirectoryEvent::UserAdded(_)));
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn add(&mut self, draft: &UserDraft) -> Result<DirectoryEvent, DirectoryError> {
        let fields = draft.validate().inspect_err(|err| {
            warn!(field = err.field(), error = %err, "rejected new user");
        })?;
        let id = self.fresh_id();
        let user = User::new(id, fields);
        info!(user_id = %user.id(), role = %user.role(), "user added");
        self.users.push(user.clone());
        Ok(DirectoryEvent::UserAdded(UserAddedEvent { user }))
    }

    /// Validate `draft` and replace every editable field of user `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] for the first invalid field and
    /// [`DirectoryError::NotFound`] when no user has `id`. Validation runs
    /// first.
    pub fn update(
        &mut self,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<DirectoryEvent, DirectoryError> {
        let fields = draft.validate().inspect_err(|err| {
            warn!(user_id = %id, field = err.field(), error = %err, "rejected user update");
        })?;
        let Some(user) = self.users.iter_mut().find(|user| user.id() == id) else {
            warn!(user_id = %id, "update for unknown user");
            return Err(DirectoryError::NotFound { id: id.clone() });
        };
        let previous = user.clone();
        user.replace_fields(fields);
        let current = user.clone();
        info!(user_id = %id, "user updated");
        Ok(DirectoryEvent::UserUpdated(UserUpdatedEvent { previous, current }))
    }

    /// Remove user `id`. Returns `None` when no such user exists.
    pub fn delete(&mut self, id: &UserId) -> Option<DirectoryEvent> {
        self.remove(id, false)
    }

    /// Remove each of `ids` in order, skipping unknown identifiers.
    ///
    /// One event is returned per removed user, in input order.
    pub fn bulk_delete<'a, I>(&mut self, ids: I) -> Vec<DirectoryEvent>
    where
        I: IntoIterator<Item = &'a UserId>,
    {
        let events: Vec<DirectoryEvent> =
            ids.into_iter().filter_map(|id| self.remove(id, true)).collect();
        info!(removed = events.len(), "bulk delete finished");
        events
    }

    fn remove(&mut self, id: &UserId, bulk: bool) -> Option<DirectoryEvent> {
        let Some(position) = self.users.iter().position(|user| user.id() == id) else {
            debug!(user_id = %id, "delete of unknown user ignored");
            return None;
        };
        let user = self.users.remove(position);
        info!(user_id = %id, bulk, "user deleted");
        Some(DirectoryEvent::UserDeleted(UserDeletedEvent { user, bulk }))
    }

    /// Materialise a filtered, sorted projection. The store is not changed.
    #[must_use]
    pub fn query(&self, query: &UserQuery) -> Vec<User> {
        let needle = query.search.to_lowercase();
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|user| query.matches(user, &needle))
            .cloned()
            .collect();
        query.order(&mut users);
        debug!(matched = users.len(), total = self.users.len(), "directory query");
        users
    }

    /// Look up a user by identifier.
    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    /// Every user in collection order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of users.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn fresh_id(&self) -> UserId {
        loop {
            let id = UserId::random();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests;
