//! Settings surface for dashboard preferences.
//!
//! The service reads the stored preferences once when it is built and writes
//! them back through the repository after every toggle.

use tracing::{debug, info};

use crate::domain::ports::{PreferencesRepository, PreferencesRepositoryError};
use crate::domain::{NotificationKind, Preferences};

/// Preferences held in memory and persisted on each change.
#[derive(Debug)]
pub struct PreferencesService<R> {
    repository: R,
    current: Preferences,
}

impl<R> PreferencesService<R>
where
    R: PreferencesRepository,
{
    /// Load preferences from `repository`, falling back to defaults when
    /// nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesRepositoryError`] when the store cannot be read.
    pub fn load(repository: R) -> Result<Self, PreferencesRepositoryError> {
        let current = repository.load()?.unwrap_or_else(|| {
            debug!("no stored preferences; using defaults");
            Preferences::default()
        });
        Ok(Self {
            repository,
            current,
        })
    }

    /// Current in-memory preferences.
    #[must_use]
    pub const fn current(&self) -> &Preferences {
        &self.current
    }

    /// Switch the dark colour scheme on or off and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesRepositoryError`] when the store cannot be
    /// written. The in-memory value is left unchanged in that case.
    pub fn set_dark_mode(
        &mut self,
        enabled: bool,
    ) -> Result<&Preferences, PreferencesRepositoryError> {
        let mut next = self.current;
        next.dark_mode = enabled;
        self.persist(next)?;
        info!(dark_mode = enabled, "dark mode preference changed");
        Ok(&self.current)
    }

    /// Switch one notification kind on or off and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesRepositoryError`] when the store cannot be
    /// written. The in-memory value is left unchanged in that case.
    pub fn set_notification(
        &mut self,
        kind: NotificationKind,
        enabled: bool,
    ) -> Result<&Preferences, PreferencesRepositoryError> {
        let mut next = self.current;
        next.notifications.set(kind, enabled);
        self.persist(next)?;
        info!(kind = %kind, enabled, "notification preference changed");
        Ok(&self.current)
    }

    fn persist(&mut self, next: Preferences) -> Result<(), PreferencesRepositoryError> {
        self.repository.save(&next)?;
        self.current = next;
        Ok(())
    }

    /// Release the underlying repository.
    #[must_use]
    pub fn into_repository(self) -> R {
        self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{InMemoryPreferencesRepository, MockPreferencesRepository};
    use mockall::predicate::eq;
    use rstest::rstest;

    #[rstest]
    fn load_falls_back_to_defaults() {
        let mut repo = MockPreferencesRepository::new();
        repo.expect_load().times(1).return_once(|| Ok(None));

        let service = PreferencesService::load(repo).expect("load succeeds");

        assert_eq!(service.current(), &Preferences::default());
    }

    #[rstest]
    fn load_uses_stored_preferences() {
        let stored = Preferences {
            dark_mode: true,
            ..Preferences::default()
        };
        let repo = InMemoryPreferencesRepository::with_stored(stored);

        let service = PreferencesService::load(repo).expect("load succeeds");

        assert!(service.current().dark_mode);
    }

    #[rstest]
    fn load_propagates_repository_error() {
        let mut repo = MockPreferencesRepository::new();
        repo.expect_load()
            .return_once(|| Err(PreferencesRepositoryError::io("unreadable")));

        let error = PreferencesService::load(repo).expect_err("load fails");

        assert_eq!(error, PreferencesRepositoryError::io("unreadable"));
    }

    #[rstest]
    fn dark_mode_toggle_is_saved_immediately() {
        let expected = Preferences {
            dark_mode: true,
            ..Preferences::default()
        };
        let mut repo = MockPreferencesRepository::new();
        repo.expect_load().return_once(|| Ok(None));
        repo.expect_save()
            .with(eq(expected))
            .times(1)
            .return_once(|_| Ok(()));

        let mut service = PreferencesService::load(repo).expect("load succeeds");
        let current = service.set_dark_mode(true).expect("save succeeds");

        assert_eq!(current, &expected);
    }

    #[rstest]
    fn notification_toggle_round_trips_through_repository() {
        let mut service = PreferencesService::load(InMemoryPreferencesRepository::default())
            .expect("load succeeds");

        service
            .set_notification(NotificationKind::Updates, false)
            .expect("save succeeds");

        let repo = service.into_repository();
        let stored = repo.stored().expect("preferences saved");
        assert!(!stored.notifications.updates);
        assert!(stored.notifications.email);
    }

    #[rstest]
    fn failed_save_keeps_previous_value() {
        let mut repo = MockPreferencesRepository::new();
        repo.expect_load().return_once(|| Ok(None));
        repo.expect_save()
            .return_once(|_| Err(PreferencesRepositoryError::serialization("broken")));

        let mut service = PreferencesService::load(repo).expect("load succeeds");
        let result = service.set_notification(NotificationKind::Security, false);

        assert!(result.is_err());
        assert!(service.current().notifications.security);
    }
}
