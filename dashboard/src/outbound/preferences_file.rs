//! JSON file adapter for the preferences port.
//!
//! Preferences live in a single pretty-printed JSON document inside a
//! capability directory. A missing file means nothing has been saved yet.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_io::replace_file;
use crate::domain::Preferences;
use crate::domain::ports::{PreferencesRepository, PreferencesRepositoryError};

/// Preferences stored as `file_name` inside `dir`.
#[derive(Debug)]
pub struct JsonFilePreferencesRepository {
    dir: Dir,
    file_name: Utf8PathBuf,
}

impl JsonFilePreferencesRepository {
    /// Store preferences in `file_name`, a bare file name inside `dir`.
    #[must_use]
    pub fn new(dir: Dir, file_name: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir,
            file_name: file_name.into(),
        }
    }

    /// File name inside the directory.
    #[must_use]
    pub fn file_name(&self) -> &Utf8Path {
        &self.file_name
    }
}

impl PreferencesRepository for JsonFilePreferencesRepository {
    fn load(&self) -> Result<Option<Preferences>, PreferencesRepositoryError> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_name, "preferences file absent");
                return Ok(None);
            }
            Err(err) => {
                return Err(PreferencesRepositoryError::io(format!(
                    "{}: {err}",
                    self.file_name
                )));
            }
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| PreferencesRepositoryError::serialization(err.to_string()))
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), PreferencesRepositoryError> {
        let mut json = serde_json::to_string_pretty(preferences)
            .map_err(|err| PreferencesRepositoryError::serialization(err.to_string()))?;
        json.push('\n');
        replace_file(&self.dir, &self.file_name, json.as_bytes())
            .map_err(|err| PreferencesRepositoryError::io(err.to_string()))?;
        debug!(path = %self.file_name, "preferences saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NotificationKind, PreferencesService};
    use cap_std::ambient_authority;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        repo: JsonFilePreferencesRepository,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let temp = TempDir::new().expect("temp dir");
        let dir = Dir::open_ambient_dir(temp.path(), ambient_authority()).expect("open temp dir");
        Fixture {
            _temp: temp,
            repo: JsonFilePreferencesRepository::new(dir, "preferences.json"),
        }
    }

    #[rstest]
    fn missing_file_loads_nothing(fixture: Fixture) {
        assert_eq!(fixture.repo.load(), Ok(None));
    }

    #[rstest]
    fn saved_preferences_survive_reload(fixture: Fixture) {
        let Fixture { _temp, repo } = fixture;
        let mut service = PreferencesService::load(repo).expect("load defaults");
        service.set_dark_mode(true).expect("save dark mode");
        service
            .set_notification(NotificationKind::Push, false)
            .expect("save push");

        let reloaded =
            PreferencesService::load(service.into_repository()).expect("reload preferences");

        assert!(reloaded.current().dark_mode);
        assert!(!reloaded.current().notifications.push);
        assert!(reloaded.current().notifications.email);
    }

    #[rstest]
    fn file_uses_camel_case_keys(mut fixture: Fixture) {
        fixture
            .repo
            .save(&Preferences::default())
            .expect("save defaults");

        let raw = fixture
            .repo
            .dir
            .read_to_string("preferences.json")
            .expect("read file");
        assert!(raw.contains("\"darkMode\": false"));
    }

    #[rstest]
    fn corrupt_file_is_a_serialization_error(fixture: Fixture) {
        fixture
            .repo
            .dir
            .write("preferences.json", "{not json")
            .expect("write garbage");

        let error = fixture.repo.load().expect_err("corrupt file");

        assert!(matches!(
            error,
            PreferencesRepositoryError::Serialization { .. }
        ));
    }
}
