//! Domain ports and supporting types for the hexagonal boundary.

mod activity_sink;
mod preferences_repository;

#[cfg(test)]
pub use activity_sink::MockActivitySink;
pub use activity_sink::{ActivitySink, FixtureActivitySink};
#[cfg(test)]
pub use preferences_repository::MockPreferencesRepository;
pub use preferences_repository::{
    InMemoryPreferencesRepository, PreferencesRepository, PreferencesRepositoryError,
};
