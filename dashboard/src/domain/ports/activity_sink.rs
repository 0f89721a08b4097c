//! Subscriber port for activity produced by dashboard mutations.
//!
//! Directory mutators return events instead of writing to the log
//! themselves. The [`ActivitySink`] receives the entry derived from each
//! event; the in-process [`crate::domain::ActivityLog`] is the production
//! implementation.

use crate::domain::NewActivity;

/// Receives activity entries produced by dashboard operations.
#[cfg_attr(test, mockall::automock)]
pub trait ActivitySink {
    /// Persist one entry. Implementations must not fail.
    fn record(&mut self, activity: NewActivity);
}

/// Sink that discards every entry.
///
/// Use it where activity is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivitySink;

impl ActivitySink for FixtureActivitySink {
    fn record(&mut self, _activity: NewActivity) {}
}

impl ActivitySink for Vec<NewActivity> {
    fn record(&mut self, activity: NewActivity) {
        self.push(activity);
    }
}
