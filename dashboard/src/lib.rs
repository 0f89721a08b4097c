//! Admin dashboard core: user directory, activity feed, session, and
//! preferences.
//!
//! The crate is synchronous and free of global state. A
//! [`domain::DashboardService`] owns the directory and session and publishes
//! every successful mutation to an [`domain::ports::ActivitySink`].
//! Preferences persist through [`outbound::JsonFilePreferencesRepository`].
//! [`example_data`] builds a populated service from a seed document, and
//! [`cli`] exposes it all on the command line.

pub mod cli;
pub mod config;
pub mod domain;
pub mod example_data;
pub mod outbound;
