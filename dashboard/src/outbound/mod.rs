//! Outbound adapters implementing domain ports against real infrastructure.

mod atomic_io;
pub mod preferences_file;

pub use self::preferences_file::JsonFilePreferencesRepository;
