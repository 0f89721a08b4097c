//! Seed data for demonstrations and tests.
//!
//! A seed document supplies the initial directory and a short activity
//! history. The bundled document mirrors the demo dataset; deployments can
//! point at their own file through configuration.

mod error;
mod seed;

pub use self::error::SeedError;
pub use self::seed::{SeedActivity, SeedDocument};
