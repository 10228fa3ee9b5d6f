//! GeoSage Gazetteer: ranked candidate lookup over GeoNames-style records.
//!
//! The `Gazetteer` trait is the only thing the resolution pipeline depends
//! on. `SqliteGazetteer` reads a prebuilt database; `MemoryGazetteer` holds a
//! small set of records in memory (fixtures, tests, embedded deployments).

pub mod admin;
pub mod gazetteer;
pub mod memory;
pub mod ranking;
pub mod schema;
pub mod sqlite;
pub mod types;

pub use gazetteer::{normalize_name, Gazetteer};
pub use memory::MemoryGazetteer;
pub use sqlite::SqliteGazetteer;
pub use types::*;
