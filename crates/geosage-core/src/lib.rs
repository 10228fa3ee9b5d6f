//! GeoSage Core: geographic data model, configuration, errors.

pub mod config;
pub mod error;
pub mod geo;

pub use config::GeoSageConfig;
pub use error::{Error, Result};
pub use geo::*;
