//! GeoSage HTTP server: geoparsing over a read-only gazetteer.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
