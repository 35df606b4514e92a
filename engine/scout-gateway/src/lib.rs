//! Scout Gateway - HTTP surface for FPL player rankings
//!
//! Serves the scout pipeline as JSON endpoints and plain HTML tables, and
//! owns the service-level configuration and logging setup.

pub mod config;
pub mod error;
pub mod html;
pub mod logging;
pub mod rest_api;

pub use config::{load_config, ScoutConfig};
pub use error::{ApiError, ErrorDetail, ErrorResponse};
pub use logging::initialize_logging;
pub use rest_api::create_routes;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8081;
