//! Server assembly: router construction with docs and request tracing,
//! the /health endpoint, and the serve loops with graceful shutdown.

pub mod app;
pub mod health;

pub use app::{create_app, create_production_app, create_router};
pub use health::{health_router, HealthResponse};
