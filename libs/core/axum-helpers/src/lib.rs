//! Shared HTTP plumbing for the service binaries.
//!
//! Every endpoint in this system answers with the same envelope:
//! `{"success": true, ...}` on the happy path and
//! `{"success": false, "error"/"errors": ...}` on failures. The types
//! and helpers here keep that shape in one place, next to the server
//! assembly (router construction, health endpoint, graceful shutdown).

pub mod errors;
pub mod response;
pub mod server;
pub mod shutdown;

pub use errors::{error_response, error_response_with_detail, not_found, validation_response};
pub use response::{ApiResponse, MessageResponse};
pub use server::{create_app, create_production_app, create_router, health_router};
pub use shutdown::{shutdown_signal, ShutdownCoordinator};
