//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries.
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: security headers and optional CORS
//! - **[`errors`]**: `AppError` and the structured error body
//! - **[`extractors`]**: strict JSON bodies and integer id paths

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, JSON_CONTENT_TYPE, StrictJson};
