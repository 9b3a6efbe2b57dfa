//! Custom extractors for Axum handlers.
//!
//! Rejections are [`AppError`](crate::errors::AppError)s, so failures share
//! the service-wide error body.

pub mod id_path;
pub mod strict_json;

pub use id_path::IdPath;
pub use strict_json::{StrictJson, JSON_CONTENT_TYPE};
