//! PostgreSQL connection management for the service crates.
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connection pool, retrying connector, health check
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry};
//!
//! let db = connect_from_config_with_retry(PostgresConfig::from_env()?).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
