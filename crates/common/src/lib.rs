//! Shared utilities, configuration, and error handling for Longbow
//!
//! This crate provides common functionality used across the Longbow application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - The `{error, message, data}` response envelope
//! - Password hashing utilities

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod response;
pub mod state;

pub use config::Config;
pub use crypto::{hash_password, verify_password};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
pub use response::ApiBody;
pub use state::StateError;
