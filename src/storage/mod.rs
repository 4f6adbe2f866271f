//! Storage layer for bugsnag-cli
//!
//! Persists user defaults (token, output format, base URL, page size) as a TOML file.

use crate::error::StorageError;

pub mod config;

pub use config::Config;

type Result<T> = std::result::Result<T, StorageError>;
