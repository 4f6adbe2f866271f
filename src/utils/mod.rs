//! Utils module - Shared utilities and helpers
//!
//! Helpers used across layers: error conversion, logging setup, and text formatting.

/// Conversions from library errors to the crate's error types
pub mod error_helpers;

/// Tracing subscriber setup
pub mod logging;

/// Width-aware text truncation
pub mod text;
