//! Shared types, errors, and configuration for the leave allocation workspace.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Inclusive date ranges
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AllocationConfig, AppConfig, LoggingConfig};
pub use error::AppError;
pub use types::DateRange;
