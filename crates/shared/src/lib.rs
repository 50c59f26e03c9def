//! Shared types, errors, and configuration for Purse.
//!
//! This crate provides the types used across all other crates:
//! - `Currency` with its fixed decimal precision
//! - `Money`, an immutable amount always rounded to its currency
//! - Money error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{MoneyError, MoneyResult};
pub use types::{Currency, Money};
