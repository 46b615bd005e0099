//! Shared errors and configuration for the coin change service.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, CacheConfig, LogConfig, ServerConfig, SolverConfig};
pub use error::AppError;
