//! Core business logic for the coin change service.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//!
//! # Modules
//!
//! - `change` - Decimal-to-unit normalization and the minimum coin solver

pub mod change;
