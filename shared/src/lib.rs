//! Shared types and models for the Peanut Maturity Calculator
//!
//! This crate contains types shared between the report exporter, the
//! frontend (via WASM), and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
