//! Shared types and models for the Tea Garden Climate Impact Analyzer
//!
//! This crate contains the pure parts of the analyzer that are shared between
//! the backend server and the browser (via WASM): climate inputs, feature row
//! assembly, the stress decision table and input range validation.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
