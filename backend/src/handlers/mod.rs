//! HTTP handlers for the Tea Garden Climate Impact Analyzer

pub mod analysis;
pub mod health;

pub use analysis::*;
pub use health::*;
