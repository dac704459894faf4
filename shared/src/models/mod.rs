//! Domain models for the Tea Garden Climate Impact Analyzer

mod climate;
mod prediction;
mod stress;

pub use climate::*;
pub use prediction::*;
pub use stress::*;
