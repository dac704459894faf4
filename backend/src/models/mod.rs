//! Models for the Tea Garden Climate Impact Analyzer
//!
//! Re-exports models from the shared crate and adds the backend-only
//! classifier and label encoder models

mod classifier;
mod label_encoder;

pub use classifier::*;
pub use label_encoder::*;
pub use shared::models::*;
