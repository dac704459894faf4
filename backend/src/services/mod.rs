//! Business logic services for the Tea Garden Climate Impact Analyzer

pub mod analysis;
pub mod inference;

pub use analysis::AnalysisService;
pub use inference::InferenceEngine;
