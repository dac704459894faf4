//! External collaborators

pub mod artifacts;

pub use artifacts::{load_label_encoder, load_model, schema_fingerprint, ModelArtifact};
