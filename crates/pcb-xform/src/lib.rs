//! Shear-free 2D transforms.
//!
//! A [`DecomposedTransform`] is always `translate * rotate * scale` and keeps those
//! three components explicitly, so "what is the current rotation" has a single
//! answer. The 3x3 matrix is derived from the components after every mutation.
//!
//! - [`matrix`] - standalone affine math on [`glam::DMat3`]
//! - [`decompose`] - recover position/scale/angle from an arbitrary matrix
//! - [`XformState`] - the serializable state record
//! - [`Tolerances`] - numeric thresholds for inversion and shear detection

mod config;
pub mod decompose;
pub mod matrix;
mod state;
mod transform;

pub use config::Tolerances;
pub use state::XformState;
pub use transform::DecomposedTransform;

// Point and matrix types used throughout the public API
pub use glam::{DMat3, DVec2};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XformError {
    #[error("Invalid state field '{field}': {reason}")]
    InvalidState { field: &'static str, reason: String },

    #[error("Transform is not invertible (determinant {determinant})")]
    NonInvertible { determinant: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tolerance config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, XformError>;
