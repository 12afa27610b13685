//! Errors raised while building an environment from descriptors
//!
//! The distance and repair core is infallible; only construction from
//! user-supplied data can fail.

use thiserror::Error;

/// Environment construction errors
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// A sphere radius or box half-extent is negative
    #[error("obstacle {index}: negative radius {radius}")]
    NegativeRadius {
        /// Position of the offending descriptor
        index: usize,
        /// The rejected value
        radius: f32,
    },

    /// A descriptor parameter is NaN or infinite
    #[error("obstacle {index}: non-finite parameter")]
    NonFinite {
        /// Position of the offending descriptor
        index: usize,
    },

    /// JSON (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}
