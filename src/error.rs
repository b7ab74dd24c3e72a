use std::collections::TryReserveError;
use thiserror::Error;

/// Error types for the kmeans2d library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Not enough samples for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The number of restarts is invalid (must be > 0)
    #[error("Invalid restart count: {0}")]
    InvalidRestarts(String),

    /// The convergence threshold is negative or NaN
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Sample coordinates are not finite
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Array input is not shaped (n, 2)
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// Backing storage of a point buffer could not grow
    #[error("Failed to grow point buffer: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// A restart converged with clusters that no sample is assigned to
    #[error("Converged with {empty} empty clusters")]
    DegenerateClusters { empty: usize },

    /// The iteration cap was reached before the centroid delta fell below the threshold
    #[error("Failed to converge after {iterations} iterations (last delta = {delta})")]
    NotConverged { iterations: usize, delta: f32 },
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;
