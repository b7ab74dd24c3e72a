use crate::error::{KMeansError, Result};
use crate::point::Point;
use std::collections::HashSet;

/// Configuration for the multi-restart k-means search
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Convergence threshold. A restart stops once the summed centroid
    /// displacement of a step is at or below this value.
    pub threshold: f32,

    /// Number of independent random restarts. The lowest-cost one wins.
    pub n_restarts: usize,

    /// Maximum number of assignment/update steps per restart.
    /// `None` loops until convergence with no cap.
    pub max_iters: Option<usize>,

    /// Random seed for centroid initialization and empty-cluster reseeding
    pub seed: u64,

    /// Run restarts on the rayon thread pool
    pub parallel: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 4,
            threshold: 0.15,
            n_restarts: 50,
            max_iters: Some(10_000),
            seed: 0,
            parallel: false,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of restarts
    pub fn with_restarts(mut self, n_restarts: usize) -> Self {
        self.n_restarts = n_restarts;
        self
    }

    /// Set the per-restart iteration cap (`None` disables it)
    pub fn with_max_iters(mut self, max_iters: Option<usize>) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable parallel restarts
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the configuration against a sample set of `n_samples` points.
    pub fn validate(&self, n_samples: usize) -> Result<()> {
        if self.k == 0 {
            return Err(KMeansError::InvalidK(
                "k must be greater than 0".to_string(),
            ));
        }

        if n_samples < self.k {
            return Err(KMeansError::InsufficientData(format!(
                "Number of samples ({}) is less than k ({})",
                n_samples, self.k
            )));
        }

        if self.n_restarts == 0 {
            return Err(KMeansError::InvalidRestarts(
                "n_restarts must be at least 1".to_string(),
            ));
        }

        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(KMeansError::InvalidThreshold(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }

        Ok(())
    }

    /// [`validate`](Self::validate) plus checks on the sample values: every
    /// coordinate must be finite, and there must be at least `k` distinct
    /// points so that every cluster can be populated.
    pub fn validate_samples(&self, samples: &[Point]) -> Result<()> {
        self.validate(samples.len())?;

        if let Some(idx) = samples
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(KMeansError::InvalidData(format!(
                "sample {} has non-finite coordinates",
                idx
            )));
        }

        // Adding 0.0 folds -0.0 into 0.0
        let distinct: HashSet<(u32, u32)> = samples
            .iter()
            .map(|p| ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits()))
            .collect();
        if distinct.len() < self.k {
            return Err(KMeansError::InsufficientData(format!(
                "Number of distinct samples ({}) is less than k ({})",
                distinct.len(),
                self.k
            )));
        }

        Ok(())
    }
}
