use crate::algorithm::{predict_labels, search, KMeansResult};
use crate::config::KMeansConfig;
use crate::error::{KMeansError, Result};
use crate::point::{points_from_array, points_to_array, Point, PointBuffer};
use ndarray::{Array1, Array2, ArrayView2};

/// K-means clustering over 2D points with multi-restart search.
///
/// Each call to [`fit`](KMeans::fit) runs `n_restarts` independent Lloyd
/// iterations from random initial centroids and keeps the configuration with
/// the lowest mean intra-cluster distance.
///
/// # Example
///
/// ```
/// use kmeans2d_rs::{KMeans, KMeansConfig, Point};
///
/// let samples: Vec<Point> = (0..100)
///     .map(|i| {
///         let offset = if i % 2 == 0 { -50.0 } else { 50.0 };
///         Point::new(offset + (i % 7) as f32, (i % 5) as f32)
///     })
///     .collect();
///
/// let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_restarts(10));
/// kmeans.fit(&samples).unwrap();
///
/// let labels = kmeans.predict(&samples).unwrap();
/// assert_eq!(labels.len(), 100);
/// ```
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Result of the last fit (None if not yet fitted)
    result: Option<KMeansResult>,
}

impl KMeans {
    /// Create a new KMeans instance with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> Self {
        assert!(k > 0, "k must be greater than 0");

        Self {
            config: KMeansConfig::new(k),
            result: None,
        }
    }

    /// Create a new KMeans instance with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is 0.
    pub fn with_config(config: KMeansConfig) -> Self {
        assert!(config.k > 0, "k must be greater than 0");

        Self {
            config,
            result: None,
        }
    }

    /// Fit the model to the samples.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Number of samples is less than k
    /// - The configuration is invalid
    /// - Every restart hit the iteration cap
    pub fn fit(&mut self, samples: &[Point]) -> Result<&mut Self> {
        self.result = Some(search(samples, &self.config)?);
        Ok(self)
    }

    /// Fit the model to an `(n_samples, 2)` array.
    pub fn fit_array(&mut self, data: &ArrayView2<f32>) -> Result<&mut Self> {
        let samples = points_from_array(data)?;
        self.fit(&samples)
    }

    /// Label each point with the index of its nearest fitted centroid.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::NotFitted`] if the model has not been fitted yet.
    pub fn predict(&self, points: &[Point]) -> Result<Vec<usize>> {
        let result = self.result.as_ref().ok_or(KMeansError::NotFitted)?;
        predict_labels(points, &result.centroids)
    }

    /// Label each row of an `(n_samples, 2)` array.
    pub fn predict_array(&self, data: &ArrayView2<f32>) -> Result<Array1<usize>> {
        let points = points_from_array(data)?;
        Ok(Array1::from(self.predict(&points)?))
    }

    /// Fit the model and label the samples in one call.
    pub fn fit_predict(&mut self, samples: &[Point]) -> Result<Vec<usize>> {
        self.fit(samples)?;
        self.predict(samples)
    }

    /// Get the centroids of the fitted model.
    pub fn centroids(&self) -> Option<&[Point]> {
        self.result.as_ref().map(|r| r.centroids.as_slice())
    }

    /// Get the centroids as a `(k, 2)` array.
    pub fn centroids_array(&self) -> Option<Array2<f32>> {
        self.centroids().map(points_to_array)
    }

    /// Get the samples assigned to each centroid.
    pub fn clusters(&self) -> Option<&[PointBuffer]> {
        self.result.as_ref().map(|r| r.clusters.as_slice())
    }

    /// Get the cost of the selected configuration.
    pub fn cost(&self) -> Option<f32> {
        self.result.as_ref().map(|r| r.cost)
    }

    /// Get the full result of the last fit.
    pub fn result(&self) -> Option<&KMeansResult> {
        self.result.as_ref()
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
