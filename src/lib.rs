//! # kmeans2d-rs
//!
//! Lloyd's k-means clustering over 2D points, with a multi-restart search
//! that keeps the lowest-cost configuration.
//!
//! ## Features
//!
//! - **Explicit Lloyd steps**: [`assign`] (expectation), [`update`]
//!   (maximization), [`cluster`] (loop to a fixed point) and [`cost`] are all
//!   public, so callers can drive or inspect each phase
//! - **Multi-restart search**: [`search`] runs independent random restarts and
//!   keeps the one with the lowest mean intra-cluster distance
//! - **Deterministic**: every random draw comes from a seeded `ChaCha8Rng`
//! - **Parallel restarts**: optionally spread restarts over rayon's thread pool
//!   with results identical to a serial run
//! - **ndarray compatible**: fit and predict on `(n, 2)` arrays
//!
//! ## Example
//!
//! ```rust
//! use kmeans2d_rs::{KMeans, KMeansConfig, Point};
//!
//! let origins = [(-100.0f32, -50.0f32), (100.0, -50.0), (-100.0, 50.0), (100.0, 50.0)];
//! let samples: Vec<Point> = origins
//!     .iter()
//!     .flat_map(|&(x, y)| (0..25).map(move |i| Point::new(x + (i % 5) as f32, y + (i / 5) as f32)))
//!     .collect();
//!
//! let config = KMeansConfig::new(4)
//!     .with_threshold(0.15)
//!     .with_restarts(20)
//!     .with_seed(42);
//!
//! let mut kmeans = KMeans::with_config(config);
//! kmeans.fit(&samples).unwrap();
//!
//! let clusters = kmeans.clusters().unwrap();
//! assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 100);
//! ```
//!
//! ## Driving the steps by hand
//!
//! ```rust
//! use kmeans2d_rs::{assign, cost, update, Point, PointBuffer};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let samples = vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(10.0, 10.0)];
//! let mut centroids = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
//! let mut clusters = vec![PointBuffer::new(); 2];
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//!
//! assign(&mut clusters, &centroids, &samples).unwrap();
//! let delta = update(&clusters, &mut centroids, &samples, &mut rng);
//! assert_eq!(delta, 1.0);
//! assert_eq!(cost(&clusters, &centroids), 0.5);
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod kmeans;
mod point;

pub use algorithm::{
    assign, cluster, cost, predict_labels, search, step, update, ConvergenceOutcome, KMeansResult,
    StepOutcome,
};
pub use config::KMeansConfig;
pub use distance::{euclidean_distance, nearest_centroid};
pub use error::{KMeansError, Result};
pub use kmeans::KMeans;
pub use point::{points_from_array, points_to_array, Point, PointBuffer, MIN_CAPACITY};
