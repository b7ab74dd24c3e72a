//! Demo generating random 2D clusters and recovering them with k-means
//!
//! Run with: cargo run --example clusters --release
//! Set RUST_LOG=debug to see per-restart costs.

use kmeans2d_rs::{KMeans, KMeansConfig, Point};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Settings for the synthetic sample set
struct DemoConfig {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
    /// Largest offset of a sample from its cluster origin on either axis
    max_deviation: f32,
    n_clusters: usize,
    cluster_size: usize,
    n_restarts: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            min_x: -200.0,
            max_x: 200.0,
            min_y: -100.0,
            max_y: 100.0,
            max_deviation: 15.0,
            n_clusters: 4,
            cluster_size: 150,
            n_restarts: 50,
        }
    }
}

impl DemoConfig {
    fn threshold(&self) -> f32 {
        let x_range = self.max_x - self.min_x;
        let y_range = self.max_y - self.min_y;
        (x_range + y_range) / 2.0 * 0.0001
    }
}

/// Scatter `cluster_size` points around a random origin.
fn generate_cluster(config: &DemoConfig, rng: &mut ChaCha8Rng) -> (Point, Vec<Point>) {
    let dev = config.max_deviation;
    let origin = Point::new(
        rng.gen_range(config.min_x + dev..config.max_x - dev),
        rng.gen_range(config.min_y + dev..config.max_y - dev),
    );

    let points = (0..config.cluster_size)
        .map(|_| {
            Point::new(
                origin.x + rng.gen_range(-dev..dev),
                origin.y + rng.gen_range(-dev..dev),
            )
        })
        .collect();

    (origin, points)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== kmeans2d-rs demo ===\n");

    let demo = DemoConfig::default();
    let seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut samples = Vec::with_capacity(demo.n_clusters * demo.cluster_size);
    println!("True cluster origins:");
    for i in 0..demo.n_clusters {
        let (origin, points) = generate_cluster(&demo, &mut rng);
        println!("  Cluster {}: ({:.2}, {:.2})", i, origin.x, origin.y);
        samples.extend(points);
    }
    println!();

    let config = KMeansConfig::new(demo.n_clusters)
        .with_threshold(demo.threshold())
        .with_restarts(demo.n_restarts)
        .with_seed(seed)
        .with_parallel(true);

    println!(
        "Running k-means with k={}, threshold={:.4}, {} restarts...\n",
        config.k, config.threshold, config.n_restarts
    );

    let mut kmeans = KMeans::with_config(config);
    kmeans.fit(&samples)?;

    let result = kmeans.result().ok_or("No result after fitting")?;
    println!(
        "Best restart: {} (cost {:.4}, {} iterations)\n",
        result.best_restart, result.cost, result.n_iterations
    );

    println!("Learned centroids:");
    for (i, (centroid, cluster)) in result.centroids.iter().zip(&result.clusters).enumerate() {
        println!(
            "  Centroid {}: ({:.4}, {:.4}) with {} samples ({:.1}%)",
            i,
            centroid.x,
            centroid.y,
            cluster.len(),
            cluster.len() as f64 / samples.len() as f64 * 100.0
        );
    }

    println!("\n=== Done! ===");
    Ok(())
}
