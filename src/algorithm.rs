use crate::config::KMeansConfig;
use crate::distance::{euclidean_distance, nearest_centroid};
use crate::error::{KMeansError, Result};
use crate::point::{Point, PointBuffer};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Result of the multi-restart k-means search
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Centroids of the lowest-cost restart
    pub centroids: Vec<Point>,
    /// Samples assigned to each centroid, recomputed from `centroids`
    pub clusters: Vec<PointBuffer>,
    /// Cost of the winning restart
    pub cost: f32,
    /// Index of the winning restart
    pub best_restart: usize,
    /// Steps the winning restart needed to converge
    pub n_iterations: usize,
    /// Cost of every restart in order, `None` for restarts that were discarded
    pub restart_costs: Vec<Option<f32>>,
}

/// Outcome of a single assignment + update step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Summed displacement of the centroids that had members
    pub delta: f32,
    /// Clusters that came out of the assignment empty and were reseeded
    pub empty_clusters: usize,
}

/// Outcome of a converged [`cluster`] run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceOutcome {
    pub iterations: usize,
    pub delta: f32,
    /// Clusters the final step found empty (their centroids were reseeded)
    pub empty_clusters: usize,
}

#[derive(Debug, Clone)]
struct RestartOutcome {
    centroids: Vec<Point>,
    cost: f32,
    iterations: usize,
}

/// Assign every sample to the cluster of its nearest centroid.
///
/// All buffers are cleared first, so afterwards each sample sits in exactly
/// one of them. Ties go to the lowest centroid index.
///
/// # Panics
///
/// Panics if `clusters` and `centroids` differ in length.
pub fn assign(clusters: &mut [PointBuffer], centroids: &[Point], samples: &[Point]) -> Result<()> {
    assert_eq!(
        clusters.len(),
        centroids.len(),
        "one cluster buffer is needed per centroid"
    );

    for cluster in clusters.iter_mut() {
        cluster.clear();
    }

    for &sample in samples {
        let label = nearest_centroid(sample, centroids)
            .ok_or_else(|| KMeansError::InvalidK("k must be greater than 0".to_string()))?;
        clusters[label].push(sample)?;
    }

    Ok(())
}

/// Move each centroid to the mean of its cluster and return the summed displacement.
///
/// A centroid whose cluster is empty is reseeded onto a random sample and
/// does not count towards the returned delta.
///
/// # Panics
///
/// Panics if `clusters` and `centroids` differ in length.
pub fn update<R: Rng + ?Sized>(
    clusters: &[PointBuffer],
    centroids: &mut [Point],
    samples: &[Point],
    rng: &mut R,
) -> f32 {
    assert_eq!(
        clusters.len(),
        centroids.len(),
        "one cluster buffer is needed per centroid"
    );

    let mut delta = 0.0f32;

    for (cluster_idx, (cluster, centroid)) in clusters.iter().zip(centroids.iter_mut()).enumerate()
    {
        match cluster.mean() {
            Some(mean) => {
                delta += euclidean_distance(mean, *centroid);
                *centroid = mean;
            }
            None => {
                if samples.is_empty() {
                    continue;
                }
                let sample_idx = rng.gen_range(0..samples.len());
                trace!(cluster = cluster_idx, sample = sample_idx, "reseeding empty cluster");
                *centroid = samples[sample_idx];
            }
        }
    }

    delta
}

/// One Lloyd iteration: expectation ([`assign`]) followed by maximization ([`update`]).
pub fn step<R: Rng + ?Sized>(
    clusters: &mut [PointBuffer],
    centroids: &mut [Point],
    samples: &[Point],
    rng: &mut R,
) -> Result<StepOutcome> {
    assign(clusters, centroids, samples)?;
    let empty_clusters = clusters.iter().filter(|c| c.is_empty()).count();
    let delta = update(clusters, centroids, samples, rng);

    Ok(StepOutcome {
        delta,
        empty_clusters,
    })
}

/// Repeat [`step`] until the centroid delta is at or below `threshold`.
///
/// At least one step always runs. Reseeded clusters do not contribute to the
/// delta, so the loop may stop with empty buffers left in `clusters`; the
/// count is reported in [`ConvergenceOutcome::empty_clusters`].
/// With `max_iters` set, reaching the cap first yields [`KMeansError::NotConverged`].
pub fn cluster<R: Rng + ?Sized>(
    clusters: &mut [PointBuffer],
    centroids: &mut [Point],
    samples: &[Point],
    threshold: f32,
    max_iters: Option<usize>,
    rng: &mut R,
) -> Result<ConvergenceOutcome> {
    let mut iterations = 0;

    loop {
        let outcome = step(clusters, centroids, samples, rng)?;
        iterations += 1;

        trace!(
            iteration = iterations,
            delta = outcome.delta,
            empty_clusters = outcome.empty_clusters,
            "k-means step"
        );

        if outcome.delta <= threshold {
            return Ok(ConvergenceOutcome {
                iterations,
                delta: outcome.delta,
                empty_clusters: outcome.empty_clusters,
            });
        }

        if let Some(max_iters) = max_iters {
            if iterations >= max_iters {
                return Err(KMeansError::NotConverged {
                    iterations,
                    delta: outcome.delta,
                });
            }
        }
    }
}

/// Mean intra-cluster distance, averaged over all clusters.
///
/// # Panics
///
/// Panics if any cluster is empty. [`search`] only scores restarts whose
/// clusters are all populated.
pub fn cost(clusters: &[PointBuffer], centroids: &[Point]) -> f32 {
    assert_eq!(clusters.len(), centroids.len());
    let k = clusters.len();

    let total: f32 = clusters
        .iter()
        .zip(centroids)
        .enumerate()
        .map(|(cluster_idx, (cluster, &centroid))| {
            assert!(
                !cluster.is_empty(),
                "cluster {} is empty at cost evaluation",
                cluster_idx
            );
            let dist_sum: f32 = cluster
                .iter()
                .map(|&point| euclidean_distance(point, centroid))
                .sum();
            dist_sum / cluster.len() as f32
        })
        .sum();

    total / k as f32
}

/// Run the convergence loop from several random initializations and keep
/// the configuration with the lowest cost.
///
/// Every restart gets its own RNG seeded from `config.seed` in restart order,
/// so serial and parallel runs give identical results.
pub fn search(samples: &[Point], config: &KMeansConfig) -> Result<KMeansResult> {
    config.validate_samples(samples)?;

    let start = Instant::now();
    debug!(
        n_samples = samples.len(),
        k = config.k,
        n_restarts = config.n_restarts,
        threshold = config.threshold,
        parallel = config.parallel,
        "starting k-means search"
    );

    let mut master_rng = ChaCha8Rng::seed_from_u64(config.seed);
    let seeds: Vec<u64> = (0..config.n_restarts)
        .map(|_| master_rng.next_u64())
        .collect();

    let outcomes: Vec<Result<RestartOutcome>> = if config.parallel {
        seeds
            .par_iter()
            .map(|&seed| run_restart(samples, config, seed))
            .collect()
    } else {
        seeds
            .iter()
            .map(|&seed| run_restart(samples, config, seed))
            .collect()
    };

    let mut min_cost = f32::INFINITY;
    let mut best: Option<(usize, RestartOutcome)> = None;
    let mut restart_costs = Vec::with_capacity(outcomes.len());
    let mut last_error = None;

    for (restart, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(outcome) => {
                debug!(
                    restart,
                    cost = outcome.cost,
                    iterations = outcome.iterations,
                    "restart converged"
                );
                restart_costs.push(Some(outcome.cost));
                if outcome.cost < min_cost {
                    debug!(restart, cost = outcome.cost, "accepting new best k-means solution");
                    min_cost = outcome.cost;
                    best = Some((restart, outcome));
                }
            }
            Err(
                err @ (KMeansError::NotConverged { .. }
                | KMeansError::DegenerateClusters { .. }),
            ) => {
                warn!(restart, error = %err, "discarding restart");
                restart_costs.push(None);
                last_error = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    let Some((best_restart, best)) = best else {
        return Err(last_error.unwrap_or_else(|| {
            KMeansError::InvalidData("no restart produced a finite cost".to_string())
        }));
    };

    let mut clusters = vec![PointBuffer::new(); config.k];
    assign(&mut clusters, &best.centroids, samples)?;

    info!(
        best_restart,
        cost = best.cost,
        iterations = best.iterations,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "k-means search finished"
    );

    Ok(KMeansResult {
        centroids: best.centroids,
        clusters,
        cost: best.cost,
        best_restart,
        n_iterations: best.iterations,
        restart_costs,
    })
}

/// Label each point with the index of its nearest centroid
pub fn predict_labels(points: &[Point], centroids: &[Point]) -> Result<Vec<usize>> {
    points
        .iter()
        .map(|&point| {
            nearest_centroid(point, centroids)
                .ok_or_else(|| KMeansError::InvalidK("k must be greater than 0".to_string()))
        })
        .collect()
}

/// Pick `k` initial centroids, each a uniformly random sample.
/// Different centroids may land on the same sample.
fn initialize_centroids<R: Rng + ?Sized>(samples: &[Point], k: usize, rng: &mut R) -> Vec<Point> {
    (0..k)
        .map(|_| samples[rng.gen_range(0..samples.len())])
        .collect()
}

fn run_restart(samples: &[Point], config: &KMeansConfig, seed: u64) -> Result<RestartOutcome> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut centroids = initialize_centroids(samples, config.k, &mut rng);
    let mut clusters = vec![PointBuffer::new(); config.k];

    let convergence = cluster(
        &mut clusters,
        &mut centroids,
        samples,
        config.threshold,
        config.max_iters,
        &mut rng,
    )?;

    // The last step reseeded some centroids; score the assignment they produce
    if convergence.empty_clusters > 0 {
        assign(&mut clusters, &centroids, samples)?;
        let empty = clusters.iter().filter(|c| c.is_empty()).count();
        if empty > 0 {
            return Err(KMeansError::DegenerateClusters { empty });
        }
    }

    Ok(RestartOutcome {
        cost: cost(&clusters, &centroids),
        centroids,
        iterations: convergence.iterations,
    })
}
