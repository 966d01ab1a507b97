//! Seeded k-means over dense `f64` rows.
//!
//! Restart `r` draws its k-means++ initialisation from `seed + r`, so a fit is
//! fully determined by its input and parameters. Restarts run on the rayon
//! pool; the lowest-inertia run wins, earliest restart on ties.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::ClusterConfig;

/// Knobs for a single [`fit`] call.
#[derive(Debug, Clone, Copy)]
pub struct KMeansParams {
    pub seed: u64,
    pub restarts: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl From<&ClusterConfig> for KMeansParams {
    fn from(config: &ClusterConfig) -> Self {
        Self {
            seed: config.seed,
            restarts: config.restarts,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }
}

/// Result of a k-means fit.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    pub centroids: Vec<Vec<f64>>,
    /// Cluster of each input row, always its nearest centroid.
    pub assignments: Vec<usize>,
    /// Sum of squared distances to assigned centroids.
    pub inertia: f64,
    pub iterations: usize,
}

impl KMeansFit {
    /// Euclidean distance from `row` to its assigned centroid.
    #[must_use]
    pub fn distance_to_assigned(&self, row: &[f64], index: usize) -> f64 {
        squared_distance(row, &self.centroids[self.assignments[index]]).sqrt()
    }

    /// Number of rows per cluster.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &cluster in &self.assignments {
            sizes[cluster] += 1;
        }
        sizes
    }
}

/// Partition `rows` into `k` clusters.
///
/// Returns `None` when there are fewer rows than clusters, `k` is zero, or
/// the rows have inconsistent widths.
#[must_use]
pub fn fit(rows: &[Vec<f64>], k: usize, params: &KMeansParams) -> Option<KMeansFit> {
    if k == 0 || rows.len() < k {
        return None;
    }
    let dims = rows[0].len();
    if rows.iter().any(|row| row.len() != dims) {
        return None;
    }

    let runs: Vec<KMeansFit> = (0..params.restarts.max(1))
        .into_par_iter()
        .map(|restart| fit_single(rows, k, params, params.seed.wrapping_add(restart as u64)))
        .collect();

    runs.into_iter().min_by(|a, b| a.inertia.total_cmp(&b.inertia))
}

fn fit_single(rows: &[Vec<f64>], k: usize, params: &KMeansParams, seed: u64) -> KMeansFit {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = kmeans_plus_plus(rows, k, &mut rng);
    let dims = rows[0].len();

    let mut iterations = 0;
    let mut prev_inertia = f64::MAX;

    for iter in 0..params.max_iterations {
        iterations = iter + 1;
        let assignments = assign(rows, &centroids);

        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (row, &cluster) in rows.iter().zip(&assignments) {
            counts[cluster] += 1;
            for (sum, value) in sums[cluster].iter_mut().zip(row) {
                *sum += value;
            }
        }

        for (cluster, centroid) in sums.iter_mut().enumerate() {
            if counts[cluster] > 0 {
                #[allow(clippy::cast_precision_loss)]
                let count = counts[cluster] as f64;
                centroid.iter_mut().for_each(|v| *v /= count);
            } else {
                // Empty cluster: re-seed from a random row.
                *centroid = rows[rng.gen_range(0..rows.len())].clone();
            }
        }

        let inertia: f64 = rows
            .iter()
            .zip(&assignments)
            .map(|(row, &cluster)| squared_distance(row, &sums[cluster]))
            .sum();
        centroids = sums;

        trace!("seed {seed} iteration {iterations}: inertia {inertia:.6}");
        if (prev_inertia - inertia).abs() < params.tolerance {
            break;
        }
        prev_inertia = inertia;
    }

    let assignments = assign(rows, &centroids);
    let inertia = rows
        .iter()
        .zip(&assignments)
        .map(|(row, &cluster)| squared_distance(row, &centroids[cluster]))
        .sum();

    KMeansFit {
        centroids,
        assignments,
        inertia,
        iterations,
    }
}

/// k-means++ seeding: first centroid uniform, the rest weighted by squared
/// distance to the nearest centroid chosen so far.
fn kmeans_plus_plus(rows: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(rows[rng.gen_range(0..rows.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = rows
            .iter()
            .map(|row| {
                centroids
                    .iter()
                    .map(|c| squared_distance(row, c))
                    .fold(f64::MAX, f64::min)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            centroids.push(rows[rng.gen_range(0..rows.len())].clone());
            continue;
        }

        let threshold = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        let mut selected = rows.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if cumulative >= threshold && *w > 0.0 {
                selected = i;
                break;
            }
        }
        centroids.push(rows[selected].clone());
    }

    centroids
}

fn assign(rows: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    rows.iter().map(|row| nearest_centroid(row, centroids)).collect()
}

/// Index of the closest centroid; lowest index wins ties.
fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(row, centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

pub(crate) fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}
