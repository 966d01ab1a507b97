//! Two-cluster labeler over audio features.
//!
//! 1. Build one vector per track from the configured attributes, dropping
//!    records that miss any of them.
//! 2. Below two vectors, defer to [`crate::popularity`] on the full batch.
//! 3. Z-score each column, then split into two clusters with [`crate::kmeans`].
//! 4. Compare mean popularity of the clusters:
//!    - gap below `popularity_gap`: "Mixed", nearest-centroid distance ranking
//!    - otherwise the more popular cluster is "Mainstream" unless the other
//!      cluster is strictly larger, in which case the batch is "Niche"; the
//!      chosen cluster leads, followed by the remaining tracks in order
//!
//! How feature rows are paired with tracks is controlled by [`Alignment`].

use log::debug;
use std::collections::{HashMap, HashSet};

use crate::config::{Alignment, VibeConfig, DEFAULT_CONFIG};
use crate::kmeans::{self, KMeansFit, KMeansParams};
use crate::popularity::label_by_popularity_with;
use crate::summary::mean;
use crate::track::{FeatureKind, FeatureRecord, Track};
use crate::vibe::{RankedIndices, VibeLabel};

/// Complete feature rows plus the record index each came from.
#[derive(Debug, Clone, Default)]
struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
    sources: Vec<usize>,
}

/// Label a batch by clustering, using the default configuration.
#[must_use]
pub fn label_by_clusters(features: &[FeatureRecord], tracks: &[Track]) -> (VibeLabel, RankedIndices) {
    label_by_clusters_with(features, tracks, &DEFAULT_CONFIG)
}

/// Label a batch by clustering.
#[must_use]
pub fn label_by_clusters_with(
    features: &[FeatureRecord],
    tracks: &[Track],
    config: &VibeConfig,
) -> (VibeLabel, RankedIndices) {
    let cluster_config = &config.cluster;
    let mut matrix = build_matrix(features, &cluster_config.features);

    if matrix.rows.len() < 2 {
        debug!(
            "Only {} complete feature vectors, falling back to popularity labeler",
            matrix.rows.len()
        );
        return label_by_popularity_with(tracks, config);
    }

    standardize(&mut matrix.rows, cluster_config.std_epsilon);

    let Some(fit) = kmeans::fit(&matrix.rows, 2, &KMeansParams::from(cluster_config)) else {
        return label_by_popularity_with(tracks, config);
    };

    let positions = track_positions(&matrix, features, tracks, cluster_config.alignment);
    let distances: Vec<f64> = matrix
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| fit.distance_to_assigned(row, i))
        .collect();

    let sizes = fit.cluster_sizes();
    let means = cluster_popularity(&fit, &positions, tracks);
    debug!(
        "Clusters: sizes {sizes:?}, mean popularity {means:?}, {} iterations, inertia {:.4}",
        fit.iterations, fit.inertia
    );

    let (label, ranked) = match (means[0], means[1]) {
        (Some(a), Some(b)) if (a - b).abs() >= cluster_config.popularity_gap => {
            let main = usize::from(b > a);
            let other = 1 - main;
            let (label, chosen) = if sizes[other] > sizes[main] {
                (VibeLabel::Niche, other)
            } else {
                (VibeLabel::Mainstream, main)
            };
            let track_count = (cluster_config.alignment == Alignment::ById).then_some(tracks.len());
            (label, rank_cluster_first(&fit, &distances, &positions, chosen, track_count))
        }
        _ => (VibeLabel::Mixed, rank_by_distance(&distances, &positions)),
    };

    debug!("Cluster labeler -> {label} ({} ranked)", ranked.len());
    (label, dedup(ranked, tracks.len()))
}

fn build_matrix(features: &[FeatureRecord], kinds: &[FeatureKind]) -> FeatureMatrix {
    let mut matrix = FeatureMatrix::default();
    for (i, record) in features.iter().enumerate() {
        let row: Option<Vec<f64>> = kinds.iter().map(|&kind| record.get(kind)).collect();
        if let Some(row) = row {
            matrix.rows.push(row);
            matrix.sources.push(i);
        }
    }
    matrix
}

/// Per-column `(x - mean) / (std + epsilon)` with population std.
fn standardize(rows: &mut [Vec<f64>], epsilon: f64) {
    let Some(dims) = rows.first().map(Vec::len) else {
        return;
    };
    #[allow(clippy::cast_precision_loss)]
    let n = rows.len() as f64;

    for col in 0..dims {
        let mean = rows.iter().map(|r| r[col]).sum::<f64>() / n;
        let variance = rows.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
        let scale = variance.sqrt() + epsilon;
        for row in rows.iter_mut() {
            row[col] = (row[col] - mean) / scale;
        }
    }
}

/// Track position paired with each feature row.
fn track_positions(
    matrix: &FeatureMatrix,
    features: &[FeatureRecord],
    tracks: &[Track],
    alignment: Alignment,
) -> Vec<usize> {
    match alignment {
        Alignment::Positional => (0..matrix.rows.len()).collect(),
        Alignment::ById => {
            let by_id: HashMap<&str, usize> = tracks
                .iter()
                .enumerate()
                .map(|(i, t)| (t.id.as_str(), i))
                .collect();
            matrix
                .sources
                .iter()
                .map(|&source| {
                    by_id
                        .get(features[source].id.as_str())
                        .copied()
                        .unwrap_or(source)
                })
                .collect()
        }
    }
}

/// Mean popularity per cluster; `None` for a cluster with no matched track.
fn cluster_popularity(fit: &KMeansFit, positions: &[usize], tracks: &[Track]) -> [Option<f64>; 2] {
    let mut means = [None, None];
    for (cluster, slot) in means.iter_mut().enumerate() {
        *slot = mean(
            fit.assignments
                .iter()
                .zip(positions)
                .filter(|(c, _)| **c == cluster)
                .filter_map(|(_, &pos)| tracks.get(pos))
                .map(Track::popularity),
        );
    }
    means
}

fn rank_by_distance(distances: &[f64], positions: &[usize]) -> RankedIndices {
    let mut rows: Vec<usize> = (0..distances.len()).collect();
    rows.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
    rows.into_iter().map(|r| positions[r]).collect()
}

/// Members of `chosen` closest-first, then the rest in original order.
///
/// With `track_count` the rest is every track position not ranked yet, so a
/// track without a complete feature vector keeps its place. Without it the
/// rest is the other clustered rows.
fn rank_cluster_first(
    fit: &KMeansFit,
    distances: &[f64],
    positions: &[usize],
    chosen: usize,
    track_count: Option<usize>,
) -> RankedIndices {
    let (mut members, others): (Vec<usize>, Vec<usize>) =
        (0..distances.len()).partition(|&r| fit.assignments[r] == chosen);
    members.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));

    let head: RankedIndices = members.into_iter().map(|r| positions[r]).collect();
    let rest: RankedIndices = match track_count {
        Some(count) => {
            let taken: HashSet<usize> = head.iter().copied().collect();
            (0..count).filter(|p| !taken.contains(p)).collect()
        }
        None => others.into_iter().map(|r| positions[r]).collect(),
    };

    head.into_iter().chain(rest).collect()
}

/// Drop repeats and positions that do not name a track.
fn dedup(ranked: RankedIndices, track_count: usize) -> RankedIndices {
    let mut seen = HashSet::with_capacity(ranked.len());
    ranked
        .into_iter()
        .filter(|&i| i < track_count && seen.insert(i))
        .collect()
}
