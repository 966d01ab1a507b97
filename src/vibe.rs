//! Vibe labels and the dispatcher choosing which labeler runs.
//!
//! Two strategies exist: the popularity heuristic in [`crate::popularity`]
//! and the two-cluster labeler in [`crate::cluster`]. Which one runs is a
//! pure function of the requested [`VibeMode`] and the batch size.

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{VibeConfig, DEFAULT_CONFIG};
use crate::track::{FeatureRecord, Track};
use crate::{cluster, popularity};

/// Positions into a track slice, most representative first. Never repeats.
pub type RankedIndices = Vec<usize>;

/// Coarse taste category of a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VibeLabel {
    Mainstream,
    Mixed,
    Niche,
}

impl VibeLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainstream => "Mainstream",
            Self::Mixed => "Mixed",
            Self::Niche => "Niche",
        }
    }
}

impl fmt::Display for VibeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested labeling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibeMode {
    /// Always use the popularity heuristic
    Popularity,
    /// Always cluster audio features
    Kmeans,
    /// Cluster large batches, use popularity for small ones
    #[default]
    Auto,
}

/// The labeler actually run for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Popularity,
    Cluster,
}

/// Pick a strategy for `track_count` tracks.
#[must_use]
pub const fn choose_strategy(mode: VibeMode, track_count: usize, cluster_min_tracks: usize) -> Strategy {
    match mode {
        VibeMode::Popularity => Strategy::Popularity,
        VibeMode::Kmeans => Strategy::Cluster,
        VibeMode::Auto if track_count >= cluster_min_tracks => Strategy::Cluster,
        VibeMode::Auto => Strategy::Popularity,
    }
}

/// Classify a batch with the default configuration.
///
/// # Examples
///
/// ```
/// use vibe_mirror::vibe::{decide_vibe, VibeLabel, VibeMode};
/// use vibe_mirror::track::Track;
///
/// let tracks: Vec<Track> = [90, 85, 80]
///     .iter()
///     .enumerate()
///     .map(|(i, &popularity)| Track {
///         id: format!("t{i}"),
///         name: format!("Song {i}"),
///         artist: String::new(),
///         popularity,
///         uri: String::new(),
///     })
///     .collect();
///
/// let (label, ranked) = decide_vibe(&[], &tracks, VibeMode::Auto);
/// assert_eq!(label, VibeLabel::Mainstream);
/// assert_eq!(ranked, vec![0, 1, 2]);
/// ```
#[must_use]
pub fn decide_vibe(features: &[FeatureRecord], tracks: &[Track], mode: VibeMode) -> (VibeLabel, RankedIndices) {
    decide_vibe_with(features, tracks, mode, &DEFAULT_CONFIG)
}

/// Classify a batch with an explicit configuration.
#[must_use]
pub fn decide_vibe_with(
    features: &[FeatureRecord],
    tracks: &[Track],
    mode: VibeMode,
    config: &VibeConfig,
) -> (VibeLabel, RankedIndices) {
    let strategy = choose_strategy(mode, tracks.len(), config.auto_cluster_min_tracks);
    debug!("Mode {mode:?} with {} tracks -> {strategy:?} strategy", tracks.len());

    match strategy {
        Strategy::Popularity => popularity::label_by_popularity_with(tracks, config),
        Strategy::Cluster => cluster::label_by_clusters_with(features, tracks, config),
    }
}
