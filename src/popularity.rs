//! Popularity-threshold labeler.
//!
//! Looks only at the popularity of each track:
//!
//! ```text
//! mean > mainstream_threshold  => Mainstream, most popular first
//! mean > niche_threshold       => Mixed, closest to the median first
//! otherwise                    => Niche, least popular first
//! ```
//!
//! All orderings are stable, so equal keys keep their original order.

use log::debug;

use crate::config::{VibeConfig, DEFAULT_CONFIG};
use crate::track::Track;
use crate::vibe::{RankedIndices, VibeLabel};

/// Label a batch from popularity alone, using the default thresholds.
#[must_use]
pub fn label_by_popularity(tracks: &[Track]) -> (VibeLabel, RankedIndices) {
    label_by_popularity_with(tracks, &DEFAULT_CONFIG)
}

/// Label a batch from popularity alone.
///
/// An empty batch has mean 0 and is therefore "Niche" with an empty ranking.
#[must_use]
pub fn label_by_popularity_with(tracks: &[Track], config: &VibeConfig) -> (VibeLabel, RankedIndices) {
    let pops: Vec<f64> = tracks.iter().map(Track::popularity).collect();
    let mean = crate::summary::mean(pops.iter().copied()).unwrap_or(0.0);
    let mut ranked: RankedIndices = (0..pops.len()).collect();

    let label = if mean > config.mainstream_threshold {
        ranked.sort_by(|&a, &b| pops[b].total_cmp(&pops[a]));
        VibeLabel::Mainstream
    } else if mean > config.niche_threshold {
        let mid = median(&pops);
        ranked.sort_by(|&a, &b| (pops[a] - mid).abs().total_cmp(&(pops[b] - mid).abs()));
        VibeLabel::Mixed
    } else {
        ranked.sort_by(|&a, &b| pops[a].total_cmp(&pops[b]));
        VibeLabel::Niche
    };

    debug!("Popularity labeler: mean {mean:.2} over {} tracks -> {label}", pops.len());
    (label, ranked)
}

/// Median, averaging the two middle values for even lengths.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    match sorted.len() % 2 {
        0 => (sorted[mid - 1] + sorted[mid]) / 2.0,
        _ => sorted[mid],
    }
}
