//! Batch-level averages for reporting.
//!
//! Nothing downstream depends on these numbers; the classifiers work from the
//! raw values. Rounding is applied only to the reported means.

use crate::track::{FeatureRecord, Track};
use serde::Serialize;

/// Averages over one batch. A metric is `None` when no input carried it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub track_count: usize,
    pub avg_tempo: Option<f64>,
    pub avg_energy: Option<f64>,
    pub avg_valence: Option<f64>,
    pub avg_danceability: Option<f64>,
    pub avg_popularity: Option<f64>,
}

impl Summary {
    /// Metric name / value pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> {
        [
            ("avg_tempo", self.avg_tempo),
            ("avg_energy", self.avg_energy),
            ("avg_valence", self.avg_valence),
            ("avg_danceability", self.avg_danceability),
            ("avg_popularity", self.avg_popularity),
        ]
        .into_iter()
    }
}

/// Summarize index-aligned features and tracks.
///
/// # Examples
///
/// ```
/// use vibe_mirror::summary::summarize;
///
/// let summary = summarize(&[], &[]);
/// assert_eq!(summary.track_count, 0);
/// assert!(summary.entries().all(|(_, value)| value.is_none()));
/// ```
#[must_use]
pub fn summarize(features: &[FeatureRecord], tracks: &[Track]) -> Summary {
    Summary {
        track_count: tracks.len(),
        avg_tempo: mean(features.iter().filter_map(|f| f.tempo)).map(|v| round_to(v, 2)),
        avg_energy: mean(features.iter().filter_map(|f| f.energy)).map(|v| round_to(v, 3)),
        avg_valence: mean(features.iter().filter_map(|f| f.valence)).map(|v| round_to(v, 3)),
        avg_danceability: mean(features.iter().filter_map(|f| f.danceability))
            .map(|v| round_to(v, 3)),
        avg_popularity: mean(tracks.iter().map(Track::popularity)).map(|v| round_to(v, 1)),
    }
}

/// Arithmetic mean, `None` for an empty iterator.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    #[allow(clippy::cast_precision_loss)]
    let count_f = count as f64;
    (count > 0).then(|| sum / count_f)
}

/// Round half to even at `decimals` places.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::fixtures;

    #[test]
    fn test_empty_batch_reports_absence() {
        let summary = summarize(&[], &[]);

        assert_eq!(summary, Summary::default());
        assert_eq!(summary.entries().count(), 5);
    }

    #[test]
    fn test_means_and_rounding() {
        let tracks = fixtures::tracks(&[50, 51, 51]);
        let features = vec![
            fixtures::features("t0", 0.5, 0.1234, 0.2, 120.111, 0.0),
            fixtures::features("t1", 0.6, 0.1234, 0.3, 120.111, 0.0),
            fixtures::features("t2", 0.7, 0.1234, 0.4, 120.111, 0.0),
        ];

        let summary = summarize(&features, &tracks);

        assert_eq!(summary.track_count, 3);
        assert_eq!(summary.avg_tempo, Some(120.11));
        assert_eq!(summary.avg_energy, Some(0.123));
        assert_eq!(summary.avg_valence, Some(0.3));
        assert_eq!(summary.avg_danceability, Some(0.6));
        assert_eq!(summary.avg_popularity, Some(50.7));
    }

    #[test]
    fn test_halves_round_to_even() {
        let tracks = fixtures::tracks(&[50, 50, 50, 51]);
        let features: Vec<FeatureRecord> = tracks
            .iter()
            .map(|t| fixtures::features(&t.id, 0.5, 0.5, 0.5, 100.125, 0.5))
            .collect();

        let summary = summarize(&features, &tracks);

        assert_eq!(summary.avg_popularity, Some(50.2));
        assert_eq!(summary.avg_tempo, Some(100.12));
        assert_eq!(round_to(50.35, 1), 50.4);
        assert_eq!(round_to(0.0625, 3), 0.062);
    }

    #[test]
    fn test_missing_metric_is_absent_not_zero() {
        let tracks = fixtures::tracks(&[10, 20]);
        let features = vec![
            FeatureRecord { id: "t0".into(), energy: Some(0.4), ..Default::default() },
            FeatureRecord { id: "t1".into(), energy: None, ..Default::default() },
        ];

        let summary = summarize(&features, &tracks);

        assert_eq!(summary.avg_tempo, None);
        assert_eq!(summary.avg_energy, Some(0.4));
        assert_eq!(summary.avg_popularity, Some(15.0));
    }

    #[test]
    fn test_mean_helper() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([1.0, 2.0, 3.0].into_iter()), Some(2.0));
    }
}
