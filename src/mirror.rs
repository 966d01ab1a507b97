//! # Mirror Playlist Planning
//!
//! Pure helpers around the classifier that prepare input for it and shape
//! its output for the music service:
//!
//! - [`extract_playlist_id`] accepts a share URL, a URI or a bare identifier
//! - [`align_by_id`] pairs fetched tracks with their feature records
//! - [`check_size`] enforces the playlist size cap
//! - [`MirrorPlan`] is the playlist to create: name, description and URIs
//! - [`build_report`] runs the whole pipeline over a [`PlaylistExport`]
//!
//! Nothing here talks to the network; the plan is handed to whatever client
//! performs the creation and insertion calls.

use anyhow::{bail, Result};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::{ServiceLimits, VibeConfig};
use crate::export::PlaylistExport;
use crate::selector::select_tracks;
use crate::summary::{summarize, Summary};
use crate::track::{FeatureRecord, Track};
use crate::vibe::{decide_vibe_with, VibeLabel, VibeMode};

const URL_MARKER: &str = "playlist/";
const URI_PREFIX: &str = "spotify:playlist:";

/// Extract a playlist identifier from user input.
///
/// ```
/// use vibe_mirror::mirror::extract_playlist_id;
///
/// assert_eq!(extract_playlist_id("https://open.spotify.com/playlist/37i9?si=abc"), "37i9");
/// assert_eq!(extract_playlist_id("spotify:playlist:37i9"), "37i9");
/// assert_eq!(extract_playlist_id("  37i9 "), "37i9");
/// ```
#[must_use]
pub fn extract_playlist_id(input: &str) -> &str {
    let s = input.trim();

    if let Some((_, tail)) = s.split_once(URL_MARKER) {
        return tail.split('?').next().unwrap_or(tail);
    }
    if s.starts_with(URI_PREFIX) {
        return s.rsplit(':').next().unwrap_or(s);
    }
    s
}

/// Keep only tracks that have a feature record with the same identifier.
///
/// The returned sequences are index-aligned and in track order.
#[must_use]
pub fn align_by_id(tracks: &[Track], features: &[FeatureRecord]) -> (Vec<Track>, Vec<FeatureRecord>) {
    let by_id: HashMap<&str, &FeatureRecord> = features.iter().map(|f| (f.id.as_str(), f)).collect();

    let (aligned_tracks, aligned_features): (Vec<Track>, Vec<FeatureRecord>) = tracks
        .iter()
        .filter_map(|t| by_id.get(t.id.as_str()).map(|&f| (t.clone(), f.clone())))
        .unzip();

    let dropped = tracks.len() - aligned_tracks.len();
    if dropped > 0 {
        warn!("{dropped} of {} tracks have no audio features and were skipped", tracks.len());
    }
    (aligned_tracks, aligned_features)
}

/// Refuse playlists above the configured cap.
///
/// # Errors
///
/// Returns an error naming both the size and the cap when `total` exceeds it.
pub fn check_size(total: usize, limits: &ServiceLimits) -> Result<()> {
    if total > limits.max_tracks {
        bail!(
            "Playlist has {total} tracks, which exceeds the cap ({}). \
             Trim it or raise limits.max_tracks in the config file.",
            limits.max_tracks
        );
    }
    debug!("Playlist size {total} within cap {}", limits.max_tracks);
    Ok(())
}

/// The playlist to create for a classified source playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorPlan {
    pub name: String,
    pub description: String,
    pub vibe: VibeLabel,
    pub uris: Vec<String>,
}

impl MirrorPlan {
    #[must_use]
    pub fn new(source_name: &str, vibe: VibeLabel, chosen: &[&Track], limits: &ServiceLimits) -> Self {
        let description = format!(
            "Generated to reflect the playlist's {} vibe based on audio features and popularity.",
            vibe.as_str().to_lowercase()
        );

        Self {
            name: format!("{source_name} • {vibe} Mirror"),
            description: description.chars().take(limits.description_max_chars).collect(),
            vibe,
            uris: chosen.iter().map(|t| t.uri.clone()).collect(),
        }
    }

    /// URIs split into insertion calls of at most `page_size` items.
    pub fn uri_batches(&self, page_size: usize) -> impl Iterator<Item = &[String]> {
        self.uris.chunks(page_size.max(1))
    }
}

/// Everything produced for one source playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirrorReport {
    pub playlist_id: String,
    pub summary: Summary,
    pub plan: MirrorPlan,
}

/// Size check, alignment, summary, classification and selection in one go.
///
/// `count` defaults to the number of tracks that have audio features.
///
/// # Errors
///
/// Fails when the playlist exceeds the size cap, is empty, or none of its
/// tracks have audio features.
pub fn build_report(
    export: &PlaylistExport,
    mode: VibeMode,
    count: Option<usize>,
    config: &VibeConfig,
) -> Result<MirrorReport> {
    check_size(export.tracks.len(), &config.limits)?;
    if export.tracks.is_empty() {
        bail!("No tracks found in playlist '{}'", export.name);
    }

    let (tracks, features) = align_by_id(&export.tracks, &export.features);
    if tracks.is_empty() {
        bail!(
            "None of the {} tracks in '{}' have audio features",
            export.tracks.len(),
            export.name
        );
    }

    let summary = summarize(&features, &tracks);
    let (vibe, ranked) = decide_vibe_with(&features, &tracks, mode, config);
    let chosen = select_tracks(vibe, &ranked, &tracks, count.unwrap_or(tracks.len()));

    Ok(MirrorReport {
        playlist_id: extract_playlist_id(&export.id).to_string(),
        summary,
        plan: MirrorPlan::new(&export.name, vibe, &chosen, &config.limits),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::fixtures;

    #[test]
    fn test_extract_playlist_id_variants() {
        assert_eq!(extract_playlist_id("https://open.spotify.com/playlist/abc123"), "abc123");
        assert_eq!(
            extract_playlist_id("https://open.spotify.com/playlist/abc123?si=xyz&pt=1"),
            "abc123"
        );
        assert_eq!(extract_playlist_id("spotify:playlist:abc123"), "abc123");
        assert_eq!(extract_playlist_id("abc123"), "abc123");
        assert_eq!(extract_playlist_id("\tabc123\n"), "abc123");
        assert_eq!(extract_playlist_id(""), "");
    }

    #[test]
    fn test_align_by_id_drops_unmatched_and_keeps_track_order() {
        let tracks = fixtures::tracks(&[10, 20, 30, 40]);
        let features = vec![
            fixtures::features("t3", 0.1, 0.1, 0.1, 100.0, 0.1),
            fixtures::features("t0", 0.2, 0.2, 0.2, 110.0, 0.2),
            fixtures::features("zz", 0.3, 0.3, 0.3, 120.0, 0.3),
            fixtures::features("t2", 0.4, 0.4, 0.4, 130.0, 0.4),
        ];

        let (tracks, features) = align_by_id(&tracks, &features);

        let track_ids: Vec<_> = tracks.iter().map(|t| t.id.as_str()).collect();
        let feature_ids: Vec<_> = features.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(track_ids, vec!["t0", "t2", "t3"]);
        assert_eq!(track_ids, feature_ids);
    }

    #[test]
    fn test_check_size() {
        let limits = ServiceLimits::default();

        assert!(check_size(0, &limits).is_ok());
        assert!(check_size(300, &limits).is_ok());

        let err = check_size(301, &limits).unwrap_err();
        assert!(err.to_string().contains("301"));
        assert!(err.to_string().contains("300"));
    }

    #[test]
    fn test_plan_naming_and_uris() {
        let tracks = fixtures::tracks(&[1, 2]);
        let chosen: Vec<&Track> = tracks.iter().rev().collect();

        let plan = MirrorPlan::new("Road Trip", VibeLabel::Niche, &chosen, &ServiceLimits::default());

        assert_eq!(plan.name, "Road Trip • Niche Mirror");
        assert!(plan.description.contains("niche vibe"));
        assert_eq!(plan.uris, vec!["spotify:track:t1", "spotify:track:t0"]);
    }

    #[test]
    fn test_description_is_truncated_by_chars() {
        let limits = ServiceLimits { description_max_chars: 12, ..ServiceLimits::default() };
        let plan = MirrorPlan::new("x", VibeLabel::Mixed, &[], &limits);

        assert_eq!(plan.description, "Generated to");
        assert!(plan.uris.is_empty());
    }

    fn export(popularities: &[u32], with_features: bool) -> PlaylistExport {
        let tracks = fixtures::tracks(popularities);
        let features = if with_features {
            tracks
                .iter()
                .map(|t| fixtures::features(&t.id, 0.5, 0.5, 0.5, 120.0, 0.5))
                .collect()
        } else {
            Vec::new()
        };
        PlaylistExport {
            id: "https://open.spotify.com/playlist/src42?si=1".to_string(),
            name: "Source".to_string(),
            tracks,
            features,
        }
    }

    #[test]
    fn test_build_report_small_playlist() -> Result<()> {
        let report = build_report(&export(&[90, 85, 80], true), VibeMode::Auto, None, &VibeConfig::default())?;

        assert_eq!(report.playlist_id, "src42");
        assert_eq!(report.summary.track_count, 3);
        assert_eq!(report.summary.avg_popularity, Some(85.0));
        assert_eq!(report.plan.vibe, VibeLabel::Mainstream);
        assert_eq!(report.plan.name, "Source • Mainstream Mirror");
        assert_eq!(report.plan.uris, vec!["spotify:track:t0", "spotify:track:t1", "spotify:track:t2"]);

        Ok(())
    }

    #[test]
    fn test_build_report_respects_count() -> Result<()> {
        let report = build_report(&export(&[10, 30, 20], true), VibeMode::Popularity, Some(2), &VibeConfig::default())?;

        assert_eq!(report.plan.vibe, VibeLabel::Niche);
        assert_eq!(report.plan.uris, vec!["spotify:track:t0", "spotify:track:t2"]);

        Ok(())
    }

    #[test]
    fn test_build_report_errors() {
        let config = VibeConfig::default();

        assert!(build_report(&export(&[], true), VibeMode::Auto, None, &config).is_err());
        assert!(build_report(&export(&[50, 60], false), VibeMode::Auto, None, &config).is_err());

        let oversized = export(&[50; 301], true);
        let err = build_report(&oversized, VibeMode::Auto, None, &config).unwrap_err();
        assert!(err.to_string().contains("exceeds the cap"));
    }

    #[test]
    fn test_uri_batches() {
        let tracks = fixtures::tracks(&[0; 250]);
        let chosen: Vec<&Track> = tracks.iter().collect();
        let plan = MirrorPlan::new("big", VibeLabel::Mainstream, &chosen, &ServiceLimits::default());

        let sizes: Vec<usize> = plan.uri_batches(100).map(<[String]>::len).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(plan.uri_batches(0).count(), 250);
    }
}
