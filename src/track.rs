//! Track and audio-feature records as handed over by the music service.
//!
//! Both types are plain data. They are fetched once per run and never
//! mutated by the classifier.

use serde::{Deserialize, Serialize};

/// A single playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Service identifier. Unique within a batch, used for deduplication.
    pub id: String,
    pub name: String,
    /// Primary artist only.
    #[serde(default)]
    pub artist: String,
    /// 0–100, as reported by the service.
    #[serde(default)]
    pub popularity: u32,
    /// Playable URI used when inserting into the mirror playlist.
    #[serde(default)]
    pub uri: String,
}

impl Track {
    #[must_use]
    pub fn popularity(&self) -> f64 {
        f64::from(self.popularity)
    }
}

/// Audio descriptors for one track, keyed by the track's identifier.
///
/// Every attribute is optional: the service occasionally omits fields, and
/// the classifier decides per attribute whether a record is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: String,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub danceability: Option<f64>,
    #[serde(default)]
    pub acousticness: Option<f64>,
}

impl FeatureRecord {
    /// Look up one attribute by kind.
    #[must_use]
    pub const fn get(&self, kind: FeatureKind) -> Option<f64> {
        match kind {
            FeatureKind::Tempo => self.tempo,
            FeatureKind::Energy => self.energy,
            FeatureKind::Valence => self.valence,
            FeatureKind::Danceability => self.danceability,
            FeatureKind::Acousticness => self.acousticness,
        }
    }
}

/// Names of the numeric attributes carried by a [`FeatureRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Tempo,
    Energy,
    Valence,
    Danceability,
    Acousticness,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn track(id: &str, popularity: u32) -> Track {
        Track {
            id: id.to_string(),
            name: format!("Song {id}"),
            artist: "Test Artist".to_string(),
            popularity,
            uri: format!("spotify:track:{id}"),
        }
    }

    pub fn tracks(popularities: &[u32]) -> Vec<Track> {
        popularities
            .iter()
            .enumerate()
            .map(|(i, &p)| track(&format!("t{i}"), p))
            .collect()
    }

    /// Complete record with all five attributes present.
    pub fn features(id: &str, dance: f64, energy: f64, valence: f64, tempo: f64, acoustic: f64) -> FeatureRecord {
        FeatureRecord {
            id: id.to_string(),
            tempo: Some(tempo),
            energy: Some(energy),
            valence: Some(valence),
            danceability: Some(dance),
            acousticness: Some(acoustic),
        }
    }
}
