//! JSON playlist exports.
//!
//! An export is what the fetching side produces for one playlist: its
//! identity, every track, and whatever feature records the service returned.
//! Features need not be aligned; run [`crate::mirror::align_by_id`] first.

use anyhow::{Context, Result};
use log::info;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::track::{FeatureRecord, Track};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistExport {
    /// Playlist identifier or share URL.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub features: Vec<FeatureRecord>,
}

/// Read and parse an export file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid export.
pub fn load_export(path: &Path) -> Result<PlaylistExport> {
    let path = path
        .absolutize()
        .with_context(|| format!("Failed to resolve export path {}", path.display()))?;

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read playlist export {}", path.display()))?;
    let export: PlaylistExport = serde_json::from_str(&content)
        .with_context(|| format!("Invalid playlist export {}", path.display()))?;

    info!(
        "Loaded export '{}' with {} tracks and {} feature records",
        export.name,
        export.tracks.len(),
        export.features.len()
    );
    Ok(export)
}
