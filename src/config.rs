//! # Configuration Module
//!
//! Tunable constants for the classifier and the mirror-playlist planner.
//!
//! ## Lookup Order
//!
//! 1. An explicit path (the `--config` flag)
//! 2. `config.json` in the platform config directory:
//!    - Linux: `~/.config/vibe-mirror/config.json`
//!    - macOS: `~/Library/Application Support/vibe-mirror/config.json`
//!    - Windows: `%APPDATA%\vibe-mirror\config.json`
//! 3. Built-in defaults
//!
//! Every field is optional in the file; missing fields keep their default.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::track::FeatureKind;

lazy_static::lazy_static! {
    /// Defaults used by the convenience entry points that take no config.
    pub static ref DEFAULT_CONFIG: VibeConfig = VibeConfig::default();
}

/// Top-level classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VibeConfig {
    /// Mean popularity strictly above this is "Mainstream".
    pub mainstream_threshold: f64,
    /// Mean popularity at or below this is "Niche".
    pub niche_threshold: f64,
    /// `auto` mode clusters once a batch has at least this many tracks.
    pub auto_cluster_min_tracks: usize,
    pub cluster: ClusterConfig,
    pub limits: ServiceLimits,
}

impl Default for VibeConfig {
    fn default() -> Self {
        Self {
            mainstream_threshold: 65.0,
            niche_threshold: 40.0,
            auto_cluster_min_tracks: 20,
            cluster: ClusterConfig::default(),
            limits: ServiceLimits::default(),
        }
    }
}

/// Parameters of the two-cluster labeler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Ordered attribute set making up one feature vector.
    pub features: Vec<FeatureKind>,
    /// Clusters whose mean popularity differs by less than this are "Mixed".
    pub popularity_gap: f64,
    pub seed: u64,
    pub restarts: usize,
    pub max_iterations: usize,
    /// Convergence threshold on inertia change between iterations.
    pub tolerance: f64,
    /// Added to each column's standard deviation before dividing.
    pub std_epsilon: f64,
    pub alignment: Alignment,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            features: vec![
                FeatureKind::Danceability,
                FeatureKind::Energy,
                FeatureKind::Valence,
                FeatureKind::Tempo,
                FeatureKind::Acousticness,
            ],
            popularity_gap: 5.0,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            std_epsilon: 1e-6,
            alignment: Alignment::ById,
        }
    }
}

/// How surviving feature rows are paired with tracks for popularity averaging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Row `r` pairs with `tracks[r]`, and rankings use row positions.
    Positional,
    /// Row pairs with the track sharing its identifier.
    #[default]
    ById,
}

/// Size caps for talking to the music service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLimits {
    /// Playlists above this size are refused.
    pub max_tracks: usize,
    /// Items per fetch page and per insertion call.
    pub page_size: usize,
    pub description_max_chars: usize,
}

impl Default for ServiceLimits {
    fn default() -> Self {
        Self {
            max_tracks: 300,
            page_size: 100,
            description_max_chars: 300,
        }
    }
}

/// Returns the path of the per-user config file, whether or not it exists.
///
/// # Errors
///
/// Fails when the platform has no standard config directory.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!(
            "Could not determine system config directory. Pass --config explicitly."
        ))?;

    Ok(config_dir.join("vibe-mirror").join("config.json"))
}

/// Load configuration following the lookup order in the module docs.
///
/// # Errors
///
/// An explicit path that cannot be read or parsed is an error. A missing
/// per-user file is not.
pub fn load_config(explicit: Option<&Path>) -> Result<VibeConfig> {
    if let Some(path) = explicit {
        return read_config_file(path);
    }

    match get_config_path() {
        Ok(path) if path.exists() => read_config_file(&path),
        Ok(path) => {
            debug!("No config file at {}, using defaults", path.display());
            Ok(VibeConfig::default())
        }
        Err(e) => {
            debug!("Config directory unavailable ({e}), using defaults");
            Ok(VibeConfig::default())
        }
    }
}

fn read_config_file(path: &Path) -> Result<VibeConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: VibeConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
