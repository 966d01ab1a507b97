//! Playlist taste classification and mirror-playlist planning.
//!
//! Core modules:
//! - [`summary`] - Batch averages for reporting
//! - [`popularity`] - Popularity-threshold labeler
//! - [`cluster`] - Two-cluster labeler over audio features
//! - [`kmeans`] - Seeded k-means used by the cluster labeler
//! - [`vibe`] - Labels, modes and the strategy dispatcher
//! - [`selector`] - Ranked, deduplicated track selection
//!
//! ### Supporting Modules
//!
//! - [`track`] - Track and feature records
//! - [`config`] - Thresholds, clustering parameters and service limits
//! - [`mirror`] - Playlist id parsing, alignment and the mirror plan
//! - [`export`] - JSON playlist exports
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use vibe_mirror::selector::select_tracks;
//! use vibe_mirror::summary::summarize;
//! use vibe_mirror::track::{FeatureRecord, Track};
//! use vibe_mirror::vibe::{decide_vibe, VibeLabel, VibeMode};
//!
//! let tracks: Vec<Track> = [("a", 30), ("b", 10), ("c", 20)]
//!     .iter()
//!     .map(|&(id, popularity)| Track {
//!         id: id.to_string(),
//!         name: id.to_uppercase(),
//!         artist: "Someone".to_string(),
//!         popularity,
//!         uri: format!("spotify:track:{id}"),
//!     })
//!     .collect();
//! let features: Vec<FeatureRecord> = tracks
//!     .iter()
//!     .map(|t| FeatureRecord { id: t.id.clone(), tempo: Some(100.0), ..Default::default() })
//!     .collect();
//!
//! let summary = summarize(&features, &tracks);
//! assert_eq!(summary.avg_popularity, Some(20.0));
//!
//! let (vibe, ranked) = decide_vibe(&features, &tracks, VibeMode::Auto);
//! assert_eq!(vibe, VibeLabel::Niche);
//!
//! let chosen = select_tracks(vibe, &ranked, &tracks, 2);
//! assert_eq!(chosen[0].id, "b");
//! assert_eq!(chosen[1].id, "c");
//! ```
//!
//! ## Labeling Strategies
//!
//! ### Popularity
//! - Mean popularity above 65 is Mainstream, above 40 Mixed, otherwise Niche
//! - Ranks by popularity (or by closeness to the median for Mixed)
//!
//! ### Clusters
//! - Z-scored danceability, energy, valence, tempo and acousticness
//! - k-means with k = 2, fixed seed, 10 restarts
//! - Cluster mean popularity decides the label; cluster size can flip
//!   Mainstream to Niche
//!
//! `VibeMode::Auto` clusters batches of 20 or more tracks.
//!
//! ## Error Handling
//!
//! The classifier itself never fails: empty or degenerate input maps to a
//! defined fallback. Loading configuration and exports returns
//! `Result<T, anyhow::Error>`.

pub mod cli;
pub mod cluster;
pub mod completion;
pub mod config;
pub mod export;
pub mod kmeans;
pub mod mirror;
pub mod popularity;
pub mod selector;
pub mod summary;
pub mod track;
pub mod vibe;
