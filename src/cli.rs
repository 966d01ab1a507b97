//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `vibe-mirror` binary.
//!
//! ## Commands
//!
//! - `analyze`: Summarize an exported playlist and report its vibe
//! - `mirror`: Classify, select tracks and emit the mirror playlist plan
//! - `playlist-id`: Extract the identifier from a playlist URL or URI
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! vibe-mirror analyze road-trip.json
//! vibe-mirror mirror road-trip.json --mode kmeans --output plan.json
//! vibe-mirror playlist-id "https://open.spotify.com/playlist/37i9dQZF1DX0XUsuxWHRQd?si=1"
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::vibe::VibeMode;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "vibe-mirror")]
#[command(about = "Vibe Mirror: classify a playlist's taste and plan a mirror playlist")]
#[command(version)]
pub struct Args {
    /// Configuration file (JSON). Defaults to the per-user config if present.
    #[arg(long, global = true, env = "VIBE_MIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize a playlist export and report the detected vibe
    ///
    /// Tracks without audio features are skipped before analysis.
    Analyze {
        /// Playlist export (JSON with name, tracks and features)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        export: PathBuf,

        /// Labeling strategy
        #[arg(long, value_enum, default_value_t = VibeMode::Auto)]
        mode: VibeMode,
    },

    /// Build the mirror playlist plan for a playlist export
    ///
    /// Classifies the playlist, orders its tracks by how well they fit the
    /// detected vibe, and writes the resulting plan as JSON.
    Mirror {
        /// Playlist export (JSON with name, tracks and features)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        export: PathBuf,

        /// Labeling strategy
        #[arg(long, value_enum, default_value_t = VibeMode::Auto)]
        mode: VibeMode,

        /// Number of tracks in the mirror (defaults to all analyzable tracks)
        #[arg(long)]
        count: Option<usize>,

        /// Write the plan here instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Print the playlist identifier contained in a URL, URI or bare id
    PlaylistId {
        input: String,
    },

    /// Generate shell completions
    ///
    /// Usage: vibe-mirror completion bash > ~/.local/share/bash-completion/completions/vibe-mirror
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
