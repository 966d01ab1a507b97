//! # Vibe Mirror
//!
//! Classifies an exported playlist as Mainstream, Mixed or Niche and plans
//! a "mirror" playlist that leads with the tracks that best embody that vibe.
//!
//! ## Usage
//!
//! ```bash
//! # Report summary statistics and the detected vibe
//! vibe-mirror analyze playlist.json
//!
//! # Force a strategy and write the mirror plan to a file
//! vibe-mirror mirror playlist.json --mode kmeans --output plan.json
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::info;
use std::fs;
use std::io;

use vibe_mirror::{cli, completion, config, export, mirror};

/// Entry point: initialise logging, parse arguments and dispatch.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug vibe-mirror analyze list.json` - strategy and cluster decisions
/// - `RUST_LOG=vibe_mirror::kmeans=trace vibe-mirror mirror list.json` - per-iteration detail
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Analyze { export, mode } => {
            let config = config::load_config(args.config.as_deref())?;
            let playlist = export::load_export(&export)?;
            info!("Analyzing '{}' in {mode:?} mode", playlist.name);

            let report = mirror::build_report(&playlist, mode, None, &config)?;

            println!("--- Summary ---");
            println!("track_count: {}", report.summary.track_count);
            for (metric, value) in report.summary.entries() {
                match value {
                    Some(v) => println!("{metric}: {v}"),
                    None => println!("{metric}: n/a"),
                }
            }
            println!();
            println!("Detected vibe: {}", report.plan.vibe);
        }
        cli::Command::Mirror { export, mode, count, output } => {
            let config = config::load_config(args.config.as_deref())?;
            let playlist = export::load_export(&export)?;
            info!("Planning mirror for '{}' in {mode:?} mode", playlist.name);

            let report = mirror::build_report(&playlist, mode, count, &config)?;
            info!(
                "Detected {} vibe, {} tracks in {} insertion batches",
                report.plan.vibe,
                report.plan.uris.len(),
                report.plan.uri_batches(config.limits.page_size).count()
            );

            let json = serde_json::to_string_pretty(&report).context("Failed to serialize mirror plan")?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write mirror plan to {}", path.display()))?;
                    info!("Mirror plan written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        cli::Command::PlaylistId { input } => {
            println!("{}", mirror::extract_playlist_id(&input));
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(
                completion::shell_to_completion_shell(&shell),
                &mut cmd,
                &mut io::stdout(),
            );
        }
    }

    Ok(())
}
