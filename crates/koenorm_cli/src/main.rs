//! koenorm - batch loudness normalization and silence trimming.
//!
//! Walks an input directory of speech clips, trims silence, measures
//! loudness, and re-encodes every file into a mirrored output tree via
//! the configured external encoder.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use koenorm_core::batch::{self, BatchOptions, BatchReport};
use koenorm_core::config;
use koenorm_core::logging;
use koenorm_core::models::TargetCodec;

#[derive(Parser, Debug)]
#[command(name = "koenorm", version, about = "Batch loudness normalization and silence trimming for speech-clip corpora")]
struct Cli {
    /// Target codec: opus, mp3, aac or flac.
    codec: TargetCodec,

    /// Directory scanned recursively for audio clips.
    input_dir: PathBuf,

    /// Root of the mirrored output tree.
    output_dir: PathBuf,

    /// Override the codec's default quality arguments.
    #[arg(long, allow_hyphen_values = true)]
    quality: Option<String>,

    /// Skip loudness measurement and normalization.
    #[arg(long)]
    no_normalize: bool,

    /// Skip silence detection and trimming.
    #[arg(long)]
    no_silence_remove: bool,

    /// Directory containing default_config.json (and an optional
    /// config.json override).
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing("info");
    let cli = Cli::parse();

    let config = config::load_layered(&cli.config_dir)
        .context("failed to load encoder configuration")?;

    let report = batch::run_batch(
        Arc::new(config),
        BatchOptions {
            codec: cli.codec,
            input_root: cli.input_dir,
            dest_root: cli.output_dir,
            quality: cli.quality,
            normalize: !cli.no_normalize,
            trim_silence: !cli.no_silence_remove,
            workers: None,
        },
    )?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &BatchReport) {
    println!("files encoded: {}/{}", report.succeeded, report.attempted);
    for (file, error) in &report.failed {
        println!("  skipped {}: {}", file.display(), error);
    }
    let secs = report.elapsed.as_secs_f64();
    println!("elapsed time: {:.0}m {:.1}s", (secs / 60.0).floor(), secs % 60.0);
}
