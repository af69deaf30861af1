//! Build command implementation
//!
//! The build command executes the full 4-phase pipeline:
//! 1. Corpus discovery (classification, entry-point exclusion)
//! 2. Dependency resolution (post-order over local includes)
//! 3. Amalgamation rewrite (five text stages plus the include guard)
//! 4. Writing the artifact to disk

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use amalgam::output::{emoji, OutputConfig};
use amalgam::phases::orchestrator;
use amalgam::phases::rewrite::ConditionalTracking;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Source tree root to amalgamate
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Seed file the dependency traversal starts from, relative to ROOT
    #[arg(short, long, value_name = "PATH", env = "AMALGAM_SEED")]
    pub seed: Option<PathBuf>,

    /// Output artifact path
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "AMALGAM_OUTPUT",
        default_value = "amalgam.h"
    )]
    pub output: PathBuf,

    /// Track true conditional nesting depth instead of the legacy flat flag
    #[arg(long)]
    pub track_nesting: bool,

    /// Show what would be done without writing the artifact
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Show detailed progress information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the build command
pub fn execute(args: BuildArgs, output_config: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    if !args.root.is_dir() {
        anyhow::bail!("Source root not found: {}", args.root.display());
    }

    // Print header
    if !args.quiet {
        println!("{} Amalgam Build", emoji(output_config, "📦", "[BUILD]"));
        println!();

        if args.dry_run {
            println!(
                "{} DRY RUN MODE - No artifact will be written",
                emoji(output_config, "🔎", "[DRY-RUN]")
            );
            println!();
        }

        if args.verbose {
            println!(
                "{} Scanning source tree: {}",
                emoji(output_config, "🔍", "[SCAN]"),
                args.root.display()
            );
        }
    }

    let tracking = if args.track_nesting {
        ConditionalTracking::Nested
    } else {
        ConditionalTracking::Flat
    };

    let result = orchestrator::execute_build(
        &args.root,
        args.seed.as_deref(),
        tracking,
        if args.dry_run {
            None
        } else {
            Some(&args.output)
        },
    );

    match result {
        Ok(report) => {
            if !args.quiet {
                for skipped in &report.skipped_entry_points {
                    println!(
                        "{} Skipping entry-point file: {}",
                        emoji(output_config, "⏭️", "[SKIP]"),
                        skipped.display()
                    );
                }

                println!(
                    "{} Files in dependency order:",
                    emoji(output_config, "📋", "[ORDER]")
                );
                for path in report.order.iter() {
                    println!("   {}", path.display());
                }
                println!();

                let duration = start_time.elapsed();
                println!(
                    "{} Amalgamated {} files in {:.2}s",
                    emoji(output_config, "✅", "[OK]"),
                    report.file_count,
                    duration.as_secs_f64()
                );
                if !args.dry_run {
                    println!("   Artifact written to: {}", args.output.display());
                }
            }

            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{} Build failed", emoji(output_config, "❌", "[FAIL]"));
                println!();
            }
            Err(e.into())
        }
    }
}
