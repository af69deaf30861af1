//! Order command implementation
//!
//! Resolves the dependency-first emission order and prints it, one
//! root-relative path per line, without producing an artifact. Useful for
//! inspecting what `build` would emit and in which order.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use amalgam::phases::{ordering, scan};

/// Arguments for the order command
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Source tree root to resolve
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Seed file the dependency traversal starts from, relative to ROOT
    #[arg(short, long, value_name = "PATH", env = "AMALGAM_SEED")]
    pub seed: Option<PathBuf>,
}

/// Execute the order command
pub fn execute(args: OrderArgs) -> Result<()> {
    if !args.root.is_dir() {
        anyhow::bail!("Source root not found: {}", args.root.display());
    }

    let corpus = scan::execute(&args.root)?;
    let order = ordering::execute(&corpus, args.seed.as_deref())?;

    for path in order.iter() {
        println!("{}", path.display());
    }

    Ok(())
}
