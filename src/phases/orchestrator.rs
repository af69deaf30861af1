//! Orchestrator for the complete amalgamation run
//!
//! This module coordinates all phases to provide a clean API for a complete
//! build: scan, resolve, rewrite, and optionally write. All diagnostics
//! output stays with the command layer; the orchestrator reports what
//! happened through [`BuildReport`].

use std::path::{Path, PathBuf};

use super::{phase1, phase2, phase3, phase4, EmissionOrder};
use crate::error::Result;
use crate::phases::rewrite::ConditionalTracking;

/// The outcome of one amalgamation run.
#[derive(Debug)]
pub struct BuildReport {
    /// Number of eligible files that went into the artifact.
    pub file_count: usize,
    /// Entry-point files excluded during the scan, in discovery order.
    pub skipped_entry_points: Vec<PathBuf>,
    /// The resolved emission order.
    pub order: EmissionOrder,
    /// The finished artifact text.
    pub artifact: String,
}

/// Execute the complete amalgamation run (Phases 1-4)
///
/// 1. Scan `root` into the eligible corpus
/// 2. Resolve the dependency-first emission order (seeded from `seed`)
/// 3. Run the five rewrite stages and prepend the include guard
/// 4. Write the artifact to disk (if `output` is provided)
///
/// If `output` is `None` the run is a dry run: everything is computed and
/// reported but nothing is written.
pub fn execute_build(
    root: &Path,
    seed: Option<&Path>,
    tracking: ConditionalTracking,
    output: Option<&Path>,
) -> Result<BuildReport> {
    // Phase 1: Corpus Discovery
    let corpus = phase1::execute(root)?;

    // Phase 2: Dependency Resolution
    let order = phase2::execute(&corpus, seed)?;

    // Phase 3: Amalgamation Rewrite
    let artifact = phase3::amalgamate(&corpus, &order.order, tracking)?;

    // Phase 4: Write to Disk (if output path provided)
    if let Some(output) = output {
        phase4::execute(&artifact, output)?;
    }

    Ok(BuildReport {
        file_count: corpus.len(),
        skipped_entry_points: corpus.skipped_entry_points().to_vec(),
        order,
        artifact,
    })
}
