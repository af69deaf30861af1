//! Implementation of the 4 phases of the amalgamation pipeline.
//!
//! ## Overview
//!
//! Building a single-header artifact follows 4 phases:
//! 1. Corpus Discovery - Walk the source tree, classify files, exclude entry points
//! 2. Dependency Resolution - Compute a post-order emission order over local includes
//! 3. Amalgamation Rewrite - Five text stages producing the artifact text
//! 4. Writing to Disk - Write the artifact to the host filesystem
//!
//! Each phase depends only on the previous phases and the shared data model
//! (`corpus`, `directive`). The whole run is synchronous and single-threaded;
//! the only mutable state lives inside one phase at a time.

use std::path::PathBuf;

// Phase modules
pub mod orchestrator;
pub mod ordering;
pub mod rewrite;
pub mod scan;
pub mod write;

// Re-export phase modules to preserve public API
pub use ordering as phase2;
pub use rewrite as phase3;
pub use scan as phase1;
pub use write as phase4;

/// The resolver's output: an ordered, duplicate-free sequence of
/// root-relative file paths in which every locally-included file precedes
/// its includer.
#[derive(Debug, Clone)]
pub struct EmissionOrder {
    /// Ordered root-relative paths.
    pub order: Vec<PathBuf>,
}

impl EmissionOrder {
    pub fn new(order: Vec<PathBuf>) -> Self {
        Self { order }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.order.iter()
    }
}
