//! Phase 2: Dependency Resolution
//!
//! This is the second phase of the amalgamation pipeline. Its responsibility
//! is to produce a single emission order in which every locally-included file
//! precedes its includer.
//!
//! ## Process
//!
//! 1.  **Edge discovery**: For each file, every line classified as a quoted
//!     include is resolved relative to the includer's directory into a
//!     [`PathResolution`]. Only resolutions naming an eligible corpus member
//!     produce dependency edges; external and unresolved targets are treated
//!     as system dependencies and ignored. Directives inside conditional
//!     blocks still produce edges (no macro awareness).
//!
//! 2.  **Post-order traversal**: Files are visited depth-first with an
//!     explicit work stack of `(file, edges, cursor)` frames, so deep include
//!     chains cannot exhaust the call stack. A file is appended to the order
//!     only after all of its dependencies have been appended.
//!
//! 3.  **Cycle rejection**: An edge into a file that is still on the work
//!     stack is a circular include, and the run aborts with
//!     `Error::CycleDetected` naming the offending chain.
//!
//! 4.  **Seeding**: Traversal starts from the seed file (skipped if it is not
//!     an eligible member, e.g. an excluded entry-point file), then sweeps
//!     any remaining headers and finally any remaining translation units in
//!     sorted order, so every eligible file lands in the order exactly once
//!     even when unreachable from the seed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;

use super::EmissionOrder;
use crate::corpus::{normalize_relative, Corpus};
use crate::directive::{classify, LineKind};
use crate::error::{Error, Result};

/// The outcome of resolving one quoted include target against the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    /// The target names an eligible corpus member; this is a dependency edge.
    Member(PathBuf),
    /// The target exists on disk under the root but is not an eligible
    /// member (an excluded entry-point file, an unrecognized type). No edge.
    External(PathBuf),
    /// The target does not exist under the root, or escapes it. Treated as a
    /// system/external dependency. No edge.
    Unresolved(PathBuf),
}

/// Resolve a quoted include target relative to its includer's directory.
///
/// Resolution is purely lexical against the corpus and its root; the process
/// working directory is never consulted.
pub fn resolve_include(corpus: &Corpus, includer: &Path, target: &str) -> PathResolution {
    let joined = match includer.parent() {
        Some(dir) => dir.join(target),
        None => PathBuf::from(target),
    };
    let Some(normalized) = normalize_relative(&joined) else {
        return PathResolution::Unresolved(joined);
    };
    if corpus.contains(&normalized) {
        PathResolution::Member(normalized)
    } else if corpus.root().join(&normalized).is_file() {
        PathResolution::External(normalized)
    } else {
        PathResolution::Unresolved(normalized)
    }
}

/// One work-stack frame: a file plus a cursor over its outgoing edges.
struct Frame {
    path: PathBuf,
    edges: Vec<PathBuf>,
    cursor: usize,
}

impl Frame {
    fn new(corpus: &Corpus, path: &Path) -> Self {
        let mut edges = Vec::new();
        if let Some(file) = corpus.get(path) {
            for line in file.content.lines() {
                if let LineKind::QuotedInclude(target) = classify(line) {
                    match resolve_include(corpus, path, target) {
                        PathResolution::Member(dep) => edges.push(dep),
                        PathResolution::External(p) => {
                            debug!(
                                "Include '{}' from '{}' is not an eligible member; no edge",
                                p.display(),
                                path.display()
                            );
                        }
                        PathResolution::Unresolved(p) => {
                            debug!(
                                "Include '{}' from '{}' not found; treated as system dependency",
                                p.display(),
                                path.display()
                            );
                        }
                    }
                }
            }
        }
        Frame {
            path: path.to_path_buf(),
            edges,
            cursor: 0,
        }
    }

    fn next_edge(&mut self) -> Option<PathBuf> {
        let next = self.edges.get(self.cursor).cloned();
        if next.is_some() {
            self.cursor += 1;
        }
        next
    }
}

/// Execute Phase 2: Resolve the corpus into a dependency-first emission order.
///
/// Returns root-relative paths with no duplicates; for every include edge
/// A -> B, B strictly precedes A. Fails with `Error::CycleDetected` on
/// circular includes.
pub fn execute(corpus: &Corpus, seed: Option<&Path>) -> Result<EmissionOrder> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();

    if let Some(seed) = seed {
        let start = normalize_relative(seed).unwrap_or_else(|| seed.to_path_buf());
        if corpus.contains(&start) {
            visit(corpus, start, &mut visited, &mut order)?;
        } else {
            debug!(
                "Seed '{}' is not an eligible corpus member; continuing with sweep",
                seed.display()
            );
        }
    }

    let headers: Vec<PathBuf> = corpus.headers().map(|f| f.path.clone()).collect();
    for header in headers {
        if !visited.contains(&header) {
            visit(corpus, header, &mut visited, &mut order)?;
        }
    }
    let sources: Vec<PathBuf> = corpus.sources().map(|f| f.path.clone()).collect();
    for source in sources {
        if !visited.contains(&source) {
            visit(corpus, source, &mut visited, &mut order)?;
        }
    }

    Ok(EmissionOrder::new(order))
}

/// Post-order-visit one reachable subgraph using an explicit work stack.
fn visit(
    corpus: &Corpus,
    start: PathBuf,
    visited: &mut HashSet<PathBuf>,
    order: &mut Vec<PathBuf>,
) -> Result<()> {
    let mut in_progress = HashSet::new();
    in_progress.insert(start.clone());
    let mut stack = vec![Frame::new(corpus, &start)];

    while let Some(frame) = stack.last_mut() {
        match frame.next_edge() {
            Some(next) => {
                if visited.contains(&next) {
                    continue;
                }
                if in_progress.contains(&next) {
                    return Err(Error::CycleDetected {
                        cycle: describe_cycle(&stack, &next),
                    });
                }
                in_progress.insert(next.clone());
                let child = Frame::new(corpus, &next);
                stack.push(child);
            }
            None => {
                let done = stack.pop().expect("stack is non-empty");
                in_progress.remove(&done.path);
                visited.insert(done.path.clone());
                order.push(done.path);
            }
        }
    }

    Ok(())
}

/// Render the cycle as a path chain, e.g. `a.h -> b.h -> a.h`.
fn describe_cycle(stack: &[Frame], repeated: &Path) -> String {
    let start = stack
        .iter()
        .position(|frame| frame.path == repeated)
        .unwrap_or(0);
    let mut parts: Vec<String> = stack[start..]
        .iter()
        .map(|frame| frame.path.display().to_string())
        .collect();
    parts.push(repeated.display().to_string());
    parts.join(" -> ")
}
