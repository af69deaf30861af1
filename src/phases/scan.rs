//! Phase 1: Corpus Discovery
//!
//! This is the first phase of the amalgamation pipeline. Its responsibility
//! is to walk the source tree and produce the eligible corpus.
//!
//! ## Process
//!
//! 1.  **Walk**: The scan root is traversed recursively, sorted by file name
//!     so results are deterministic across platforms.
//!
//! 2.  **Classification**: Each file is classified by extension. Headers
//!     (`.h`, `.hpp`) and translation units (`.cpp`, `.c`) are read fully;
//!     known build artifacts (`.o`, `.obj`, `.exe`) are skipped silently;
//!     anything else is skipped with a warning.
//!
//! 3.  **Entry-point exclusion**: A translation unit that defines a program
//!     entry point (`int main(...)`) is excluded from the corpus. Its path is
//!     recorded so the driver can emit one notice per skipped file.
//!
//! A file that is listed but cannot be read aborts the whole run; no partial
//! corpus is ever returned.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use walkdir::WalkDir;

use crate::corpus::{is_build_artifact, Corpus, FileKind, SourceFile};
use crate::error::{Error, Result};

/// Matches a C/C++ program entry-point definition.
fn entry_point_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bint\s+main\s*\(").expect("valid literal pattern"))
}

/// Execute Phase 1: Scan the source tree into an eligible corpus.
///
/// Walks `root` recursively, classifies every file by extension, reads the
/// content of eligible files, and excludes translation units that define an
/// entry point. All returned paths are root-relative.
pub fn execute(root: &Path) -> Result<Corpus> {
    if !root.is_dir() {
        return Err(Error::Scan {
            message: format!("'{}' is not a directory", root.display()),
        });
    }

    let mut corpus = Corpus::new(root.to_path_buf());

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let Some(kind) = FileKind::from_extension(ext) else {
            if !is_build_artifact(ext) {
                warn!("Unrecognized file type: {}", path.display());
            }
            continue;
        };

        let content = fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let relative = path
            .strip_prefix(root)
            .map_err(|e| Error::Path {
                message: format!(
                    "'{}' is not under scan root '{}': {}",
                    path.display(),
                    root.display(),
                    e
                ),
            })?
            .to_path_buf();

        if kind == FileKind::TranslationUnit && entry_point_pattern().is_match(&content) {
            debug!("Skipping entry-point file: {}", relative.display());
            corpus.record_skipped_entry_point(relative);
            continue;
        }

        corpus.insert(SourceFile {
            path: relative,
            kind,
            content,
        });
    }

    Ok(corpus)
}
