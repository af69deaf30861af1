//! # Source Corpus Data Model
//!
//! Types shared by every pipeline phase: the classification of a file
//! ([`FileKind`]), a single eligible file with its content ([`SourceFile`]),
//! and the full set of eligible files ([`Corpus`]).
//!
//! All corpus paths are root-relative and lexically normalized. The corpus
//! retains its scan root so later phases never consult the process working
//! directory; path resolution stays pure.
//!
//! Files are keyed in a `BTreeMap`, so every iteration over the corpus is
//! deterministic regardless of filesystem enumeration order.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Classification of an eligible corpus file, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A header file (`.h`, `.hpp`).
    Header,
    /// A translation unit (`.cpp`, `.c`).
    TranslationUnit,
}

impl FileKind {
    /// Classify a file extension, or `None` for anything that is neither
    /// a header nor a translation unit.
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        match ext {
            "h" | "hpp" => Some(FileKind::Header),
            "cpp" | "c" => Some(FileKind::TranslationUnit),
            _ => None,
        }
    }
}

/// Extensions of build artifacts that are skipped without a warning.
pub fn is_build_artifact(ext: &str) -> bool {
    matches!(ext, "o" | "obj" | "exe")
}

/// One eligible source file. Immutable once read.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Root-relative, normalized path.
    pub path: PathBuf,
    /// Header or translation unit.
    pub kind: FileKind,
    /// Full file content.
    pub content: String,
}

/// The set of eligible files discovered under one scan root.
///
/// Entry-point files are excluded from the file map but their paths are
/// retained so the driver can report one notice per skipped file.
#[derive(Debug)]
pub struct Corpus {
    root: PathBuf,
    files: BTreeMap<PathBuf, SourceFile>,
    skipped_entry_points: Vec<PathBuf>,
}

impl Corpus {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            files: BTreeMap::new(),
            skipped_entry_points: Vec::new(),
        }
    }

    /// The directory this corpus was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add an eligible file to the corpus.
    pub fn insert(&mut self, file: SourceFile) {
        self.files.insert(file.path.clone(), file);
    }

    /// Record a translation unit that was excluded for defining an entry point.
    pub fn record_skipped_entry_point(&mut self, path: PathBuf) {
        self.skipped_entry_points.push(path);
    }

    pub fn get(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// All header files, in sorted root-relative path order.
    pub fn headers(&self) -> impl Iterator<Item = &SourceFile> {
        self.files
            .values()
            .filter(|f| f.kind == FileKind::Header)
    }

    /// All translation units, in sorted root-relative path order.
    pub fn sources(&self) -> impl Iterator<Item = &SourceFile> {
        self.files
            .values()
            .filter(|f| f.kind == FileKind::TranslationUnit)
    }

    /// All eligible files, in sorted root-relative path order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths of excluded entry-point files, in discovery order.
    pub fn skipped_entry_points(&self) -> &[PathBuf] {
        &self.skipped_entry_points
    }
}

/// Lexically normalize a root-relative path, resolving `.` and `..`
/// components without touching the filesystem.
///
/// Returns `None` when the path escapes the root (a leading `..` survives)
/// or is absolute; such a path cannot name a corpus member.
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.iter().collect())
}
