//! # Amalgam Library
//!
//! This library provides the core functionality for amalgamating a C/C++
//! source tree into a single self-contained "single header" artifact. It is
//! designed to be used by the `amalgam` command-line tool but can also be
//! integrated into other applications that need to merge include-linked
//! source files.
//!
//! ## Quick Example
//!
//! ```
//! use amalgam::corpus::{Corpus, FileKind, SourceFile};
//! use amalgam::phases::{ordering, rewrite};
//! use std::path::PathBuf;
//!
//! // Build a corpus of two files, one including the other
//! let mut corpus = Corpus::new(PathBuf::from("src"));
//! corpus.insert(SourceFile {
//!     path: PathBuf::from("a.h"),
//!     kind: FileKind::Header,
//!     content: "int a();".to_string(),
//! });
//! corpus.insert(SourceFile {
//!     path: PathBuf::from("b.h"),
//!     kind: FileKind::Header,
//!     content: "#include \"a.h\"\nint b();".to_string(),
//! });
//!
//! // Dependencies come first in the emission order
//! let order = ordering::execute(&corpus, None).unwrap();
//! assert_eq!(order.order, vec![PathBuf::from("a.h"), PathBuf::from("b.h")]);
//!
//! // The rewrite pipeline produces the final artifact text
//! let artifact =
//!     rewrite::amalgamate(&corpus, &order.order, Default::default()).unwrap();
//! assert!(artifact.starts_with("#pragma once\n"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Corpus (`corpus`)**: The eligible file set discovered under a scan
//!   root, with root-relative paths, extension-based classification, and
//!   entry-point files excluded.
//! - **Directive classification (`directive`)**: A typed classifier over
//!   single source lines, shared by the resolver and the rewrite stages.
//! - **Phases (`phases`)**: The multi-stage pipeline: corpus discovery,
//!   dependency resolution, the five-stage amalgamation rewrite, and the
//!   final disk write, coordinated by `phases::orchestrator`.
//!
//! The run is fully synchronous and single-threaded; each phase owns its
//! mutable state and exposes none of it.

pub mod corpus;
pub mod directive;
pub mod error;
pub mod output;
pub mod phases;

#[cfg(test)]
mod ordering_proptest;
