//! # Error Handling
//!
//! Centralized error handling for `amalgam`, built on `thiserror`. The
//! `Error` enum covers every anticipated failure mode of the pipeline:
//!
//! - Corpus scanning errors (unreadable directory entries).
//! - File read failures (fatal; the run aborts without partial output).
//! - Include cycle detection during dependency resolution.
//! - Path resolution errors.
//! - Artifact write failures.
//! - I/O and directory-walk errors, wrapped from their source crates.
//!
//! The `Result<T>` alias is used throughout the library crate; the binary
//! converts into `anyhow::Error` at its boundary.

use thiserror::Error;

/// Main error type for amalgam operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while scanning the source tree.
    #[error("Corpus scan error: {message}")]
    Scan { message: String },

    /// A corpus file exists per the directory listing but could not be read.
    ///
    /// This is fatal: the run aborts before any artifact is written.
    #[error("Failed to read '{path}': {message}")]
    Read { path: String, message: String },

    /// A circular dependency was detected in the include graph.
    #[error("Cycle detected in include dependencies: {cycle}")]
    CycleDetected { cycle: String },

    /// An error occurred with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// The final artifact could not be written to disk.
    #[error("Failed to write '{path}': {message}")]
    Write { path: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory traversal error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
