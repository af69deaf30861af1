//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `amalgam` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic, calling into the `amalgam` library for the core work.

pub mod build;
pub mod completions;
pub mod order;
