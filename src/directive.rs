//! # Preprocessor Line Classification
//!
//! A small typed classifier over single source lines, producing one of a
//! closed set of [`LineKind`] values. Both the dependency resolver (edge
//! discovery from quoted includes) and the rewrite pipeline (include
//! disabling, hoisting, comment and blank stripping) consume the same
//! classifier, so directive recognition lives in exactly one place.
//!
//! Classification is purely syntactic: a line is inspected in trimmed form
//! and matched against directive prefixes. No macro expansion and no
//! awareness of block comments, per the tool's scope.

/// Prefix of the per-file marker lines emitted by the concatenation stage.
///
/// Marker lines are comments syntactically but must survive comment
/// stripping, so they get their own classification.
pub const FILE_MARKER_PREFIX: &str = "// File: ";

/// The classification of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A well-formed quoted include: `#include "path"`. Carries the target
    /// path between the quotes. Only these produce dependency edges.
    QuotedInclude(&'a str),
    /// Any other `#include` directive (angle form, or malformed quoting).
    /// Never a dependency edge, but still eligible for hoisting.
    OtherInclude,
    /// Exactly `#pragma once`.
    PragmaOnce,
    /// `#ifdef` or `#ifndef`: opens a conditional-compilation block.
    ConditionalOpen,
    /// `#endif`: closes a conditional-compilation block.
    ConditionalClose,
    /// A per-file marker line produced by the concatenation stage.
    FileMarker,
    /// Any other line starting with a single-line comment marker.
    Comment,
    /// Empty after trimming surrounding whitespace.
    Blank,
    /// Anything else.
    Code,
}

impl LineKind<'_> {
    /// True for any include directive, quoted or otherwise.
    pub fn is_include(&self) -> bool {
        matches!(self, LineKind::QuotedInclude(_) | LineKind::OtherInclude)
    }
}

const QUOTED_INCLUDE_PREFIX: &str = "#include \"";

/// Classify a single source line.
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with(FILE_MARKER_PREFIX) {
        return LineKind::FileMarker;
    }
    if trimmed.starts_with("//") {
        return LineKind::Comment;
    }
    if trimmed == "#pragma once" {
        return LineKind::PragmaOnce;
    }
    if let Some(rest) = trimmed.strip_prefix(QUOTED_INCLUDE_PREFIX) {
        // Well-formed only when a closing quote ends the line.
        if let Some(target) = rest.strip_suffix('"') {
            return LineKind::QuotedInclude(target);
        }
        return LineKind::OtherInclude;
    }
    if trimmed.starts_with("#include") {
        return LineKind::OtherInclude;
    }
    if trimmed.starts_with("#ifdef") || trimmed.starts_with("#ifndef") {
        return LineKind::ConditionalOpen;
    }
    if trimmed.starts_with("#endif") {
        return LineKind::ConditionalClose;
    }

    LineKind::Code
}
