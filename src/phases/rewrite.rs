//! Phase 3: Amalgamation Rewrite
//!
//! This is the third phase of the amalgamation pipeline: a fixed sequence of
//! five pure text-rewrite stages consuming the ordered file list and
//! producing the final artifact text.
//!
//! ## Stages
//!
//! 1.  **Concatenate**: per ordered file, one `// File: <path>` marker line,
//!     then the file content with trailing whitespace trimmed.
//! 2.  **Disable local includes**: quoted includes and `#pragma once` lines
//!     are commented out with the original text kept as a trailing
//!     annotation, so the merged file never re-parses a now-redundant local
//!     include; the artifact carries a single top-level guard instead.
//! 3.  **Hoist includes**: one pass over the whole stream collects every
//!     include directive found outside a conditional block, deduplicates by
//!     exact text (first occurrence wins) and moves the block to the top.
//! 4.  **Strip comments**: single-line comments are dropped. File marker
//!     lines survive; they identify each file's body in the artifact.
//! 5.  **Strip blank lines**: lines empty after trimming are dropped.
//!
//! The guard line is prepended after the five stages. Conditional tracking
//! defaults to the legacy flat flag, where any `#endif` resets the state
//! regardless of nesting depth; true depth tracking is opt-in.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::corpus::Corpus;
use crate::directive::{classify, LineKind, FILE_MARKER_PREFIX};
use crate::error::{Error, Result};

/// The single include-guard line prepended to the artifact.
pub const GUARD_LINE: &str = "#pragma once";

/// How the include-hoisting stage tracks conditional-compilation blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionalTracking {
    /// Legacy single-flag tracking: any `#endif` resets to outside, even
    /// when an outer block is still open. Kept as the default for output
    /// parity with the original tool.
    #[default]
    Flat,
    /// True nesting-depth tracking.
    Nested,
}

/// Stage 1: Concatenate the ordered files into one line stream.
///
/// Each file contributes a marker line identifying its path, then its
/// content verbatim with trailing whitespace trimmed.
pub fn concatenate(corpus: &Corpus, order: &[PathBuf]) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for path in order {
        let file = corpus.get(path).ok_or_else(|| Error::Path {
            message: format!("ordered file '{}' is not in the corpus", path.display()),
        })?;
        lines.push(format!("{}{}", FILE_MARKER_PREFIX, path.display()));
        for line in file.content.lines() {
            lines.push(line.trim_end().to_string());
        }
    }
    Ok(lines)
}

/// Stage 2: Disable local re-inclusion.
///
/// Quoted includes are now redundant (their targets are inlined above) and
/// `#pragma once` is superseded by the single top-level guard.
pub fn disable_local_includes(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| match classify(&line) {
            LineKind::QuotedInclude(_) => {
                format!("// {}  // Local include commented out", line)
            }
            LineKind::PragmaOnce => "// #pragma once  // Pragma once commented out".to_string(),
            _ => line,
        })
        .collect()
}

/// Stage 3: Hoist and deduplicate include directives.
///
/// An include is collectible only while outside a conditional block, since
/// moving it to the top would change its meaning otherwise. Collectibles are
/// deduplicated by exact text, first occurrence wins, and reinserted as a
/// block at the top followed by two separator lines.
pub fn hoist_includes(lines: Vec<String>, tracking: ConditionalTracking) -> Vec<String> {
    let mut collected: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut content: Vec<String> = Vec::new();
    let mut depth: u32 = 0;

    for line in lines {
        match classify(&line) {
            LineKind::ConditionalOpen => {
                depth = match tracking {
                    ConditionalTracking::Flat => 1,
                    ConditionalTracking::Nested => depth + 1,
                };
                content.push(line);
            }
            LineKind::ConditionalClose => {
                depth = match tracking {
                    ConditionalTracking::Flat => 0,
                    ConditionalTracking::Nested => depth.saturating_sub(1),
                };
                content.push(line);
            }
            kind if kind.is_include() && depth == 0 => {
                if seen.insert(line.clone()) {
                    collected.push(line);
                }
            }
            _ => content.push(line),
        }
    }

    let mut result = collected;
    result.push(String::new());
    result.push(String::new());
    result.extend(content);
    result
}

/// Stage 4: Strip single-line comments.
///
/// File marker lines are kept; everything else starting with `//` goes,
/// including the includes disabled by stage 2. Block comments and trailing
/// comments are out of scope.
pub fn strip_comments(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !matches!(classify(line), LineKind::Comment))
        .collect()
}

/// Stage 5: Strip blank lines.
pub fn strip_blank_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !matches!(classify(line), LineKind::Blank))
        .collect()
}

/// Execute Phase 3: Run all five stages and prepend the include guard.
pub fn amalgamate(
    corpus: &Corpus,
    order: &[PathBuf],
    tracking: ConditionalTracking,
) -> Result<String> {
    let lines = concatenate(corpus, order)?;
    let lines = disable_local_includes(lines);
    let lines = hoist_includes(lines, tracking);
    let lines = strip_comments(lines);
    let lines = strip_blank_lines(lines);

    let mut artifact = String::from(GUARD_LINE);
    artifact.push('\n');
    for line in lines {
        artifact.push_str(&line);
        artifact.push('\n');
    }
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{FileKind, SourceFile};

    fn corpus(files: &[(&str, &str)]) -> Corpus {
        let mut corpus = Corpus::new(PathBuf::from("src"));
        for (path, content) in files {
            let kind = if path.ends_with(".h") || path.ends_with(".hpp") {
                FileKind::Header
            } else {
                FileKind::TranslationUnit
            };
            corpus.insert(SourceFile {
                path: PathBuf::from(path),
                kind,
                content: content.to_string(),
            });
        }
        corpus
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_concatenate_markers_and_trailing_trim() {
        let corpus = corpus(&[("a.h", "int a;   \nint b;\t")]);
        let order = vec![PathBuf::from("a.h")];

        let result = concatenate(&corpus, &order).unwrap();
        assert_eq!(result, lines(&["// File: a.h", "int a;", "int b;"]));
    }

    #[test]
    fn test_concatenate_unknown_path_fails() {
        let corpus = corpus(&[]);
        let order = vec![PathBuf::from("ghost.h")];
        let err = concatenate(&corpus, &order).unwrap_err();
        assert!(err.to_string().contains("ghost.h"));
    }

    #[test]
    fn test_disable_local_includes() {
        let result = disable_local_includes(lines(&[
            "#include \"util.h\"",
            "#pragma once",
            "#include <vector>",
            "int x;",
        ]));
        assert_eq!(
            result,
            lines(&[
                "// #include \"util.h\"  // Local include commented out",
                "// #pragma once  // Pragma once commented out",
                "#include <vector>",
                "int x;",
            ])
        );
    }

    #[test]
    fn test_disable_preserves_indented_include_text() {
        let result = disable_local_includes(lines(&["  #include \"a.h\""]));
        assert_eq!(
            result,
            lines(&["//   #include \"a.h\"  // Local include commented out"])
        );
    }

    #[test]
    fn test_hoist_dedup_first_occurrence_order() {
        let result = hoist_includes(
            lines(&[
                "#include <vector>",
                "int a;",
                "#include <string>",
                "#include <vector>",
                "int b;",
            ]),
            ConditionalTracking::Flat,
        );
        assert_eq!(
            result,
            lines(&[
                "#include <vector>",
                "#include <string>",
                "",
                "",
                "int a;",
                "int b;",
            ])
        );
    }

    #[test]
    fn test_hoist_skips_include_inside_conditional() {
        // Scenario: include under #ifdef stays in place, include outside is hoisted
        let result = hoist_includes(
            lines(&[
                "#ifdef _WIN32",
                "#include <windows.h>",
                "#endif",
                "#include <vector>",
            ]),
            ConditionalTracking::Flat,
        );
        assert_eq!(
            result,
            lines(&[
                "#include <vector>",
                "",
                "",
                "#ifdef _WIN32",
                "#include <windows.h>",
                "#endif",
            ])
        );
    }

    #[test]
    fn test_hoist_flat_tracker_premature_reset() {
        // Documented limitation of the flat tracker: the inner #endif resets
        // the state while the outer block is still logically open, so the
        // include after it is (incorrectly) hoisted.
        let result = hoist_includes(
            lines(&[
                "#ifdef OUTER",
                "#ifdef INNER",
                "int inner;",
                "#endif",
                "#include <map>",
                "#endif",
            ]),
            ConditionalTracking::Flat,
        );
        assert_eq!(
            result,
            lines(&[
                "#include <map>",
                "",
                "",
                "#ifdef OUTER",
                "#ifdef INNER",
                "int inner;",
                "#endif",
                "#endif",
            ])
        );
    }

    #[test]
    fn test_hoist_nested_tracker_keeps_outer_block_closed() {
        // Same stream under depth tracking: the include is still inside the
        // outer block and stays in place.
        let result = hoist_includes(
            lines(&[
                "#ifdef OUTER",
                "#ifdef INNER",
                "int inner;",
                "#endif",
                "#include <map>",
                "#endif",
            ]),
            ConditionalTracking::Nested,
        );
        assert_eq!(
            result,
            lines(&[
                "",
                "",
                "#ifdef OUTER",
                "#ifdef INNER",
                "int inner;",
                "#endif",
                "#include <map>",
                "#endif",
            ])
        );
    }

    #[test]
    fn test_hoist_nested_unbalanced_endif_saturates() {
        let result = hoist_includes(
            lines(&["#endif", "#include <set>"]),
            ConditionalTracking::Nested,
        );
        assert_eq!(result, lines(&["#include <set>", "", "", "#endif"]));
    }

    #[test]
    fn test_strip_comments_keeps_file_markers() {
        let result = strip_comments(lines(&[
            "// File: a.h",
            "// an ordinary comment",
            "// #include \"a.h\"  // Local include commented out",
            "int x;",
        ]));
        assert_eq!(result, lines(&["// File: a.h", "int x;"]));
    }

    #[test]
    fn test_strip_blank_lines() {
        let result = strip_blank_lines(lines(&["int x;", "", "   ", "\t", "int y;"]));
        assert_eq!(result, lines(&["int x;", "int y;"]));
    }

    #[test]
    fn test_amalgamate_trivial_corpus_is_verbatim() {
        // No includes, no comments, no blanks: guard + marker + content
        let corpus = corpus(&[("a.h", "int a;\nint aa;"), ("b.h", "int b;")]);
        let order = vec![PathBuf::from("a.h"), PathBuf::from("b.h")];

        let artifact = amalgamate(&corpus, &order, ConditionalTracking::Flat).unwrap();
        assert_eq!(
            artifact,
            "#pragma once\n\
             // File: a.h\n\
             int a;\n\
             int aa;\n\
             // File: b.h\n\
             int b;\n"
        );
    }

    #[test]
    fn test_amalgamate_full_pipeline() {
        let corpus = corpus(&[
            ("a.h", "#pragma once\n#include <vector>\nint a;"),
            (
                "b.h",
                "#pragma once\n#include \"a.h\"\n#include <vector>\n\n// helper\nint b;",
            ),
        ]);
        let order = vec![PathBuf::from("a.h"), PathBuf::from("b.h")];

        let artifact = amalgamate(&corpus, &order, ConditionalTracking::Flat).unwrap();
        assert_eq!(
            artifact,
            "#pragma once\n\
             #include <vector>\n\
             // File: a.h\n\
             int a;\n\
             // File: b.h\n\
             int b;\n"
        );
    }

    #[test]
    fn test_amalgamate_conditional_include_left_in_place() {
        let corpus = corpus(&[(
            "p.h",
            "#ifdef _WIN32\n#include <windows.h>\n#endif\n#include <cstdio>\nint p;",
        )]);
        let order = vec![PathBuf::from("p.h")];

        let artifact = amalgamate(&corpus, &order, ConditionalTracking::Flat).unwrap();
        assert_eq!(
            artifact,
            "#pragma once\n\
             #include <cstdio>\n\
             // File: p.h\n\
             #ifdef _WIN32\n\
             #include <windows.h>\n\
             #endif\n\
             int p;\n"
        );
    }
}
