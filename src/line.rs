//! Line classification shared by the expansion phases.
//!
//! Every phase after conditional evaluation sees the document as a
//! sequence of classified lines rather than raw text:
//!
//! | Kind | Shape |
//! |------|-------|
//! | `Blank` | empty or whitespace-only |
//! | `Directive` | `#%...` at column 0 (left over after evaluation) |
//! | `Comment` | first non-whitespace character is `#` |
//! | `RawLiteral` | starts with `$$` |
//! | `Literal` | starts with a single `$` |
//! | `TreeNode` | anything else, with its leading-space count |

use regex::Regex;
use std::sync::LazyLock;

/// Inline comment: a `#` at the start of the text or after whitespace.
static RE_INLINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s+)#.*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Directive(&'a str),
    Literal(&'a str),
    RawLiteral(&'a str),
    TreeNode { indent: usize, text: &'a str },
}

impl<'a> Line<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.trim().is_empty() {
            return Line::Blank;
        }
        if line.starts_with("#%") {
            return Line::Directive(line);
        }
        if line.trim_start().starts_with('#') {
            return Line::Comment;
        }
        if line.starts_with("$$") {
            return Line::RawLiteral(line);
        }
        if line.starts_with('$') {
            return Line::Literal(line);
        }
        let text = line.trim_start_matches(' ');
        Line::TreeNode {
            indent: line.len() - text.len(),
            text,
        }
    }

    /// Blank, comment, and leftover directive lines carry no arguments.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Line::Blank | Line::Comment | Line::Directive(_))
    }
}

/// Remove an inline `# comment` (and the whitespace before it).
pub fn strip_inline_comment(text: &str) -> String {
    RE_INLINE_COMMENT.replace(text, "").to_string()
}

/// Split a document into owned lines.
pub fn split_lines(source: &str) -> Vec<String> {
    source.lines().map(|s| s.to_string()).collect()
}
