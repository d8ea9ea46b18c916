//! Indentation-tree expansion.
//!
//! A column-0 line `token,glue` declares a parent; lines indented beneath
//! it become `token` + `glue` + child. One pass resolves one level: lines
//! indented deeper than the first child are passed through untouched and
//! become direct children of their freshly expanded parent on the next
//! pass.
//!
//! ```text
//! python3,-            python3
//!  pil,.          ->   python3-pil,.      ->   python3-pil
//!   imagetk              imagetk                python3-pil.imagetk
//!  pip                 python3-pip             python3-pip
//! ```
//!
//! A parent whose glue is empty is only a prefix and is not emitted on its
//! own. Shell literals reset the tree and are preceded by a blank line so
//! the collapser starts a new command there.

use crate::levels::count_levels;
use crate::line::{strip_inline_comment, Line};

/// Current parent of indented lines within one pass.
struct Parent {
    prefix: String,
    glue: String,
    /// Indent width of the first child seen, once known.
    unit: Option<usize>,
}

/// Run exactly one expansion pass.
pub fn expand_once(lines: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut parent: Option<Parent> = None;

    for line in lines {
        match Line::classify(line) {
            Line::Blank => out.push(String::new()),
            Line::Comment | Line::Directive(_) => {}
            Line::RawLiteral(text) => {
                parent = None;
                separate(&mut out);
                out.push(text.to_string());
            }
            Line::Literal(text) => {
                parent = None;
                separate(&mut out);
                out.push(strip_inline_comment(text));
            }
            Line::TreeNode { indent: 0, text } => {
                let text = strip_inline_comment(text);
                match text.split_once(',') {
                    Some((prefix, glue)) => {
                        if !glue.is_empty() {
                            out.push(prefix.to_string());
                        }
                        parent = Some(Parent {
                            prefix: prefix.to_string(),
                            glue: glue.to_string(),
                            unit: None,
                        });
                    }
                    None => {
                        parent = None;
                        out.push(text);
                    }
                }
            }
            Line::TreeNode { indent, text } => {
                let child = parent.as_mut().and_then(|p| {
                    (*p.unit.get_or_insert(indent) == indent)
                        .then(|| format!("{}{}{}", p.prefix, p.glue, strip_inline_comment(text)))
                });
                out.push(child.unwrap_or_else(|| strip_inline_comment(line)));
            }
        }
    }
    out
}

/// Run `passes` expansion passes.
pub fn expand_passes(lines: &[String], passes: usize) -> Vec<String> {
    let mut current = lines.to_vec();
    for _ in 0..passes {
        current = expand_once(&current);
    }
    current
}

/// Fully expand a document: one pass per nesting level, at least one.
pub fn expand_lines(lines: &[String]) -> Vec<String> {
    let passes = count_levels(lines).max(1);
    tracing::debug!(passes, "expanding argument tree");
    expand_passes(lines, passes)
}

/// Make sure a literal starts after a blank line.
fn separate(out: &mut Vec<String>) {
    if out.last().is_none_or(|l| !l.is_empty()) {
        out.push(String::new());
    }
}
