//! Indent-level counting.
//!
//! The expander resolves one nesting level per pass, so it needs to know
//! how deep the argument tree goes. Depth is tracked with a stack of
//! indent widths that is reset by every column-0 line.

use crate::line::Line;

/// Deepest nesting level found in `lines` (0 for a flat document).
pub fn count_levels(lines: &[String]) -> usize {
    let mut widths: Vec<usize> = Vec::new();
    let mut deepest = 0;

    for line in lines {
        match Line::classify(line) {
            kind if kind.is_ignorable() => {}
            Line::TreeNode { indent, .. } if indent > 0 => {
                while widths.last().is_some_and(|&w| w > indent) {
                    widths.pop();
                }
                if widths.last().is_none_or(|&w| w < indent) {
                    widths.push(indent);
                }
                deepest = deepest.max(widths.len());
            }
            _ => widths.clear(),
        }
    }
    deepest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &str) -> Vec<String> {
        input.lines().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flat_document_has_no_levels() {
        assert_eq!(count_levels(&lines("$ echo\na\nb")), 0);
        assert_eq!(count_levels(&[]), 0);
    }

    #[test]
    fn worked_example_has_two_levels() {
        let input = lines("$ sudo apt install -y\npython3,-\n pil,.\n  imagetk\n pip");
        assert_eq!(count_levels(&input), 2);
    }

    #[test]
    fn siblings_do_not_add_levels() {
        let input = lines("a,-\n b,-\n  c\n d,-\n  e\n f");
        assert_eq!(count_levels(&input), 2);
    }

    #[test]
    fn deeper_tree_after_shallow_one() {
        let input = lines("a,\n b\nc,\n  d,\n    e,\n      f");
        assert_eq!(count_levels(&input), 3);
    }

    #[test]
    fn column_zero_resets() {
        let input = lines("a,\n b\nc,\n    d");
        assert_eq!(count_levels(&input), 1);
    }

    #[test]
    fn comments_and_blanks_are_ignored() {
        let input = lines("a,\n b,\n      # deeply indented note\n\n  c");
        assert_eq!(count_levels(&input), 2);
    }

    #[test]
    fn literal_line_resets() {
        let input = lines("a,\n b\n$ echo\n  c");
        assert_eq!(count_levels(&input), 1);
    }
}
