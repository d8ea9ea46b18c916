//! Extended comment stripping.
//!
//! Drops every line from a `#/*` opener through the next `#*/` closer,
//! markers included. Regions do not nest, and an opener without a closer
//! swallows the rest of the document.

use regex::Regex;
use std::sync::LazyLock;

static RE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#/\*[#\s]*$").unwrap());
static RE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\*/[#\s]*$").unwrap());

pub fn strip_extended_comments(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut in_comment = false;

    for line in lines {
        if in_comment {
            if RE_CLOSE.is_match(line) {
                in_comment = false;
            }
            continue;
        }
        if RE_OPEN.is_match(line) {
            in_comment = true;
            continue;
        }
        out.push(line.clone());
    }

    if in_comment {
        tracing::debug!("extended comment runs to end of document");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &str) -> Vec<String> {
        input.lines().map(|s| s.to_string()).collect()
    }

    #[test]
    fn removes_region_with_markers() {
        let input = lines("a\n#/*\nhidden\n#*/\nb");
        assert_eq!(strip_extended_comments(&input), vec!["a", "b"]);
    }

    #[test]
    fn markers_allow_trailing_hashes_and_spaces() {
        let input = lines("a\n#/* ##\nhidden\n#*/#  \nb");
        assert_eq!(strip_extended_comments(&input), vec!["a", "b"]);
    }

    #[test]
    fn marker_with_text_is_not_an_opener() {
        let input = lines("#/* not a block\nkept");
        assert_eq!(strip_extended_comments(&input), input);
    }

    #[test]
    fn multiple_regions() {
        let input = lines("#/*\nx\n#*/\na\n#/*\ny\n#*/\nb");
        assert_eq!(strip_extended_comments(&input), vec!["a", "b"]);
    }

    #[test]
    fn regions_do_not_nest() {
        // The inner opener is just a hidden line; the first closer ends the region.
        let input = lines("#/*\n#/*\nx\n#*/\nvisible\n#*/\nend");
        assert_eq!(strip_extended_comments(&input), vec!["visible", "#*/", "end"]);
    }

    #[test]
    fn unterminated_region_drops_rest() {
        let input = lines("a\n#/*\nb\nc");
        assert_eq!(strip_extended_comments(&input), vec!["a"]);
    }

    #[test]
    fn stripping_is_idempotent() {
        let input = lines("a\n#/*\nb\n#*/\n#*/\nc\n#/*\nd");
        let once = strip_extended_comments(&input);
        let twice = strip_extended_comments(&once);
        assert_eq!(once, twice);
    }
}
