//! Command collapsing.
//!
//! Joins runs of expanded lines into shell command lines:
//!
//! - consecutive non-blank lines are joined with a single space
//! - a blank line ends the current command
//! - a bare `$` / `$$` marker contributes nothing, not even a separator
//! - the leading `$` / `$$` marker (and one space) is removed from each
//!   finished command

use regex::Regex;
use std::sync::LazyLock;

static RE_BARE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$\$? ?$").unwrap());
static RE_LEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$\$? ?").unwrap());

pub fn collapse_lines(lines: &[String]) -> Vec<String> {
    let mut commands = Vec::new();
    let mut current: Option<String> = None;

    for line in lines {
        if line.trim().is_empty() {
            finish(&mut current, &mut commands);
            continue;
        }
        let piece = if RE_BARE_MARKER.is_match(line) {
            ""
        } else {
            line.as_str()
        };
        match current.as_mut() {
            Some(buf) => {
                if !buf.is_empty() && !piece.is_empty() {
                    buf.push(' ');
                }
                buf.push_str(piece);
            }
            None => current = Some(piece.to_string()),
        }
    }
    finish(&mut current, &mut commands);
    commands
}

fn finish(current: &mut Option<String>, commands: &mut Vec<String>) {
    if let Some(buf) = current.take() {
        let command = RE_LEADING_MARKER.replace(&buf, "");
        if !command.trim().is_empty() {
            commands.push(command.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &str) -> Vec<String> {
        input.split('\n').map(|s| s.to_string()).collect()
    }

    #[test]
    fn joins_with_single_space() {
        assert_eq!(collapse_lines(&lines("a\nb\nc")), vec!["a b c"]);
    }

    #[test]
    fn join_is_independent_of_line_count() {
        let words: Vec<String> = (0..50).map(|i| format!("w{i}")).collect();
        assert_eq!(collapse_lines(&words), vec![words.join(" ")]);
        assert_eq!(collapse_lines(&words[..1]), vec!["w0"]);
    }

    #[test]
    fn blank_line_flushes() {
        assert_eq!(collapse_lines(&lines("a\nb\n\nc\n  \nd")), vec!["a b", "c", "d"]);
    }

    #[test]
    fn strips_literal_markers() {
        let input = lines("\n$ sudo apt install -y\npython3\npython3-pip");
        assert_eq!(
            collapse_lines(&input),
            vec!["sudo apt install -y python3 python3-pip"]
        );
    }

    #[test]
    fn raw_marker_keeps_remaining_whitespace() {
        let input = lines("\n$$   echo # hi\n\n$$");
        assert_eq!(collapse_lines(&input), vec!["  echo # hi"]);
    }

    #[test]
    fn bare_marker_starts_command_without_separator() {
        let input = lines("\n$ echo\na\n\n$\nc\nd");
        assert_eq!(collapse_lines(&input), vec!["echo a", "c d"]);
    }

    #[test]
    fn bare_marker_with_trailing_space() {
        let input = lines("\n$$ \nx");
        assert_eq!(collapse_lines(&input), vec!["x"]);
    }

    #[test]
    fn empty_input() {
        assert!(collapse_lines(&[]).is_empty());
        assert!(collapse_lines(&lines("\n\n")).is_empty());
    }
}
