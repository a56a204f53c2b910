//! Commit history with selectable hashes.
//!
//! Each line of `git log --oneline --graph --decorate --all` is scanned for
//! the first run of 7 to 40 lowercase hex characters. That run becomes the
//! line's link target for `git show`. This is a heuristic: a hex-looking
//! word in a commit subject can be picked up when the real hash is absent
//! from the line, and no attempt is made to tell them apart.

use std::fmt::Write as _;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Arguments for the graph log shown in the history view.
pub const LOG_ARGS: [&str; 5] = ["log", "--oneline", "--graph", "--decorate", "--all"];

static HASH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[0-9a-f]{7,40}\b").unwrap_or_else(|e| panic!("invalid hash pattern: {e}"))
});

/// Returns the byte range of the first hash-like run in `line`.
#[must_use]
pub fn find_hash(line: &str) -> Option<Range<usize>> {
    HASH_PATTERN.find(line).map(|m| m.range())
}

/// Returns the first hash-like run in `line`.
#[must_use]
pub fn extract_hash(line: &str) -> Option<&str> {
    HASH_PATTERN.find(line).map(|m| m.as_str())
}

/// One line of log output and the position of its link, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    /// The line as git printed it.
    pub text: String,
    /// Byte range of the hash inside `text`.
    pub link: Option<Range<usize>>,
}

impl HistoryLine {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            link: find_hash(text),
        }
    }

    /// The linked hash text.
    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        extract_hash(&self.text)
    }
}

/// Parsed history view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    lines: Vec<HistoryLine>,
}

impl History {
    /// Parses raw log output.
    #[must_use]
    pub fn parse(output: &str) -> Self {
        Self {
            lines: output.lines().map(HistoryLine::new).collect(),
        }
    }

    /// All lines, linked or not.
    #[must_use]
    pub fn lines(&self) -> &[HistoryLine] {
        &self.lines
    }

    /// Whether the log had no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Linked hashes in display order; entry numbers start at 1.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(HistoryLine::hash)
    }

    /// The hash for entry `number` (1-based).
    #[must_use]
    pub fn link(&self, number: usize) -> Option<&str> {
        number.checked_sub(1).and_then(|i| self.links().nth(i))
    }

    /// Renders the view with `[n]` before every linked line.
    #[must_use]
    pub fn render(&self) -> String {
        let width = self.links().count().to_string().len();
        let mut out = String::new();
        let mut number = 0;

        for line in self.lines() {
            if line.link.is_some() {
                number += 1;
                let _ = writeln!(out, "[{number:>width$}] {}", line.text);
            } else {
                let _ = writeln!(out, " {:width$}  {}", "", line.text);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_short_hash_from_graph_line() {
        assert_eq!(extract_hash("* a1b2c3d Initial commit"), Some("a1b2c3d"));
    }

    #[test]
    fn extracts_full_hash() {
        let full = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(extract_hash(&format!("* {full} msg")), Some(full));
    }

    #[test]
    fn ignores_runs_outside_length_bounds() {
        assert_eq!(extract_hash("* abc123 short"), None);
        let too_long = "a".repeat(41);
        assert_eq!(extract_hash(&format!("* {too_long}")), None);
    }

    #[test]
    fn ignores_uppercase_hex() {
        assert_eq!(extract_hash("* A1B2C3D subject"), None);
    }

    #[test]
    fn first_match_wins_even_in_subject() {
        // Graph-only lines carry no hash, so a hex word in the subject is taken.
        assert_eq!(
            extract_hash("| * deadbeef0 fix cafebabe1 regression"),
            Some("deadbeef0")
        );
        assert_eq!(extract_hash("|/  merged facade00 into main"), Some("facade00"));
    }

    #[test]
    fn requires_word_boundaries() {
        assert_eq!(extract_hash("* xa1b2c3d4 subject"), None);
    }

    #[test]
    fn decorations_do_not_hide_hash() {
        let line = "* 9fceb02 (HEAD -> main, origin/main) Add README";
        assert_eq!(extract_hash(line), Some("9fceb02"));
        assert_eq!(find_hash(line), Some(2..9));
    }

    #[test]
    fn history_numbers_only_linked_lines() {
        let log = "* 9fceb02 (HEAD -> main) Add README\n|\\\n| * 3c4e1a7 Feature work\n|/\n* a1b2c3d Initial commit\n";
        let history = History::parse(log);

        assert_eq!(history.lines().len(), 5);
        assert_eq!(history.links().collect::<Vec<_>>(), ["9fceb02", "3c4e1a7", "a1b2c3d"]);
        assert_eq!(history.link(1), Some("9fceb02"));
        assert_eq!(history.link(3), Some("a1b2c3d"));
        assert_eq!(history.link(0), None);
        assert_eq!(history.link(4), None);
    }

    #[test]
    fn render_marks_linked_lines() {
        let history = History::parse("* 9fceb02 Add README\n|\n* a1b2c3d Initial commit\n");
        let rendered = history.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "[1] * 9fceb02 Add README");
        assert_eq!(lines[1], "    |");
        assert_eq!(lines[2], "[2] * a1b2c3d Initial commit");
    }

    #[test]
    fn empty_log_is_empty_history() {
        let history = History::parse("");
        assert!(history.is_empty());
        assert_eq!(history.link(1), None);
    }
}
