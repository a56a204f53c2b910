//! Parsing of `git branch` output.

/// Local branches as listed by `git branch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchList {
    names: Vec<String>,
    current: Option<String>,
}

impl BranchList {
    /// Parses `git branch` output, dropping the `*` marker.
    #[must_use]
    pub fn parse(output: &str) -> Self {
        let mut list = Self::default();

        for line in output.lines() {
            let name = line.trim_matches(|c| c == '*' || c == ' ').trim();
            if name.is_empty() {
                continue;
            }
            if line.trim_start().starts_with('*') {
                list.current = Some(name.to_string());
            }
            list.names.push(name.to_string());
        }
        list
    }

    /// Branch names in git's order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The checked-out branch.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// One branch per line, current one marked.
    #[must_use]
    pub fn render(&self) -> String {
        self.names
            .iter()
            .map(|n| {
                if self.current() == Some(n.as_str()) {
                    format!("* {n}")
                } else {
                    format!("  {n}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_current() {
        let list = BranchList::parse("  develop\n* main\n  feature/login\n");
        assert_eq!(list.names(), ["develop", "main", "feature/login"]);
        assert_eq!(list.current(), Some("main"));
        assert!(list.contains("feature/login"));
        assert!(!list.contains("feature"));
    }

    #[test]
    fn blank_output_is_empty() {
        let list = BranchList::parse("\n");
        assert!(list.is_empty());
        assert_eq!(list.current(), None);
    }

    #[test]
    fn render_marks_current() {
        let list = BranchList::parse("  develop\n* main\n");
        assert_eq!(list.render(), "  develop\n* main");
    }
}
