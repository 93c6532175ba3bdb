use crate::errors::{Error, Result};

/// Externally supplied pattern/comment pairs, matched case-insensitively
/// against rendered instruction lines.
#[derive(Debug, Default)]
pub struct CommentSet {
    entries: Vec<CommentEntry>,
}

#[derive(Debug)]
struct CommentEntry {
    /// Stored lowercased; matching is case-insensitive.
    pattern: String,
    comment: String,
}

impl CommentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `pattern<TAB>comment` records, one per line. Blank lines are
    /// tolerated; any other field count fails the whole load rather than
    /// silently skipping the record.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 2 {
                return Err(Error::MalformedCommentRecord { line: index + 1 });
            }

            entries.push(CommentEntry {
                pattern: fields[0].to_lowercase(),
                comment: fields[1].to_string(),
            });
        }

        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All comments whose pattern occurs in `line`, in file order.
    pub fn matches(&self, line: &str) -> Vec<&str> {
        let line = line.to_lowercase();

        self.entries
            .iter()
            .filter(|entry| line.contains(&entry.pattern))
            .map(|entry| entry.comment.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_separated_records() {
        let comments = CommentSet::parse("xc_exit\thalt\n0x80000810\tMCPX revision\n").unwrap();
        assert!(!comments.is_empty());
        assert_eq!(comments.matches("xc_exit"), vec!["halt"]);
    }

    #[test]
    fn blank_lines_are_tolerated() {
        let comments = CommentSet::parse("xc_exit\thalt\n\n").unwrap();
        assert_eq!(comments.matches("xc_exit"), vec!["halt"]);
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        assert_eq!(
            CommentSet::parse("xc_exit\thalt\nno tabs here\n").unwrap_err(),
            Error::MalformedCommentRecord { line: 2 }
        );
        assert_eq!(
            CommentSet::parse("a\tb\tc\n").unwrap_err(),
            Error::MalformedCommentRecord { line: 1 }
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let comments = CommentSet::parse("XC_EXIT\thalt\n").unwrap();
        assert_eq!(comments.matches("xc_exit"), vec!["halt"]);
    }

    #[test]
    fn matches_come_back_in_file_order() {
        let comments =
            CommentSet::parse("xc_mem\tfirst\n0x00000010\tsecond\nxc_pci\tnever\n").unwrap();
        assert_eq!(
            comments.matches("xc_mem_read 0x00000010"),
            vec!["first", "second"]
        );
    }

    #[test]
    fn unmatched_line_has_no_comments() {
        let comments = CommentSet::parse("xc_exit\thalt\n").unwrap();
        assert!(comments.matches("xc_mem_read 0x00000010").is_empty());
    }
}
