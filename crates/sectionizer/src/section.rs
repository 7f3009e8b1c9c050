use serde::{Deserialize, Serialize};

/// One heading and the text that follows it up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Full heading line, `#` markers included.
    pub heading: String,
    /// Body text; fenced code blocks are kept verbatim.
    pub content: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }

    /// Heading text without the leading `#` markers and surrounding whitespace.
    #[must_use]
    pub fn trimmed_heading(&self) -> &str {
        self.heading.trim_start().trim_start_matches('#').trim()
    }

    /// Number of leading `#` markers.
    #[must_use]
    pub fn level(&self) -> usize {
        self.heading
            .trim_start()
            .chars()
            .take_while(|c| *c == '#')
            .count()
    }

    #[must_use]
    pub fn to_markdown(&self) -> String {
        if self.content.is_empty() {
            self.heading.clone()
        } else {
            format!("{}\n{}", self.heading, self.content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_heading_strips_markers_and_whitespace() {
        let section = Section::new("###   Install  ", "");
        assert_eq!(section.trimmed_heading(), "Install");
        assert_eq!(section.level(), 3);
    }

    #[test]
    fn trimmed_heading_keeps_inner_hashes() {
        let section = Section::new("## C# tips", "");
        assert_eq!(section.trimmed_heading(), "C# tips");
        assert_eq!(section.level(), 2);
    }

    #[test]
    fn to_markdown_omits_blank_body() {
        assert_eq!(Section::new("# A", "").to_markdown(), "# A");
        assert_eq!(Section::new("# A", "x").to_markdown(), "# A\nx");
    }
}
