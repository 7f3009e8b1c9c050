use serde::{Deserialize, Serialize};
use vectormd_sectionizer::Section;

/// A section together with the embedding of its heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedSection {
    pub heading: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

impl IndexedSection {
    pub fn new(section: Section, embedding: Vec<f32>) -> Self {
        Self {
            heading: section.heading,
            content: section.content,
            embedding,
        }
    }

    #[must_use]
    pub fn section(&self) -> Section {
        Section::new(self.heading.clone(), self.content.clone())
    }
}

/// One retrieved section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Position of the section in document order.
    pub position: usize,
    pub heading: String,
    pub content: String,
    pub score: f32,
}
