use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use vectormd_vector_store::SearchResult;

const CONTENT_PREVIEW_CHARS: usize = 48;

/// Top-k sections for one query, closest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchResult>,
}

impl SearchResults {
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    #[must_use]
    pub fn headings(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.heading.as_str()).collect()
    }

    /// Hits at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<&SearchResult>> {
        indices
            .iter()
            .map(|&index| {
                self.hits.get(index).ok_or(SearchError::InvalidSelection {
                    index,
                    available: self.hits.len(),
                })
            })
            .collect()
    }

    /// Plain-text table with one row per hit: rank, heading, content preview, score.
    #[must_use]
    pub fn to_table(&self) -> String {
        let rows: Vec<[String; 4]> = self
            .hits
            .iter()
            .enumerate()
            .map(|(rank, hit)| {
                [
                    rank.to_string(),
                    hit.heading.clone(),
                    preview(&hit.content),
                    format!("{:.6}", hit.score),
                ]
            })
            .collect();

        let header = ["", "Heading", "Content", "Score"].map(str::to_string);
        let mut widths = header.clone().map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in std::iter::once(&header).chain(rows.iter()) {
            let line: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table())
    }
}

fn preview(content: &str) -> String {
    let first_line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let first_line = first_line.trim();
    if first_line.chars().count() <= CONTENT_PREVIEW_CHARS {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(CONTENT_PREVIEW_CHARS - 1).collect();
    format!("{cut}…")
}
