use crate::error::{Result, VectorStoreError};
use crate::io::write_atomic;
use crate::types::IndexedSection;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SECTION_DATASET_SCHEMA_VERSION: u32 = 1;
const SECTIONS_FILE: &str = "sections.json";

/// Ordered indexed sections. Position `i` here is row `i` of the vector index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDataset {
    schema_version: u32,
    sections: Vec<IndexedSection>,
}

impl SectionDataset {
    pub fn new(sections: Vec<IndexedSection>) -> Self {
        Self {
            schema_version: SECTION_DATASET_SCHEMA_VERSION,
            sections,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&IndexedSection> {
        self.sections.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedSection> {
        self.sections.iter()
    }

    #[must_use]
    pub fn embeddings(&self) -> Vec<Vec<f32>> {
        self.sections.iter().map(|s| s.embedding.clone()).collect()
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        write_atomic(&dir.join(SECTIONS_FILE), &serde_json::to_vec(self)?)?;
        Ok(())
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SECTIONS_FILE);
        if !path.exists() {
            return Err(VectorStoreError::ArtifactMissing(path));
        }
        let bytes = std::fs::read(&path)?;
        let dataset: Self = serde_json::from_slice(&bytes)?;
        if dataset.schema_version != SECTION_DATASET_SCHEMA_VERSION {
            return Err(VectorStoreError::IndexCorrupt(format!(
                "{}: schema_version {} (expected {SECTION_DATASET_SCHEMA_VERSION})",
                path.display(),
                dataset.schema_version
            )));
        }
        Ok(dataset)
    }
}
