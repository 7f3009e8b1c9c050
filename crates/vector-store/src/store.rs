use crate::dataset::SectionDataset;
use crate::error::{Result, VectorStoreError};
use crate::index::{FlatIndex, Metric};
use crate::io::write_atomic;
use crate::paths::ArtifactPaths;
use crate::types::SearchResult;
use serde::{Deserialize, Serialize};

pub const VECTOR_INDEX_SCHEMA_VERSION: u32 = 1;

/// What the vectors were produced with. Checked before a stored index is
/// queried with a freshly loaded model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub model_id: String,
    pub template_hash: u64,
}

#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    schema_version: u32,
    metric: Metric,
    dimension: usize,
    meta: IndexMeta,
    vectors: Vec<Vec<f32>>,
}

/// Section dataset plus the vector index over its embeddings.
#[derive(Debug, Clone)]
pub struct VectorStore {
    dataset: SectionDataset,
    index: FlatIndex,
    meta: IndexMeta,
}

impl VectorStore {
    pub fn build(dataset: SectionDataset, metric: Metric, meta: IndexMeta) -> Result<Self> {
        let index = FlatIndex::build(metric, &dataset.embeddings())?;
        Ok(Self {
            dataset,
            index,
            meta,
        })
    }

    pub fn save(&self, paths: &ArtifactPaths) -> Result<()> {
        self.dataset.save(&paths.dataset_dir)?;

        let persisted = PersistedIndex {
            schema_version: VECTOR_INDEX_SCHEMA_VERSION,
            metric: self.index.metric(),
            dimension: self.index.dimension(),
            meta: self.meta.clone(),
            vectors: self.index.rows(),
        };
        write_atomic(&paths.index_file, &serde_json::to_vec(&persisted)?)?;
        log::info!(
            "Saved {} vectors ({} dims) to {}",
            self.index.len(),
            self.index.dimension(),
            paths.index_file.display()
        );
        Ok(())
    }

    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        if !paths.index_file.exists() {
            return Err(VectorStoreError::ArtifactMissing(paths.index_file.clone()));
        }
        let dataset = SectionDataset::load(&paths.dataset_dir)?;

        let bytes = std::fs::read(&paths.index_file)?;
        let persisted: PersistedIndex = serde_json::from_slice(&bytes)?;
        if persisted.schema_version != VECTOR_INDEX_SCHEMA_VERSION {
            return Err(VectorStoreError::IndexCorrupt(format!(
                "{}: schema_version {} (expected {VECTOR_INDEX_SCHEMA_VERSION})",
                paths.index_file.display(),
                persisted.schema_version
            )));
        }
        if persisted.vectors.len() != dataset.len() {
            return Err(VectorStoreError::IndexCorrupt(format!(
                "index has {} vectors but dataset has {} sections",
                persisted.vectors.len(),
                dataset.len()
            )));
        }

        if let Some(position) = dataset
            .iter()
            .zip(&persisted.vectors)
            .position(|(section, vector)| &section.embedding != vector)
        {
            return Err(VectorStoreError::IndexCorrupt(format!(
                "embedding of section {position} differs between dataset and index"
            )));
        }

        let index = FlatIndex::build(persisted.metric, &persisted.vectors)?;
        if !index.is_empty() && index.dimension() != persisted.dimension {
            return Err(VectorStoreError::DimensionMismatch {
                expected: persisted.dimension,
                actual: index.dimension(),
            });
        }

        log::info!(
            "Loaded index with {} sections from {}",
            dataset.len(),
            paths.index_file.display()
        );
        Ok(Self {
            dataset,
            index,
            meta: persisted.meta,
        })
    }

    /// The `k` sections whose embeddings are nearest to `query`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        self.index
            .search(query, k)?
            .into_iter()
            .map(|hit| {
                let section = self.dataset.get(hit.position).ok_or_else(|| {
                    VectorStoreError::IndexCorrupt(format!(
                        "index position {} has no section",
                        hit.position
                    ))
                })?;
                Ok(SearchResult {
                    position: hit.position,
                    heading: section.heading.clone(),
                    content: section.content.clone(),
                    score: hit.score,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.index.metric()
    }

    #[must_use]
    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    #[must_use]
    pub fn dataset(&self) -> &SectionDataset {
        &self.dataset
    }
}
