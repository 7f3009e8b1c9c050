use crate::error::{IndexerError, Result};
use crate::stats::IndexStats;
use std::path::Path;
use std::time::Instant;
use vectormd_sectionizer::{sectionize, Section};
use vectormd_vector_store::{
    ArtifactPaths, EmbeddingModel, EmbeddingTemplates, IndexMeta, IndexedSection, Metric,
    ModelSpec, SectionDataset, StoreConfig, VectorStore, VectorStoreError,
};

pub const DEFAULT_BATCH_SIZE: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexOptions {
    pub batch_size: usize,
    pub metric: Metric,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            metric: Metric::default(),
        }
    }
}

/// An embedding model together with the store it produced.
#[derive(Debug)]
pub struct SectionIndex {
    model: EmbeddingModel,
    store: VectorStore,
}

impl SectionIndex {
    pub fn model(&self) -> &EmbeddingModel {
        &self.model
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    pub fn into_parts(self) -> (EmbeddingModel, VectorStore) {
        (self.model, self.store)
    }

    /// Write model, dataset and vector index as three artifacts.
    pub fn save(&self, paths: &ArtifactPaths) -> Result<()> {
        self.model.save(&paths.model_dir)?;
        self.store.save(paths)?;
        Ok(())
    }
}

/// Turns a markdown document into a queryable [`SectionIndex`].
pub struct DocumentIndexer {
    templates: EmbeddingTemplates,
    options: IndexOptions,
}

impl DocumentIndexer {
    pub fn new(templates: EmbeddingTemplates, options: IndexOptions) -> Result<Self> {
        templates.validate()?;
        Ok(Self { templates, options })
    }

    pub fn templates(&self) -> &EmbeddingTemplates {
        &self.templates
    }

    /// Sectionize `markdown_path`, load the model and embed every heading.
    /// When `persist_to` is given the result is also written to disk.
    pub fn setup(
        &self,
        markdown_path: &Path,
        spec: &ModelSpec,
        persist_to: Option<&StoreConfig>,
        on_batch: impl FnMut(usize, usize),
    ) -> Result<(SectionIndex, IndexStats)> {
        let sections = read_sections(markdown_path)?;

        // Model load failures are fatal; there is nothing to fall back to.
        let model = EmbeddingModel::load(spec)?;
        let (index, mut stats) = self.index_sections(model, sections, on_batch)?;

        if let Some(store) = persist_to {
            let paths = store.paths();
            index.save(&paths)?;
            stats.persisted = true;
            log::info!("Index persisted under {}", store.dir.display());
        }
        Ok((index, stats))
    }

    /// Embed `sections` in batches and build the vector store.
    ///
    /// `on_batch(done, total)` is called after every batch.
    pub fn index_sections(
        &self,
        mut model: EmbeddingModel,
        sections: Vec<Section>,
        mut on_batch: impl FnMut(usize, usize),
    ) -> Result<(SectionIndex, IndexStats)> {
        let start = Instant::now();
        let mut stats = IndexStats::new();
        let total = sections.len();

        let trimmed: Vec<String> = sections
            .iter()
            .map(|s| self.templates.render_heading(s.trimmed_heading()))
            .collect();

        let batch_size = self.options.batch_size.max(1);
        let mut embeddings = Vec::with_capacity(total);
        for batch in trimmed.chunks(batch_size) {
            embeddings.extend(model.embed_batch(batch)?);
            stats.batches += 1;
            on_batch(embeddings.len(), total);
            log::debug!("Embedded {}/{total} headings", embeddings.len());
        }

        if embeddings.len() != total {
            return Err(VectorStoreError::EmbeddingError(format!(
                "model returned {} vectors for {total} headings",
                embeddings.len()
            ))
            .into());
        }
        let indexed: Vec<IndexedSection> = sections
            .into_iter()
            .zip(embeddings)
            .map(|(section, embedding)| IndexedSection::new(section, embedding))
            .collect();

        let meta = IndexMeta {
            model_id: model.model_id(),
            template_hash: self.templates.template_hash(),
        };
        let store = VectorStore::build(SectionDataset::new(indexed), self.options.metric, meta)?;

        stats.sections = store.len();
        stats.dimension = store.dimension();
        stats.model_id = model.model_id();
        stats.time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "Indexed {} sections ({} dims, {} batches) in {} ms",
            stats.sections,
            stats.dimension,
            stats.batches,
            stats.time_ms
        );

        Ok((SectionIndex { model, store }, stats))
    }
}

/// Read and sectionize a markdown file. A file without headings is an error.
pub fn read_sections(markdown_path: &Path) -> Result<Vec<Section>> {
    if !markdown_path.is_file() {
        return Err(IndexerError::InvalidPath(format!(
            "File does not exist: {}",
            markdown_path.display()
        )));
    }
    let markdown = std::fs::read_to_string(markdown_path)?;
    let sections = sectionize(&markdown);
    if sections.is_empty() {
        return Err(IndexerError::NoSections(
            markdown_path.display().to_string(),
        ));
    }
    log::info!(
        "Found {} sections in {}",
        sections.len(),
        markdown_path.display()
    );
    Ok(sections)
}
