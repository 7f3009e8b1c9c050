use crate::error::{Result, SearchError};
use crate::results::SearchResults;
use crate::slot::Slot;
use vectormd_indexer::SectionIndex;
use vectormd_vector_store::{
    ArtifactPaths, EmbeddingModel, EmbeddingTemplates, StoreConfig, VectorStore,
    VectorStoreError,
};

pub const DEFAULT_TOP_K: usize = 5;

/// Answers free-text queries against a section index.
///
/// The embedding model and the vector store are separate lazily loaded
/// resources: opening an engine touches no files, the first query loads
/// whatever it needs and keeps it for the life of the engine.
#[derive(Debug)]
pub struct QueryEngine {
    paths: Option<ArtifactPaths>,
    templates: EmbeddingTemplates,
    top_k: usize,
    model: Slot<EmbeddingModel>,
    store: Slot<VectorStore>,
}

impl QueryEngine {
    /// Engine backed by persisted artifacts under `store`.
    pub fn open(store: &StoreConfig, templates: EmbeddingTemplates, top_k: usize) -> Self {
        Self {
            paths: Some(store.paths()),
            templates,
            top_k,
            model: Slot::Unloaded,
            store: Slot::Unloaded,
        }
    }

    /// Engine over an index built in this process; nothing is read from disk.
    pub fn from_index(index: SectionIndex, templates: EmbeddingTemplates, top_k: usize) -> Self {
        let (model, store) = index.into_parts();
        Self {
            paths: None,
            templates,
            top_k,
            model: Slot::Loaded(model),
            store: Slot::Loaded(store),
        }
    }

    #[must_use]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.model.is_loaded() && self.store.is_loaded()
    }

    /// Load model and store now instead of on the first query.
    pub fn load(&mut self) -> Result<()> {
        self.check_compatible()
    }

    /// The `top_k` sections nearest to `query`, closest first.
    pub fn query(&mut self, query: &str) -> Result<SearchResults> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        self.check_compatible()?;

        let rendered = self.templates.render_query(query);
        let vector = self.model()?.embed(&rendered)?;
        let top_k = self.top_k;
        let hits = self.store()?.search(&vector, top_k)?;
        log::debug!("Query {query:?} returned {} hits", hits.len());

        Ok(SearchResults {
            query: query.to_string(),
            hits,
        })
    }

    /// The index must have been built with this engine's instruction and model,
    /// whether it came from disk or from this process.
    fn check_compatible(&mut self) -> Result<()> {
        let model_id = self.model()?.model_id();
        let template_hash = self.templates.template_hash();
        let meta = self.store()?.meta();
        if meta.template_hash != template_hash {
            return Err(SearchError::TemplateMismatch);
        }
        if meta.model_id != model_id {
            return Err(SearchError::ModelMismatch {
                index: meta.model_id.clone(),
                loaded: model_id,
            });
        }
        Ok(())
    }

    fn model(&mut self) -> Result<&mut EmbeddingModel> {
        let paths = self.paths.as_ref();
        self.model.get_or_try_load(|| {
            let paths = paths.ok_or(SearchError::NotInitialized("Model"))?;
            log::info!("Loading model from {}", paths.model_dir.display());
            EmbeddingModel::load_saved(&paths.model_dir).map_err(|e| match e {
                VectorStoreError::ArtifactMissing(_) => SearchError::NotInitialized("Model"),
                other => other.into(),
            })
        })
    }

    fn store(&mut self) -> Result<&mut VectorStore> {
        let paths = self.paths.as_ref();
        self.store.get_or_try_load(|| {
            let paths = paths.ok_or(SearchError::NotInitialized("Dataset"))?;
            VectorStore::load(paths).map_err(|e| match e {
                VectorStoreError::ArtifactMissing(_) => SearchError::NotInitialized("Dataset"),
                other => other.into(),
            })
        })
    }
}
