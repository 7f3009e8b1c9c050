//! # VectorMD Vector Store
//!
//! Embedding models and nearest-neighbor storage for markdown sections.
//!
//! ## Features
//!
//! - **Instruction templates** shared by headings and queries
//! - **Embeddings** via ONNX Runtime, or a weight-free hashing model
//! - **Exact flat index** (squared L2 or cosine distance) over `ndarray`
//! - **Persistent storage** as three artifacts: model, dataset, index
//!
//! ## Architecture
//!
//! ```text
//! Section[]
//!     │
//!     ├──> EmbeddingTemplates
//!     │      └─> "<instruction><heading>"
//!     │
//!     ├──> EmbeddingModel (ONNX / hashing)
//!     │      └─> Vec<f32>
//!     │
//!     └──> VectorStore
//!            ├─> SectionDataset  (<name>.dataset/)
//!            └─> FlatIndex       (<name>.index.json)
//! ```
//!
//! ## Example
//!
//! ```
//! use vectormd_sectionizer::Section;
//! use vectormd_vector_store::{
//!     EmbeddingModel, EmbeddingTemplates, IndexMeta, IndexedSection, Metric, ModelSpec,
//!     SectionDataset, VectorStore,
//! };
//!
//! # fn main() -> vectormd_vector_store::Result<()> {
//! let templates = EmbeddingTemplates::default();
//! let mut model = EmbeddingModel::load(&ModelSpec::default())?;
//!
//! let section = Section::new("# Read a file", "std::fs::read_to_string");
//! let vector = model.embed(&templates.render_heading(section.trimmed_heading()))?;
//! let dataset = SectionDataset::new(vec![IndexedSection::new(section, vector)]);
//! let meta = IndexMeta {
//!     model_id: model.model_id(),
//!     template_hash: templates.template_hash(),
//! };
//! let store = VectorStore::build(dataset, Metric::L2, meta)?;
//!
//! let query = model.embed(&templates.render_query("read a file"))?;
//! let hits = store.search(&query, 5)?;
//! assert_eq!(hits[0].heading, "# Read a file");
//! # Ok(())
//! # }
//! ```

mod dataset;
mod embeddings;
mod error;
mod index;
mod io;
mod paths;
mod store;
mod templates;
mod types;

pub use dataset::{SectionDataset, SECTION_DATASET_SCHEMA_VERSION};
pub use embeddings::{
    EmbeddingModel, HashingEmbedder, ModelSpec, OnnxEmbedder, MODEL_MANIFEST_FILE,
    ONNX_MODEL_FILE, TOKENIZER_FILE,
};
pub use error::{Result, VectorStoreError};
pub use index::{FlatIndex, Metric, Neighbor};
pub use paths::{ArtifactPaths, StoreConfig, DEFAULT_INDEX_NAME};
pub use store::{IndexMeta, VectorStore, VECTOR_INDEX_SCHEMA_VERSION};
pub use templates::{EmbeddingTemplates, DEFAULT_INSTRUCTION, EMBEDDING_TEMPLATES_SCHEMA_VERSION};
pub use types::{IndexedSection, SearchResult};

// Re-export sectionizer types for convenience
pub use vectormd_sectionizer::Section;
