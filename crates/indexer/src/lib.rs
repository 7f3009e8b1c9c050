//! # VectorMD Indexer
//!
//! One-time setup: markdown file to persisted section index.
//!
//! ## Pipeline
//!
//! ```text
//! Markdown file
//!     │
//!     ├──> Sectionizer
//!     │      └─> (heading, content)[]
//!     │
//!     ├──> Embedding model (batched, instruction-prefixed headings)
//!     │      └─> Vec<f32>[]
//!     │
//!     └──> VectorStore
//!            └─> model / dataset / index artifacts
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use vectormd_indexer::{DocumentIndexer, IndexOptions};
//! use vectormd_vector_store::{EmbeddingTemplates, ModelSpec, StoreConfig};
//!
//! fn main() -> vectormd_indexer::Result<()> {
//!     let indexer = DocumentIndexer::new(EmbeddingTemplates::default(), IndexOptions::default())?;
//!     let store = StoreConfig::new("/var/lib/vectormd");
//!     let (_index, stats) = indexer.setup(
//!         Path::new("vecDB.md"),
//!         &ModelSpec::default(),
//!         Some(&store),
//!         |_, _| {},
//!     )?;
//!
//!     println!("Indexed {} sections in {} batches", stats.sections, stats.batches);
//!     Ok(())
//! }
//! ```

mod error;
mod indexer;
mod stats;

pub use error::{IndexerError, Result};
pub use indexer::{read_sections, DocumentIndexer, IndexOptions, SectionIndex, DEFAULT_BATCH_SIZE};
pub use stats::IndexStats;
