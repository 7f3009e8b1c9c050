//! # VectorMD Search
//!
//! Query side of VectorMD: embed a question, fetch the nearest sections and
//! optionally journal the ones a user picked.
//!
//! ```text
//! query ──> instruction template ──> model ──> VectorStore::search ──> SearchResults
//!                                                                        │
//!                                                     selected indices ──┴──> SessionLog
//! ```

mod engine;
mod error;
mod journal;
mod results;
mod slot;

pub use engine::{QueryEngine, DEFAULT_TOP_K};
pub use error::{Result, SearchError};
pub use journal::{SessionLog, DEFAULT_UTC_OFFSET_HOURS};
pub use results::SearchResults;
pub use slot::Slot;
pub use vectormd_vector_store::SearchResult;
