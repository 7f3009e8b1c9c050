use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{0} not initialized. Please run `vmd-init` first.")]
    NotInitialized(&'static str),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] vectormd_vector_store::VectorStoreError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Selection {index} is out of range ({available} results)")]
    InvalidSelection { index: usize, available: usize },

    #[error("Embedding instruction changed since the index was built; rerun `vmd-init`")]
    TemplateMismatch,

    #[error("Index was built with model {index} but {loaded} is loaded; rerun `vmd-init`")]
    ModelMismatch { index: String, loaded: String },

    #[error("UTC offset of {0} hours is out of range")]
    InvalidUtcOffset(i32),
}
