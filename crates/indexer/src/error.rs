use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] vectormd_vector_store::VectorStoreError),

    #[error("Invalid markdown path: {0}")]
    InvalidPath(String),

    #[error("No headings found in {0}; nothing to index")]
    NoSections(String),
}
