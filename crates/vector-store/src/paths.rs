use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INDEX_NAME: &str = "vectormd";
const MODEL_SUFFIX: &str = "model";
const DATASET_SUFFIX: &str = "dataset";
const INDEX_SUFFIX: &str = "index.json";

/// Where an index bundle lives on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub dir: PathBuf,
    #[serde(default = "default_index_name")]
    pub index_name: String,
}

fn default_index_name() -> String {
    DEFAULT_INDEX_NAME.to_string()
}

impl StoreConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            index_name: default_index_name(),
        }
    }

    #[must_use]
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.dir, &self.index_name)
    }
}

/// The three artifacts of a persisted index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model_dir: PathBuf,
    pub dataset_dir: PathBuf,
    pub index_file: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, index_name: &str) -> Self {
        Self {
            model_dir: dir.join(format!("{index_name}.{MODEL_SUFFIX}")),
            dataset_dir: dir.join(format!("{index_name}.{DATASET_SUFFIX}")),
            index_file: dir.join(format!("{index_name}.{INDEX_SUFFIX}")),
        }
    }

    /// First artifact that does not exist, if any.
    #[must_use]
    pub fn first_missing(&self) -> Option<&Path> {
        [
            self.model_dir.as_path(),
            self.dataset_dir.as_path(),
            self.index_file.as_path(),
        ]
        .into_iter()
        .find(|p| !p.exists())
    }
}
