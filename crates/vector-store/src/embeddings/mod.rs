mod hashing;
mod onnx;

pub use hashing::HashingEmbedder;
pub use onnx::OnnxEmbedder;

use crate::error::{Result, VectorStoreError};
use crate::io::write_atomic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MODEL_MANIFEST_SCHEMA_VERSION: u32 = 1;
pub const MODEL_MANIFEST_FILE: &str = "model.json";
pub const ONNX_MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Which embedding backend to load and how.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    /// ONNX export of a sentence-embedding model with its `tokenizer.json`.
    Onnx {
        dir: PathBuf,
        #[serde(default = "default_max_length")]
        max_length: usize,
    },
    /// Weight-free signed feature hashing.
    Hashing {
        #[serde(default = "default_hashing_dimension")]
        dimension: usize,
    },
}

fn default_max_length() -> usize {
    512
}

fn default_hashing_dimension() -> usize {
    384
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self::Hashing {
            dimension: default_hashing_dimension(),
        }
    }
}

impl ModelSpec {
    pub fn onnx(dir: impl Into<PathBuf>) -> Self {
        Self::Onnx {
            dir: dir.into(),
            max_length: default_max_length(),
        }
    }

    fn resolved_against(&self, base: &Path) -> Self {
        match self {
            Self::Onnx { dir, max_length } if dir.is_relative() => Self::Onnx {
                dir: base.join(dir),
                max_length: *max_length,
            },
            other => other.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelManifest {
    schema_version: u32,
    model_id: String,
    spec: ModelSpec,
}

/// A loaded embedding model.
pub struct EmbeddingModel {
    model_id: String,
    backend: Backend,
}

enum Backend {
    Onnx(OnnxEmbedder),
    Hashing(HashingEmbedder),
}

impl std::fmt::Debug for EmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EmbeddingModel").field(&self.model_id).finish()
    }
}

impl EmbeddingModel {
    /// Load the model described by `spec`. Missing weights are fatal.
    pub fn load(spec: &ModelSpec) -> Result<Self> {
        match spec {
            ModelSpec::Onnx { dir, max_length } => {
                log::info!("Loading ONNX embedding model from {}", dir.display());
                let model_id = format!(
                    "onnx:{}",
                    dir.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| dir.display().to_string())
                );
                Ok(Self {
                    model_id,
                    backend: Backend::Onnx(OnnxEmbedder::load(dir, *max_length)?),
                })
            }
            ModelSpec::Hashing { dimension } => {
                log::info!("Using hashing embedder ({dimension} dims)");
                Ok(Self {
                    model_id: format!("hashing-{dimension}"),
                    backend: Backend::Hashing(HashingEmbedder::new(*dimension)?),
                })
            }
        }
    }

    /// Load a model previously written by [`EmbeddingModel::save`].
    pub fn load_saved(dir: &Path) -> Result<Self> {
        let manifest_path = dir.join(MODEL_MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(VectorStoreError::ArtifactMissing(manifest_path));
        }
        let bytes = std::fs::read(&manifest_path)?;
        let manifest: ModelManifest = serde_json::from_slice(&bytes)?;
        if manifest.schema_version != MODEL_MANIFEST_SCHEMA_VERSION {
            return Err(VectorStoreError::IndexCorrupt(format!(
                "model manifest schema_version {} (expected {MODEL_MANIFEST_SCHEMA_VERSION})",
                manifest.schema_version
            )));
        }
        let mut model = Self::load(&manifest.spec.resolved_against(dir))?;
        model.model_id = manifest.model_id;
        Ok(model)
    }

    /// Persist the model so [`EmbeddingModel::load_saved`] can restore it
    /// without the original source directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let spec = match &self.backend {
            Backend::Onnx(model) => {
                for name in [ONNX_MODEL_FILE, TOKENIZER_FILE] {
                    let src = model.dir().join(name);
                    let dst = dir.join(name);
                    if src != dst {
                        std::fs::copy(&src, &dst)?;
                    }
                }
                ModelSpec::Onnx {
                    dir: PathBuf::from("."),
                    max_length: model.max_length(),
                }
            }
            Backend::Hashing(model) => ModelSpec::Hashing {
                dimension: model.dimension(),
            },
        };
        let manifest = ModelManifest {
            schema_version: MODEL_MANIFEST_SCHEMA_VERSION,
            model_id: self.model_id.clone(),
            spec,
        };
        write_atomic(
            &dir.join(MODEL_MANIFEST_FILE),
            &serde_json::to_vec_pretty(&manifest)?,
        )?;
        log::info!("Saved embedding model {} to {}", self.model_id, dir.display());
        Ok(())
    }

    /// Identifier recorded with an index; survives a save/load round trip.
    #[must_use]
    pub fn model_id(&self) -> String {
        self.model_id.clone()
    }

    /// Embed already-rendered texts. Output vectors are L2-normalised and
    /// returned in input order.
    pub fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        match &mut self.backend {
            Backend::Onnx(model) => model.embed_batch(texts),
            Backend::Hashing(model) => Ok(texts.iter().map(|t| model.embed(t)).collect()),
        }
    }

    pub fn embed(&mut self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| VectorStoreError::EmbeddingError("model returned no vector".into()))
    }
}

pub(crate) fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}
