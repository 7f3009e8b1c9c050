use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vectormd_indexer::{IndexOptions, DEFAULT_BATCH_SIZE};
use vectormd_search::{DEFAULT_TOP_K, DEFAULT_UTC_OFFSET_HOURS};
use vectormd_vector_store::{
    EmbeddingTemplates, Metric, ModelSpec, StoreConfig, DEFAULT_INDEX_NAME, DEFAULT_INSTRUCTION,
    EMBEDDING_TEMPLATES_SCHEMA_VERSION,
};

pub const CONFIG_ENV: &str = "VECTORMD_CONFIG";
pub const MODEL_DIR_ENV: &str = "VECTORMD_MODEL_DIR";
const APP_DIR_NAME: &str = "vectormd";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "log.md";

/// Settings shared by `vmd-init` and `vmd`. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreSection,
    pub embedding: EmbeddingSection,
    pub search: SearchSection,
    pub journal: JournalSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub dir: PathBuf,
    pub index_name: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbeddingSection {
    pub instruction: String,
    pub max_chars: usize,
    pub batch_size: usize,
    pub metric: Metric,
    pub model: ModelSpec,
}

impl Default for EmbeddingSection {
    fn default() -> Self {
        let templates = EmbeddingTemplates::default();
        Self {
            instruction: DEFAULT_INSTRUCTION.to_string(),
            max_chars: templates.max_chars,
            batch_size: DEFAULT_BATCH_SIZE,
            metric: Metric::default(),
            model: ModelSpec::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSection {
    pub top_k: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalSection {
    pub path: PathBuf,
    pub utc_offset_hours: i32,
}

impl Default for JournalSection {
    fn default() -> Self {
        Self {
            path: default_data_dir().join(LOG_FILE_NAME),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// `<config_dir>/vectormd/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Resolve configuration: explicit path, then `$VECTORMD_CONFIG`, then the
    /// per-user config file, then built-in defaults. `$VECTORMD_MODEL_DIR`
    /// overrides the model with an ONNX directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    log::debug!("No config file found; using defaults");
                    Self::default()
                }
            },
        };

        if let Some(dir) = std::env::var_os(MODEL_DIR_ENV) {
            log::info!("{MODEL_DIR_ENV} set; using ONNX model in {dir:?}");
            config.embedding.model = ModelSpec::onnx(PathBuf::from(dir));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Relative paths in a config file are relative to that file.
    fn resolve_relative_to(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        rebase(&mut self.store.dir);
        rebase(&mut self.journal.path);
        if let ModelSpec::Onnx { dir, .. } = &mut self.embedding.model {
            rebase(dir);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.top_k == 0 {
            bail!("search.top_k must be at least 1");
        }
        if self.embedding.batch_size == 0 {
            bail!("embedding.batch_size must be at least 1");
        }
        if self.store.index_name.trim().is_empty() {
            bail!("store.index_name must not be empty");
        }
        self.templates().validate()?;
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            dir: self.store.dir.clone(),
            index_name: self.store.index_name.clone(),
        }
    }

    pub fn templates(&self) -> EmbeddingTemplates {
        EmbeddingTemplates {
            schema_version: EMBEDDING_TEMPLATES_SCHEMA_VERSION,
            max_chars: self.embedding.max_chars,
            instruction: self.embedding.instruction.clone(),
        }
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            batch_size: self.embedding.batch_size,
            metric: self.embedding.metric,
        }
    }
}
