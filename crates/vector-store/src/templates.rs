use crate::error::{Result, VectorStoreError};
use serde::{Deserialize, Serialize};

pub const EMBEDDING_TEMPLATES_SCHEMA_VERSION: u32 = 1;

/// Instruction the INSTRUCTOR family of models was trained with for
/// question-to-code retrieval.
pub const DEFAULT_INSTRUCTION: &str =
    "Represent the Stackoverflow question for retrieving corresponding codes: ";

/// How text is framed before it reaches the embedding model.
///
/// Headings and queries get the same instruction prefix so both sides of a
/// lookup land in the same embedding space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingTemplates {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

fn default_schema_version() -> u32 {
    EMBEDDING_TEMPLATES_SCHEMA_VERSION
}

fn default_max_chars() -> usize {
    8192
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

impl Default for EmbeddingTemplates {
    fn default() -> Self {
        Self {
            schema_version: EMBEDDING_TEMPLATES_SCHEMA_VERSION,
            max_chars: default_max_chars(),
            instruction: default_instruction(),
        }
    }
}

impl EmbeddingTemplates {
    pub fn with_instruction(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != EMBEDDING_TEMPLATES_SCHEMA_VERSION {
            return Err(VectorStoreError::TemplateError(format!(
                "Unsupported embedding template schema_version {} (expected {EMBEDDING_TEMPLATES_SCHEMA_VERSION})",
                self.schema_version
            )));
        }

        let max_chars = self.max_chars;
        if !(256..=200_000).contains(&max_chars) {
            return Err(VectorStoreError::TemplateError(format!(
                "embedding.max_chars must be in [256, 200000] (got {max_chars})"
            )));
        }

        if self.instruction.len() >= max_chars {
            return Err(VectorStoreError::TemplateError(format!(
                "embedding.instruction is {} bytes, leaving no room for text under max_chars={max_chars}",
                self.instruction.len()
            )));
        }

        Ok(())
    }

    /// Text fed to the model for a section heading (already stripped of `#`).
    #[must_use]
    pub fn render_heading(&self, heading: &str) -> String {
        self.render(heading)
    }

    /// Text fed to the model for a user query.
    #[must_use]
    pub fn render_query(&self, query: &str) -> String {
        self.render(query)
    }

    fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(self.instruction.len() + text.len());
        push_str_bounded(&mut out, &self.instruction, self.max_chars);
        push_str_bounded(&mut out, text, self.max_chars);
        out
    }

    /// Stable fingerprint persisted with an index. A query-time mismatch means
    /// headings and queries would be embedded differently.
    #[must_use]
    pub fn template_hash(&self) -> u64 {
        let repr = format!(
            "schema_version={}\nmax_chars={}\ninstruction={}\n",
            self.schema_version, self.max_chars, self.instruction
        );
        fnv1a64(repr.as_bytes())
    }
}

fn push_str_bounded(out: &mut String, value: &str, max_chars: usize) {
    let remaining = max_chars.saturating_sub(out.len());
    if remaining == 0 {
        return;
    }
    if value.len() <= remaining {
        out.push_str(value);
        return;
    }
    out.push_str(utf8_prefix(value, remaining));
}

fn utf8_prefix(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = 0;
    for (i, _) in value.char_indices() {
        if i > max_bytes {
            break;
        }
        end = i;
    }
    &value[..end]
}

pub(crate) fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 14695981039346656037;
    const PRIME: u64 = 1099511628211;
    let mut hash = OFFSET;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
