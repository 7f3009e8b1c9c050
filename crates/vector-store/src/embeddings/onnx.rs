use super::{l2_normalize, ONNX_MODEL_FILE, TOKENIZER_FILE};
use crate::error::{Result, VectorStoreError};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;
use std::path::{Path, PathBuf};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

const POOLED_OUTPUT: &str = "sentence_embedding";

/// Transformer encoder exported to ONNX, mean-pooled over the attention mask.
pub struct OnnxEmbedder {
    session: Session,
    tokenizer: Tokenizer,
    dir: PathBuf,
    max_length: usize,
    wants_token_type_ids: bool,
}

impl OnnxEmbedder {
    pub fn load(dir: &Path, max_length: usize) -> Result<Self> {
        let model_path = dir.join(ONNX_MODEL_FILE);
        let tokenizer_path = dir.join(TOKENIZER_FILE);
        for path in [&model_path, &tokenizer_path] {
            if !path.exists() {
                return Err(VectorStoreError::ModelLoad(format!(
                    "{} not found",
                    path.display()
                )));
            }
        }

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            VectorStoreError::ModelLoad(format!("{}: {e}", tokenizer_path.display()))
        })?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..PaddingParams::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..TruncationParams::default()
            }))
            .map_err(|e| VectorStoreError::ModelLoad(format!("tokenizer truncation: {e}")))?;

        let session = Session::builder()
            .map_err(load_err)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(load_err)?
            .commit_from_file(&model_path)
            .map_err(load_err)?;

        let wants_token_type_ids = session
            .inputs
            .iter()
            .any(|input| input.name == "token_type_ids");

        Ok(Self {
            session,
            tokenizer,
            dir: dir.to_path_buf(),
            max_length,
            wants_token_type_ids,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| VectorStoreError::EmbeddingError(format!("tokenize: {e}")))?;

        let batch = encodings.len();
        let seq = encodings
            .iter()
            .map(|enc| enc.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut ids = Vec::with_capacity(batch * seq);
        let mut mask = Vec::with_capacity(batch * seq);
        let mut type_ids = Vec::with_capacity(batch * seq);
        for enc in &encodings {
            for j in 0..seq {
                ids.push(i64::from(enc.get_ids().get(j).copied().unwrap_or(0)));
                mask.push(i64::from(enc.get_attention_mask().get(j).copied().unwrap_or(0)));
                type_ids.push(i64::from(enc.get_type_ids().get(j).copied().unwrap_or(0)));
            }
        }

        let mut inputs: Vec<(&str, SessionInputValue<'_>)> = vec![
            (
                "input_ids",
                Tensor::from_array(([batch, seq], ids))
                    .map_err(run_err)?
                    .into(),
            ),
            (
                "attention_mask",
                Tensor::from_array(([batch, seq], mask.clone()))
                    .map_err(run_err)?
                    .into(),
            ),
        ];
        if self.wants_token_type_ids {
            inputs.push((
                "token_type_ids",
                Tensor::from_array(([batch, seq], type_ids))
                    .map_err(run_err)?
                    .into(),
            ));
        }

        let outputs = self.session.run(inputs).map_err(run_err)?;
        let output = match outputs.get(POOLED_OUTPUT) {
            Some(value) => value,
            None => &outputs[0],
        };
        let (shape, data) = output.try_extract_tensor::<f32>().map_err(run_err)?;
        let dims: Vec<usize> = shape.iter().map(|d| *d as usize).collect();

        let mut vectors = match dims.as_slice() {
            [b, hidden] if *b == batch => data.chunks(*hidden).map(<[f32]>::to_vec).collect(),
            [b, s, hidden] if *b == batch && *s == seq => {
                mean_pool(data, batch, seq, *hidden, &mask)
            }
            other => {
                return Err(VectorStoreError::EmbeddingError(format!(
                    "unexpected model output shape {other:?} for batch {batch}x{seq}"
                )))
            }
        };
        for vector in &mut vectors {
            l2_normalize(vector);
        }
        log::debug!("Embedded batch of {batch} (seq_len={seq})");
        Ok(vectors)
    }
}

/// Average token states per row, counting only positions where `mask` is set.
fn mean_pool(data: &[f32], batch: usize, seq: usize, hidden: usize, mask: &[i64]) -> Vec<Vec<f32>> {
    let mut out = Vec::with_capacity(batch);
    for b in 0..batch {
        let mut pooled = vec![0.0f32; hidden];
        let mut count = 0.0f32;
        for s in 0..seq {
            if mask[b * seq + s] == 0 {
                continue;
            }
            count += 1.0;
            let row = &data[(b * seq + s) * hidden..(b * seq + s + 1) * hidden];
            for (acc, v) in pooled.iter_mut().zip(row) {
                *acc += v;
            }
        }
        if count > 0.0 {
            for v in &mut pooled {
                *v /= count;
            }
        }
        out.push(pooled);
    }
    out
}

fn load_err(e: impl std::fmt::Display) -> VectorStoreError {
    VectorStoreError::ModelLoad(e.to_string())
}

fn run_err(e: impl std::fmt::Display) -> VectorStoreError {
    VectorStoreError::EmbeddingError(e.to_string())
}
