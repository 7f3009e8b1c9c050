use crate::error::{Result, VectorStoreError};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Distance used to rank neighbors. Lower scores are always closer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Squared Euclidean distance.
    #[default]
    L2,
    /// `1 - cosine similarity`.
    Cosine,
}

impl Metric {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L2 => "l2",
            Self::Cosine => "cosine",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub score: f32,
}

/// Exact nearest-neighbor index: one row per section, in section order.
#[derive(Clone, Debug)]
pub struct FlatIndex {
    metric: Metric,
    vectors: Array2<f32>,
}

impl FlatIndex {
    pub fn build(metric: Metric, vectors: &[Vec<f32>]) -> Result<Self> {
        let dimension = vectors.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(vectors.len() * dimension);
        for vector in vectors {
            if vector.len() != dimension {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
            flat.extend_from_slice(vector);
        }
        let vectors = Array2::from_shape_vec((vectors.len(), dimension), flat)
            .map_err(|e| VectorStoreError::IndexCorrupt(e.to_string()))?;
        Ok(Self { metric, vectors })
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.vectors.ncols()
    }

    /// Up to `k` nearest rows, closest first. Ties keep index order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension() {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dimension(),
                actual: query.len(),
            });
        }

        let query = ArrayView1::from(query);
        let scores = match self.metric {
            Metric::L2 => self.l2_scores(query),
            Metric::Cosine => self.cosine_scores(query),
        };

        let mut neighbors: Vec<Neighbor> = scores
            .iter()
            .enumerate()
            .map(|(position, score)| Neighbor {
                position,
                score: *score,
            })
            .collect();
        neighbors.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.position.cmp(&b.position))
        });
        neighbors.truncate(k);
        Ok(neighbors)
    }

    fn l2_scores(&self, query: ArrayView1<'_, f32>) -> Array1<f32> {
        let diff = &self.vectors - &query;
        diff.mapv(|v| v * v).sum_axis(Axis(1))
    }

    fn cosine_scores(&self, query: ArrayView1<'_, f32>) -> Array1<f32> {
        let query_norm = query.dot(&query).sqrt();
        let dots = self.vectors.dot(&query);
        let norms = self.vectors.map_axis(Axis(1), |row| row.dot(&row).sqrt());
        let mut scores = Array1::<f32>::ones(self.len());
        for ((score, dot), norm) in scores.iter_mut().zip(dots.iter()).zip(norms.iter()) {
            let denom = norm * query_norm;
            if denom > f32::EPSILON {
                *score = 1.0 - dot / denom;
            }
        }
        scores
    }

    pub(crate) fn rows(&self) -> Vec<Vec<f32>> {
        self.vectors.rows().into_iter().map(|r| r.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn positions(neighbors: &[Neighbor]) -> Vec<usize> {
        neighbors.iter().map(|n| n.position).collect()
    }

    #[test]
    fn l2_ranks_exact_match_first_with_zero_score() {
        let index = FlatIndex::build(
            Metric::L2,
            &[vec![0.0, 1.0], vec![1.0, 0.0], vec![0.7, 0.7]],
        )
        .expect("build");

        let hits = index.search(&[1.0, 0.0], 3).expect("search");
        assert_eq!(positions(&hits), vec![1, 2, 0]);
        assert_eq!(hits[0].score, 0.0);
        assert!(hits[1].score < hits[2].score);
    }

    #[test]
    fn cosine_ignores_magnitude() {
        let index =
            FlatIndex::build(Metric::Cosine, &[vec![10.0, 0.0], vec![0.0, 1.0]]).expect("build");
        let hits = index.search(&[1.0, 0.0], 2).expect("search");
        assert_eq!(positions(&hits), vec![0, 1]);
        assert!(hits[0].score.abs() < 1e-6);
        assert!((hits[1].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn k_is_clamped_and_ties_keep_order() {
        let index =
            FlatIndex::build(Metric::L2, &[vec![1.0, 0.0], vec![1.0, 0.0]]).expect("build");
        let hits = index.search(&[1.0, 0.0], 5).expect("search");
        assert_eq!(positions(&hits), vec![0, 1]);
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let err = FlatIndex::build(Metric::L2, &[vec![1.0, 0.0], vec![1.0]]).expect_err("build");
        assert!(matches!(
            err,
            VectorStoreError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));

        let index = FlatIndex::build(Metric::L2, &[vec![1.0, 0.0]]).expect("build");
        assert!(index.search(&[1.0, 0.0, 0.0], 1).is_err());
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = FlatIndex::build(Metric::L2, &[]).expect("build");
        assert!(index.is_empty());
        assert!(index.search(&[1.0], 5).expect("search").is_empty());
    }
}
