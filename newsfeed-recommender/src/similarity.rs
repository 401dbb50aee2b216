//! Reader profile vector and cosine similarity.

use crate::vectorizer::SparseVector;

/// Dense profile vector with its norm precomputed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProfileVector {
    values: Vec<f32>,
    norm: f32,
}

impl ProfileVector {
    /// Weighted sum of profile rows.
    ///
    /// Falls back to the plain mean of the rows when the weighted sum is all
    /// zero or not finite, e.g. when likes and dislikes cancel out.
    #[expect(clippy::float_arithmetic, reason = "weighted vector sum")]
    pub(crate) fn weighted(rows: &[SparseVector], weights: &[f32], dimension: usize) -> Self {
        let mut values = vec![0.0_f32; dimension];
        for (row, &weight) in rows.iter().zip(weights) {
            for &(column, value) in row.entries() {
                if let Some(slot) = values.get_mut(column) {
                    *slot += weight * value;
                }
            }
        }
        if is_degenerate(&values) {
            log::debug!("weighted profile is degenerate; using the mean profile vector");
            return Self::mean(rows, dimension);
        }
        Self::from_values(values)
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "arithmetic mean of rows"
    )]
    fn mean(rows: &[SparseVector], dimension: usize) -> Self {
        let mut values = vec![0.0_f32; dimension];
        if rows.is_empty() {
            return Self::from_values(values);
        }
        for row in rows {
            for &(column, value) in row.entries() {
                if let Some(slot) = values.get_mut(column) {
                    *slot += value;
                }
            }
        }
        let count = rows.len() as f32;
        for value in &mut values {
            *value /= count;
        }
        Self::from_values(values)
    }

    #[expect(clippy::float_arithmetic, reason = "Euclidean norm")]
    fn from_values(values: Vec<f32>) -> Self {
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        Self { values, norm }
    }

    /// Cosine similarity with a candidate row; zero when either is empty.
    #[expect(clippy::float_arithmetic, reason = "cosine similarity")]
    pub(crate) fn cosine(&self, candidate: &SparseVector) -> f32 {
        let candidate_norm = candidate.norm();
        if !(self.norm > 0.0_f32 && self.norm.is_finite()) || candidate_norm <= 0.0_f32 {
            return 0.0;
        }
        let dot: f32 = candidate
            .entries()
            .iter()
            .filter_map(|&(column, value)| self.values.get(column).map(|p| p * value))
            .sum();
        dot / (self.norm * candidate_norm)
    }

    #[cfg(test)]
    fn values(&self) -> &[f32] {
        &self.values
    }
}

fn is_degenerate(values: &[f32]) -> bool {
    values.iter().any(|value| !value.is_finite()) || !values.iter().any(|value| value.abs() > 0.0)
}
