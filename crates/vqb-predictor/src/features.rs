//! Feature extraction

use crate::{PredictorError, Result};
use vqb_core::QueryAnalysis;

/// Number of model features
pub const NUM_FEATURES: usize = 6;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "complexity_score",
    "join_count",
    "subquery_count",
    "aggregation_count",
    "table_count",
    "estimated_rows",
];

/// Fixed-order numeric projection of an analysis record:
/// `[complexity_score, joins, subqueries, aggregations, table_count, estimated_rows]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; NUM_FEATURES]);

impl FeatureVector {
    pub fn from_analysis(analysis: &QueryAnalysis) -> Self {
        Self([
            analysis.complexity_score,
            f64::from(analysis.joins),
            f64::from(analysis.subqueries),
            f64::from(analysis.aggregations),
            analysis.table_count() as f64,
            analysis.estimated_rows as f64,
        ])
    }

    pub fn values(&self) -> &[f64; NUM_FEATURES] {
        &self.0
    }

    /// Checks that every feature is a finite, non-negative number
    pub fn validate(&self) -> Result<()> {
        for (name, value) in FEATURE_NAMES.iter().zip(self.0) {
            if !value.is_finite() || value < 0.0 {
                return Err(PredictorError::InvalidInput(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl From<&QueryAnalysis> for FeatureVector {
    fn from(analysis: &QueryAnalysis) -> Self {
        Self::from_analysis(analysis)
    }
}
