//! Query report payload
//!
//! Merges the analysis and the prediction for one statement into the shape
//! returned to query builder clients.

use crate::{PerformancePrediction, QueryAnalysis};
use ring::digest;
use serde::{Deserialize, Serialize};

/// Combined analysis and prediction for one SQL statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub sql_query: String,
    pub analysis: QueryAnalysis,
    pub prediction: PerformancePrediction,
    /// Copy of `analysis.optimization_suggestions` for clients that only read the top level
    pub optimization_suggestions: Vec<String>,
    /// Hex digest of `sql_query`
    pub query_hash: String,
}

impl QueryReport {
    pub fn new(
        sql_query: impl Into<String>,
        analysis: QueryAnalysis,
        prediction: PerformancePrediction,
    ) -> Self {
        let sql_query = sql_query.into();
        Self {
            query_hash: query_hash(&sql_query),
            optimization_suggestions: analysis.optimization_suggestions.clone(),
            sql_query,
            analysis,
            prediction,
        }
    }
}

/// Returns the lower-case hex SHA-256 digest of a SQL statement
pub fn query_hash(sql: &str) -> String {
    hex::encode(digest::digest(&digest::SHA256, sql.as_bytes()))
}
