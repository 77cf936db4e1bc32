//! Query analysis record
//!
//! The structural fingerprint produced by the analyzer and consumed by the
//! predictor and the report layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Baseline row estimate for a query with complexity 1.0
pub const DEFAULT_BASE_ROWS: u64 = 1_000;

/// Complexity score of a statement with no detected constructs
pub const BASELINE_COMPLEXITY: f64 = 1.0;

/// A clause keyword detected in a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "SELECT")]
    Select,
    #[serde(rename = "JOIN")]
    Join,
    #[serde(rename = "WHERE")]
    Where,
    #[serde(rename = "GROUP BY")]
    GroupBy,
    #[serde(rename = "ORDER BY")]
    OrderBy,
    #[serde(rename = "HAVING")]
    Having,
}

impl Operation {
    /// All operations in detection order
    pub const ALL: [Operation; 6] = [
        Self::Select,
        Self::Join,
        Self::Where,
        Self::GroupBy,
        Self::OrderBy,
        Self::Having,
    ];

    /// Returns the upper-case clause keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Join => "JOIN",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::OrderBy => "ORDER BY",
            Self::Having => "HAVING",
        }
    }

    /// Returns the lower-case text searched for in a statement
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Join => "join",
            Self::Where => "where",
            Self::GroupBy => "group by",
            Self::OrderBy => "order by",
            Self::Having => "having",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural fingerprint of a SQL statement
///
/// Absent fields deserialize to the same defaults the predictor assumes, so
/// partial records coming from stored history remain usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryAnalysis {
    /// Weighted construct count, never below 1.0
    pub complexity_score: f64,
    /// Clause keywords present in the statement, in detection order
    pub operations: Vec<Operation>,
    /// Referenced table names (first FROM target and every JOIN target)
    pub tables: BTreeSet<String>,
    /// Number of JOIN keywords
    pub joins: u32,
    /// Number of parenthesised sub-selects
    pub subqueries: u32,
    /// Number of aggregate function names
    pub aggregations: u32,
    /// Rough row estimate derived from the complexity score
    pub estimated_rows: u64,
    /// Advisory messages, in evaluation order
    pub optimization_suggestions: Vec<String>,
}

impl Default for QueryAnalysis {
    fn default() -> Self {
        Self {
            complexity_score: BASELINE_COMPLEXITY,
            operations: Vec::new(),
            tables: BTreeSet::new(),
            joins: 0,
            subqueries: 0,
            aggregations: 0,
            estimated_rows: DEFAULT_BASE_ROWS,
            optimization_suggestions: Vec::new(),
        }
    }
}

impl QueryAnalysis {
    /// Returns true if the given clause keyword was detected
    pub fn has_operation(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Returns the number of distinct referenced tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if any optimization suggestion was produced
    pub fn has_suggestions(&self) -> bool {
        !self.optimization_suggestions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_operation_serialization() {
        let json = serde_json::to_string(&Operation::GroupBy).unwrap();
        assert_eq!(json, "\"GROUP BY\"");

        let parsed: Operation = serde_json::from_str("\"ORDER BY\"").unwrap();
        assert_eq!(parsed, Operation::OrderBy);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let analysis: QueryAnalysis = serde_json::from_str("{}").unwrap();
        assert_eq!(analysis, QueryAnalysis::default());
        assert_eq!(analysis.complexity_score, 1.0);
        assert_eq!(analysis.estimated_rows, 1000);
        assert_eq!(analysis.table_count(), 0);
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        let result = serde_json::from_str::<QueryAnalysis>(r#"{"joins": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_shape() {
        let analysis = QueryAnalysis {
            complexity_score: 3.5,
            operations: vec![Operation::Select, Operation::Join],
            tables: ["orders".to_string(), "users".to_string()].into(),
            joins: 1,
            ..Default::default()
        };

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["operations"], serde_json::json!(["SELECT", "JOIN"]));
        assert_eq!(value["tables"], serde_json::json!(["orders", "users"]));
        assert_eq!(value["estimated_rows"], serde_json::json!(1000));
    }
}
