//! Optimization suggestions

use serde::{Deserialize, Serialize};

/// Kind of optimization hint derived from an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Too many joins in one statement
    SplitJoins,
    /// Too many nested sub-selects
    ReplaceSubqueries,
    /// Overall complexity above threshold
    IndexKeyColumns,
    /// Aggregates used without a GROUP BY clause
    AddGroupBy,
}

impl SuggestionKind {
    /// Returns the advisory message reported to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::SplitJoins => "Consider breaking complex joins into smaller queries",
            Self::ReplaceSubqueries => "Review subqueries - consider using JOINs instead",
            Self::IndexKeyColumns => "High complexity query - consider indexing key columns",
            Self::AddGroupBy => "Add GROUP BY clause when using aggregate functions",
        }
    }
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
