//! SQL constructs and their complexity weights

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static JOIN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bjoin\b").expect("valid regex"));
static AGGREGATE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(count|sum|avg|max|min)\b").expect("valid regex"));

/// A SQL construct that contributes to the complexity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Construct {
    Select,
    Join,
    Where,
    GroupBy,
    OrderBy,
    Subquery,
    Aggregate,
}

impl Construct {
    /// All constructs in scoring order
    pub const ALL: [Construct; 7] = [
        Self::Select,
        Self::Join,
        Self::Where,
        Self::GroupBy,
        Self::OrderBy,
        Self::Subquery,
        Self::Aggregate,
    ];

    /// Counts occurrences of this construct in lower-cased SQL text.
    ///
    /// Matching is lexical: `join` and the aggregate names match on word
    /// boundaries, a subquery is any `(select`, and the remaining keywords
    /// are plain substring counts.
    pub fn count_in(&self, sql_lower: &str) -> u32 {
        let count = match self {
            Self::Join => JOIN_WORD.find_iter(sql_lower).count(),
            Self::Aggregate => AGGREGATE_WORD.find_iter(sql_lower).count(),
            Self::Subquery => sql_lower.matches("(select").count(),
            Self::Select => sql_lower.matches("select").count(),
            Self::Where => sql_lower.matches("where").count(),
            Self::GroupBy => sql_lower.matches("group by").count(),
            Self::OrderBy => sql_lower.matches("order by").count(),
        };
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

/// Complexity weight per construct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructWeights {
    pub select: f64,
    pub join: f64,
    #[serde(rename = "where")]
    pub where_clause: f64,
    pub group_by: f64,
    pub order_by: f64,
    pub subquery: f64,
    pub aggregate: f64,
}

impl Default for ConstructWeights {
    fn default() -> Self {
        Self {
            select: 1.0,
            join: 2.5,
            where_clause: 1.2,
            group_by: 2.0,
            order_by: 1.5,
            subquery: 3.0,
            aggregate: 2.2,
        }
    }
}

impl ConstructWeights {
    /// Returns the weight for a construct
    pub fn weight(&self, construct: Construct) -> f64 {
        match construct {
            Construct::Select => self.select,
            Construct::Join => self.join,
            Construct::Where => self.where_clause,
            Construct::GroupBy => self.group_by,
            Construct::OrderBy => self.order_by,
            Construct::Subquery => self.subquery,
            Construct::Aggregate => self.aggregate,
        }
    }

    /// Sets the weight for a construct. Negative weights are clamped to zero
    /// so the score can never drop below its baseline.
    pub fn with_weight(mut self, construct: Construct, weight: f64) -> Self {
        let weight = weight.max(0.0);
        match construct {
            Construct::Select => self.select = weight,
            Construct::Join => self.join = weight,
            Construct::Where => self.where_clause = weight,
            Construct::GroupBy => self.group_by = weight,
            Construct::OrderBy => self.order_by = weight,
            Construct::Subquery => self.subquery = weight,
            Construct::Aggregate => self.aggregate = weight,
        }
        self
    }
}
