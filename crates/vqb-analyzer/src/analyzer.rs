//! Query Analyzer
//!
//! Scores a SQL statement, extracts the tables it touches and derives
//! optimization suggestions from fixed thresholds.

use crate::{Construct, ConstructWeights, SuggestionKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use vqb_core::{BASELINE_COMPLEXITY, DEFAULT_BASE_ROWS, Operation, QueryAnalysis};

static FROM_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"from\s+(\w+)").expect("valid regex"));
static JOIN_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"join\s+(\w+)").expect("valid regex"));

/// Configuration for the query analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Complexity weight per construct
    pub weights: ConstructWeights,
    /// Join count above which splitting the query is suggested
    pub join_threshold: u32,
    /// Subquery count above which rewriting as joins is suggested
    pub subquery_threshold: u32,
    /// Complexity score above which indexing is suggested
    pub complexity_threshold: f64,
    /// Row estimate for a statement of baseline complexity
    pub base_rows: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            weights: ConstructWeights::default(),
            join_threshold: 3,
            subquery_threshold: 2,
            complexity_threshold: 10.0,
            base_rows: DEFAULT_BASE_ROWS,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the construct weights
    pub fn with_weights(mut self, weights: ConstructWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the join threshold
    pub fn with_join_threshold(mut self, threshold: u32) -> Self {
        self.join_threshold = threshold;
        self
    }

    /// Sets the subquery threshold
    pub fn with_subquery_threshold(mut self, threshold: u32) -> Self {
        self.subquery_threshold = threshold;
        self
    }

    /// Sets the complexity threshold
    pub fn with_complexity_threshold(mut self, threshold: f64) -> Self {
        self.complexity_threshold = threshold;
        self
    }

    /// Sets the baseline row estimate
    pub fn with_base_rows(mut self, rows: u64) -> Self {
        self.base_rows = rows;
        self
    }
}

/// Lexical SQL analyzer
#[derive(Debug, Clone, Default)]
pub struct QueryAnalyzer {
    config: AnalyzerConfig,
}

impl QueryAnalyzer {
    /// Creates a new analyzer with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new analyzer with custom config
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the analyzer config
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes a SQL statement.
    ///
    /// Never fails: unparseable text simply produces low counts and the
    /// baseline score.
    pub fn analyze(&self, sql: &str) -> QueryAnalysis {
        let sql_lower = sql.to_lowercase();
        let complexity_score = self.complexity_score(&sql_lower);

        let mut analysis = QueryAnalysis {
            complexity_score,
            operations: extract_operations(&sql_lower),
            tables: extract_tables(&sql_lower),
            joins: Construct::Join.count_in(&sql_lower),
            subqueries: Construct::Subquery.count_in(&sql_lower),
            aggregations: Construct::Aggregate.count_in(&sql_lower),
            estimated_rows: self.estimate_rows(complexity_score),
            optimization_suggestions: Vec::new(),
        };

        analysis.optimization_suggestions = self
            .suggestions(&analysis)
            .iter()
            .map(|kind| kind.message().to_string())
            .collect();

        tracing::debug!(
            complexity_score = analysis.complexity_score,
            tables = analysis.tables.len(),
            joins = analysis.joins,
            subqueries = analysis.subqueries,
            aggregations = analysis.aggregations,
            suggestions = analysis.optimization_suggestions.len(),
            "Analyzed query"
        );

        analysis
    }

    /// Computes the weighted complexity score of lower-cased SQL text,
    /// rounded to two decimals
    pub fn complexity_score(&self, sql_lower: &str) -> f64 {
        let weighted: f64 = Construct::ALL
            .iter()
            .map(|construct| {
                let weight = self.config.weights.weight(*construct).max(0.0);
                f64::from(construct.count_in(sql_lower)) * weight
            })
            .sum();

        round2(BASELINE_COMPLEXITY + weighted)
    }

    /// Returns the suggestions that apply to an analysis, in evaluation order
    pub fn suggestions(&self, analysis: &QueryAnalysis) -> Vec<SuggestionKind> {
        let mut kinds = Vec::new();

        if analysis.joins > self.config.join_threshold {
            kinds.push(SuggestionKind::SplitJoins);
        }

        if analysis.subqueries > self.config.subquery_threshold {
            kinds.push(SuggestionKind::ReplaceSubqueries);
        }

        if analysis.complexity_score > self.config.complexity_threshold {
            kinds.push(SuggestionKind::IndexKeyColumns);
        }

        if analysis.aggregations > 0 && !analysis.has_operation(Operation::GroupBy) {
            kinds.push(SuggestionKind::AddGroupBy);
        }

        kinds
    }

    fn estimate_rows(&self, complexity_score: f64) -> u64 {
        // Truncates like an integer cast; the score is already rounded
        (self.config.base_rows as f64 * complexity_score) as u64
    }
}

/// Analyzes a SQL statement with the default configuration
pub fn analyze_query(sql: &str) -> QueryAnalysis {
    QueryAnalyzer::new().analyze(sql)
}

/// Returns the clause keywords present anywhere in lower-cased SQL text
fn extract_operations(sql_lower: &str) -> Vec<Operation> {
    Operation::ALL
        .into_iter()
        .filter(|operation| sql_lower.contains(operation.pattern()))
        .collect()
}

/// Extracts the first FROM target and every JOIN target.
///
/// Only single-token names are captured: schema-qualified names keep just
/// the schema part, aliases are ignored and comma-separated FROM lists
/// contribute their first table only.
fn extract_tables(sql_lower: &str) -> BTreeSet<String> {
    let mut tables = BTreeSet::new();

    if let Some(captures) = FROM_TABLE.captures(sql_lower) {
        tables.insert(captures[1].to_string());
    }

    for captures in JOIN_TABLE.captures_iter(sql_lower) {
        tables.insert(captures[1].to_string());
    }

    tables
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests;
