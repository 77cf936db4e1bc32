//! VQB Analyzer - Lexical SQL analysis
//!
//! This crate turns a raw SQL string into a `QueryAnalysis` record:
//! - Weighted complexity scoring of detected SQL constructs
//! - Table, join, subquery and aggregate extraction
//! - Threshold-based optimization suggestions
//!
//! Analysis is pattern matching over the lower-cased text, not a SQL
//! grammar. Malformed input never fails; it just yields low counts.
//!
//! # Example
//!
//! ```
//! use vqb_analyzer::analyze_query;
//!
//! let analysis = analyze_query("SELECT COUNT(*) FROM orders");
//! assert_eq!(analysis.aggregations, 1);
//! assert!(analysis.tables.contains("orders"));
//! ```

mod analyzer;
mod construct;
mod suggestions;

pub use analyzer::*;
pub use construct::*;
pub use suggestions::*;
pub use vqb_core::{Operation, QueryAnalysis};
