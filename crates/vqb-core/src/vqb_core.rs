//! VQB Core - Shared records and helpers for the query analysis pipeline
//!
//! This crate defines the types that flow between the analyzer, the
//! performance predictor and their callers:
//!
//! - `QueryAnalysis` - structural fingerprint of a SQL statement
//! - `PerformancePrediction` - estimated execution time and category
//! - `TrainingSample` - one row of execution history used for training
//! - `VisualQuery` - structured query description convertible to SQL
//! - `QueryReport` - merged payload returned to the caller

mod analysis;
mod error;
mod prediction;
mod report;
mod training;
pub mod visual;

pub use analysis::*;
pub use error::*;
pub use prediction::*;
pub use report::*;
pub use training::*;
pub use visual::{OrderDirection, VisualCondition, VisualJoin, VisualOrder, VisualQuery};
