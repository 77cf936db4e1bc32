//! VQB Predictor - Execution time prediction
//!
//! Maps a `QueryAnalysis` to an estimated execution time with a random
//! forest regressor:
//! - Fixed six-dimensional feature vector taken from the analysis record
//! - Per-dimension standard scaling fitted on the training set
//! - Reproducible synthetic bootstrap when real history is too small
//! - Single-owner `PerformancePredictor` and lock-guarded `SharedPredictor`
//!
//! # Example
//!
//! ```
//! use vqb_core::QueryAnalysis;
//! use vqb_predictor::{PerformancePredictor, PredictorConfig};
//!
//! let predictor = PerformancePredictor::bootstrapped(PredictorConfig::default().with_n_trees(10)).unwrap();
//! let prediction = predictor.predict(&QueryAnalysis::default()).unwrap();
//! assert!(prediction.predicted_time >= 0.01);
//! ```

mod error;
mod features;
pub mod forest;
mod predictor;
mod scaler;
mod shared;
mod synthetic;

pub use error::*;
pub use features::*;
pub use forest::{RandomForest, RegressionTree};
pub use predictor::*;
pub use scaler::*;
pub use shared::*;
pub use synthetic::*;
