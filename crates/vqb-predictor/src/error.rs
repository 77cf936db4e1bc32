//! Predictor errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictorError {
    #[error("Model has not been trained")]
    NotTrained,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid training sample {index}: {reason}")]
    InvalidSample { index: usize, reason: String },

    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Invalid sampling distribution: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, PredictorError>;
