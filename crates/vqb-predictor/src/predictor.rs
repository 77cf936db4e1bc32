//! Performance Predictor
//!
//! Owns a fitted scaler and random forest and turns analysis records into
//! `PerformancePrediction`s.
//!
//! Training is explicit. `predict` never mutates the model and fails with
//! `PredictorError::NotTrained` until `train`, `ensure_trained` or the
//! `bootstrapped` constructor has run. `predict_performance` is the
//! convenience entry point that trains on synthetic data on first use.

use crate::forest::{ForestParams, RandomForest};
use crate::{
    DEFAULT_SEED, DEFAULT_SYNTHETIC_SAMPLES, FeatureVector, NUM_FEATURES, PredictorError, Result,
    StandardScaler, SyntheticDataGenerator, variance,
};
use serde::{Deserialize, Serialize};
use vqb_core::{PerformancePrediction, QueryAnalysis, TrainingSample};

/// Configuration for the performance predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Seed for both the synthetic data and the bootstrap sampling
    pub seed: u64,
    /// Real sample sets smaller than this are replaced by synthetic data
    pub min_training_samples: usize,
    /// Size of the synthetic training set
    pub synthetic_samples: usize,
    /// Maximum tree depth, unlimited when absent
    pub max_depth: Option<usize>,
    /// Minimum rows a tree node needs before it is split
    pub min_samples_split: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: DEFAULT_SEED,
            min_training_samples: 10,
            synthetic_samples: DEFAULT_SYNTHETIC_SAMPLES,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

impl PredictorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_min_training_samples(mut self, min: usize) -> Self {
        self.min_training_samples = min;
        self
    }

    pub fn with_synthetic_samples(mut self, count: usize) -> Self {
        self.synthetic_samples = count;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_min_samples_split(mut self, min: usize) -> Self {
        self.min_samples_split = min;
        self
    }

    fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.n_trees,
            seed: self.seed,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
        }
    }
}

/// Outcome of a training run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Number of samples the model was fitted on
    pub samples: usize,
    /// True if the synthetic set was used
    pub synthetic: bool,
    /// Real samples thrown away in favour of synthetic data
    pub discarded: usize,
    pub trees: usize,
}

/// Fitted scaler and forest
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    scaler: StandardScaler,
    forest: RandomForest,
}

impl TrainedModel {
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }
}

/// Regression-based execution time predictor
#[derive(Debug, Clone, Default)]
pub struct PerformancePredictor {
    config: PredictorConfig,
    model: Option<TrainedModel>,
}

impl PerformancePredictor {
    /// Creates an untrained predictor with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an untrained predictor with custom config
    pub fn with_config(config: PredictorConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    /// Creates a predictor already fitted on the synthetic set
    pub fn bootstrapped(config: PredictorConfig) -> Result<Self> {
        let mut predictor = Self::with_config(config);
        predictor.train(&[])?;
        Ok(predictor)
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_ref()
    }

    /// Fits the scaler and forest.
    ///
    /// Sample sets smaller than `min_training_samples` are discarded as a
    /// whole and replaced by the synthetic set; they are never merged.
    pub fn train(&mut self, samples: &[TrainingSample]) -> Result<TrainingSummary> {
        let generated;
        let provided = samples.len();
        let (samples, synthetic) = if provided < self.config.min_training_samples {
            if provided > 0 {
                tracing::warn!(
                    discarded = provided,
                    required = self.config.min_training_samples,
                    "Too few training samples, falling back to synthetic data"
                );
            }
            generated = SyntheticDataGenerator::new(self.config.seed)
                .generate(self.config.synthetic_samples)?;
            (generated.as_slice(), true)
        } else {
            (samples, false)
        };

        if samples.is_empty() {
            return Err(PredictorError::EmptyTrainingSet);
        }

        let mut features = Vec::with_capacity(samples.len());
        let mut targets = Vec::with_capacity(samples.len());
        for (index, sample) in samples.iter().enumerate() {
            let row = FeatureVector::from_analysis(&sample.analysis);
            row.validate().map_err(|err| PredictorError::InvalidSample {
                index,
                reason: err.to_string(),
            })?;
            if !sample.execution_time.is_finite() || sample.execution_time < 0.0 {
                return Err(PredictorError::InvalidSample {
                    index,
                    reason: format!("execution time {} is not a duration", sample.execution_time),
                });
            }
            features.push(row);
            targets.push(sample.execution_time);
        }

        let scaler = StandardScaler::fit(&features);
        let scaled: Vec<[f64; NUM_FEATURES]> = features.iter().map(|f| scaler.transform(f)).collect();
        let forest = RandomForest::fit(&scaled, &targets, &self.config.forest_params())
            .ok_or_else(|| PredictorError::InvalidInput("forest needs at least one tree".into()))?;

        let summary = TrainingSummary {
            samples: samples.len(),
            synthetic,
            discarded: if synthetic { provided } else { 0 },
            trees: forest.n_trees(),
        };
        self.model = Some(TrainedModel { scaler, forest });

        tracing::info!(
            samples = summary.samples,
            synthetic = summary.synthetic,
            trees = summary.trees,
            "Trained performance model"
        );

        Ok(summary)
    }

    /// Trains on the synthetic set if no model is fitted yet.
    /// Returns true if training happened.
    pub fn ensure_trained(&mut self) -> Result<bool> {
        if self.is_trained() {
            return Ok(false);
        }
        tracing::info!("No performance model fitted yet, bootstrapping from synthetic data");
        self.train(&[])?;
        Ok(true)
    }

    /// Predicts the execution time of an analyzed query
    pub fn predict(&self, analysis: &QueryAnalysis) -> Result<PerformancePrediction> {
        let model = self.model.as_ref().ok_or(PredictorError::NotTrained)?;

        let features = FeatureVector::from_analysis(analysis);
        features.validate()?;

        let scaled = model.scaler.transform(&features);
        let raw_time = model.forest.predict(&scaled);
        let confidence = 1.0 - variance(&scaled);
        let prediction = PerformancePrediction::new(raw_time, confidence);

        tracing::debug!(
            predicted_time = prediction.predicted_time,
            confidence = prediction.confidence,
            category = %prediction.performance_category,
            "Predicted query performance"
        );

        Ok(prediction)
    }

    /// Predicts after training on synthetic data if needed. The first call
    /// on an untrained predictor always fits a model.
    pub fn predict_performance(&mut self, analysis: &QueryAnalysis) -> Result<PerformancePrediction> {
        self.ensure_trained()?;
        self.predict(analysis)
    }
}
