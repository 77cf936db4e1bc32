//! Process-wide predictor handle
//!
//! Wraps one `PerformancePredictor` behind a reader-writer lock so the cost
//! of fitting is paid once and reused across callers. Training holds the
//! write lock; predictions share the read lock.

use crate::{PerformancePredictor, PredictorConfig, Result, TrainingSummary};
use parking_lot::RwLock;
use std::sync::Arc;
use vqb_core::{PerformancePrediction, QueryAnalysis, TrainingSample};

/// Cloneable handle to a lock-guarded predictor
#[derive(Debug, Clone, Default)]
pub struct SharedPredictor {
    inner: Arc<RwLock<PerformancePredictor>>,
}

impl SharedPredictor {
    pub fn new(predictor: PerformancePredictor) -> Self {
        Self {
            inner: Arc::new(RwLock::new(predictor)),
        }
    }

    /// Creates a handle around a predictor already fitted on synthetic data
    pub fn bootstrapped(config: PredictorConfig) -> Result<Self> {
        Ok(Self::new(PerformancePredictor::bootstrapped(config)?))
    }

    pub fn is_trained(&self) -> bool {
        self.inner.read().is_trained()
    }

    /// Retrains the shared model; concurrent predictions wait for it
    pub fn train(&self, samples: &[TrainingSample]) -> Result<TrainingSummary> {
        self.inner.write().train(samples)
    }

    /// Fits the synthetic model if needed. Returns true if this call trained.
    pub fn ensure_trained(&self) -> Result<bool> {
        if self.is_trained() {
            return Ok(false);
        }
        // Another caller may have trained between the two lock acquisitions;
        // ensure_trained re-checks under the write lock.
        self.inner.write().ensure_trained()
    }

    pub fn predict(&self, analysis: &QueryAnalysis) -> Result<PerformancePrediction> {
        self.inner.read().predict(analysis)
    }

    pub fn predict_performance(&self, analysis: &QueryAnalysis) -> Result<PerformancePrediction> {
        self.ensure_trained()?;
        self.predict(analysis)
    }
}
