//! Synthetic training data
//!
//! Fabricates plausible execution history so a model can be fitted before
//! any real measurements exist. Output depends only on the seed.

use crate::{PredictorError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};
use vqb_core::{MIN_PREDICTED_TIME, QueryAnalysis, TrainingSample};

/// Default RNG seed for the synthetic bootstrap
pub const DEFAULT_SEED: u64 = 42;

/// Default number of synthetic samples
pub const DEFAULT_SYNTHETIC_SAMPLES: usize = 100;

/// Standard deviation of the noise added to each execution time
const NOISE_STD_DEV: f64 = 0.1;

/// Seeded generator of synthetic training samples
#[derive(Debug, Clone)]
pub struct SyntheticDataGenerator {
    seed: u64,
}

impl Default for SyntheticDataGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl SyntheticDataGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates `count` samples. Each call restarts from the seed, so
    /// repeated calls return the same data.
    ///
    /// Per sample: complexity ~ U[1, 20), joins ~ Poisson(2), subqueries and
    /// aggregations ~ Poisson(1), table count ~ U{1..5}, rows ~ U{100..9999}.
    pub fn generate(&self, count: usize) -> Result<Vec<TrainingSample>> {
        let distributions = SampleDistributions::new()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok((0..count)
            .map(|_| distributions.sample(&mut rng))
            .collect())
    }
}

struct SampleDistributions {
    joins: Poisson<f64>,
    /// Shared by subqueries and aggregations
    unit_rate: Poisson<f64>,
    noise: Normal<f64>,
}

impl SampleDistributions {
    fn new() -> Result<Self> {
        let poisson = |lambda: f64| {
            Poisson::new(lambda).map_err(|err| PredictorError::Distribution(err.to_string()))
        };
        Ok(Self {
            joins: poisson(2.0)?,
            unit_rate: poisson(1.0)?,
            noise: Normal::new(0.0, NOISE_STD_DEV)
                .map_err(|err| PredictorError::Distribution(err.to_string()))?,
        })
    }

    fn sample(&self, rng: &mut StdRng) -> TrainingSample {
        let complexity = rng.gen_range(1.0..20.0);
        // Poisson draws are whole numbers carried as f64
        let joins = self.joins.sample(rng) as u32;
        let subqueries = self.unit_rate.sample(rng) as u32;
        let aggregations = self.unit_rate.sample(rng) as u32;
        let table_count: u32 = rng.gen_range(1..6);
        let rows: u64 = rng.gen_range(100..10_000);

        let base_time = 0.1;
        let execution_time = base_time
            * (complexity * 0.1
                + f64::from(joins) * 0.2
                + f64::from(subqueries) * 0.5
                + f64::from(aggregations) * 0.3
                + f64::from(table_count) * 0.1
                + (rows as f64 / 1000.0) * 0.05)
            + self.noise.sample(rng);

        let analysis = QueryAnalysis {
            complexity_score: complexity,
            joins,
            subqueries,
            aggregations,
            tables: (0..table_count).map(|i| format!("table_{}", i)).collect(),
            estimated_rows: rows,
            ..Default::default()
        };

        TrainingSample::new(analysis, execution_time.max(MIN_PREDICTED_TIME))
    }
}
