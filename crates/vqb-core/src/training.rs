//! Training samples

use crate::QueryAnalysis;
use serde::{Deserialize, Serialize};

/// One observed (or synthesized) execution of an analyzed query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub analysis: QueryAnalysis,
    /// Observed execution time in seconds
    pub execution_time: f64,
}

impl TrainingSample {
    pub fn new(analysis: QueryAnalysis, execution_time: f64) -> Self {
        Self {
            analysis,
            execution_time,
        }
    }

    /// Parses a JSON array of samples, as exported from query history
    pub fn list_from_json(json: &str) -> crate::Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_from_json_fills_analysis_defaults() {
        let json = r#"[
            {"analysis": {"joins": 2, "tables": ["a", "b"]}, "execution_time": 0.4},
            {"analysis": {}, "execution_time": 0.02}
        ]"#;

        let samples = TrainingSample::list_from_json(json).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].analysis.joins, 2);
        assert_eq!(samples[0].analysis.complexity_score, 1.0);
        assert_eq!(samples[1].analysis.estimated_rows, 1000);
        assert_eq!(samples[1].execution_time, 0.02);
    }

    #[test]
    fn test_list_from_json_requires_execution_time() {
        let result = TrainingSample::list_from_json(r#"[{"analysis": {}}]"#);
        assert!(matches!(result, Err(crate::VqbError::Serialization(_))));
    }
}
