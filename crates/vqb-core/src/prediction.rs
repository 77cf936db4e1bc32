//! Performance prediction record

use serde::{Deserialize, Serialize};

/// Lowest execution time a prediction may report, in seconds
pub const MIN_PREDICTED_TIME: f64 = 0.01;

/// Lower bound of the confidence heuristic
pub const MIN_CONFIDENCE: f64 = 0.5;

/// Upper bound of the confidence heuristic
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Qualitative label bucketed from a predicted execution time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceCategory {
    Excellent,
    Good,
    Average,
    Slow,
    #[serde(rename = "Very Slow")]
    VerySlow,
}

impl PerformanceCategory {
    /// Buckets an execution time in seconds.
    ///
    /// Bands are checked in increasing order with a strict `<`, so a time
    /// sitting exactly on a boundary falls into the slower band.
    pub fn from_seconds(seconds: f64) -> Self {
        if seconds < 0.1 {
            Self::Excellent
        } else if seconds < 0.5 {
            Self::Good
        } else if seconds < 2.0 {
            Self::Average
        } else if seconds < 5.0 {
            Self::Slow
        } else {
            Self::VerySlow
        }
    }

    /// Returns the display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Slow => "Slow",
            Self::VerySlow => "Very Slow",
        }
    }
}

impl std::fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated execution cost of a query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePrediction {
    /// Predicted execution time in seconds, at least `MIN_PREDICTED_TIME`
    pub predicted_time: f64,
    /// Heuristic confidence in `[MIN_CONFIDENCE, MAX_CONFIDENCE]`
    pub confidence: f64,
    pub performance_category: PerformanceCategory,
}

impl PerformancePrediction {
    /// Builds a prediction from a raw model output and confidence, applying
    /// the time floor and the confidence bounds.
    pub fn new(raw_time: f64, confidence: f64) -> Self {
        let predicted_time = raw_time.max(MIN_PREDICTED_TIME);
        Self {
            predicted_time,
            confidence: confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
            performance_category: PerformanceCategory::from_seconds(predicted_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_bands() {
        assert_eq!(PerformanceCategory::from_seconds(0.0), PerformanceCategory::Excellent);
        assert_eq!(PerformanceCategory::from_seconds(0.099), PerformanceCategory::Excellent);
        assert_eq!(PerformanceCategory::from_seconds(0.3), PerformanceCategory::Good);
        assert_eq!(PerformanceCategory::from_seconds(1.0), PerformanceCategory::Average);
        assert_eq!(PerformanceCategory::from_seconds(4.99), PerformanceCategory::Slow);
        assert_eq!(PerformanceCategory::from_seconds(42.0), PerformanceCategory::VerySlow);
    }

    #[test]
    fn test_category_boundaries_are_exclusive() {
        assert_eq!(PerformanceCategory::from_seconds(0.1), PerformanceCategory::Good);
        assert_eq!(PerformanceCategory::from_seconds(0.5), PerformanceCategory::Average);
        assert_eq!(PerformanceCategory::from_seconds(2.0), PerformanceCategory::Slow);
        assert_eq!(PerformanceCategory::from_seconds(5.0), PerformanceCategory::VerySlow);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&PerformanceCategory::VerySlow).unwrap();
        assert_eq!(json, "\"Very Slow\"");
        assert_eq!(PerformanceCategory::Good.to_string(), "Good");
    }

    #[test]
    fn test_prediction_clamping() {
        let prediction = PerformancePrediction::new(-3.0, 1.7);
        assert_eq!(prediction.predicted_time, MIN_PREDICTED_TIME);
        assert_eq!(prediction.confidence, MAX_CONFIDENCE);
        assert_eq!(prediction.performance_category, PerformanceCategory::Excellent);

        let prediction = PerformancePrediction::new(0.75, -2.0);
        assert_eq!(prediction.predicted_time, 0.75);
        assert_eq!(prediction.confidence, MIN_CONFIDENCE);
        assert_eq!(prediction.performance_category, PerformanceCategory::Average);
    }
}
