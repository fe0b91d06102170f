//! Inference input/output and training batch data structures

use crate::error::ServingError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Feature vector submitted for inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlInput {
    /// Ordered numeric features
    pub features: Vec<f64>,

    /// Optional free-form provenance (timestamp, source, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl MlInput {
    /// Create an input from raw features with no metadata
    pub fn from_features(features: Vec<f64>) -> Self {
        Self {
            features,
            metadata: None,
        }
    }
}

/// Raw output of a scoring strategy, before explanation and attribution
#[derive(Debug, Clone, PartialEq)]
pub struct RawScore {
    /// Output scores
    pub prediction: Vec<f64>,

    /// Scalar confidence in [0, 1]; not independently calibrated
    pub confidence: f64,

    /// Optional probability sequence parallel to the prediction
    pub probabilities: Option<Vec<f64>>,
}

/// Full prediction returned by the serving facade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Output scores
    pub prediction: Vec<f64>,

    /// Scalar confidence in [0, 1]
    pub confidence: f64,

    /// Optional probability sequence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Vec<f64>>,

    /// Human-readable summary of the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Per-feature attribution weights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_importance: Option<HashMap<String, f64>>,
}

impl Prediction {
    /// Assemble a prediction from a raw score
    pub fn from_raw(raw: RawScore) -> Self {
        Self {
            prediction: raw.prediction,
            confidence: raw.confidence,
            probabilities: raw.probabilities,
            explanation: None,
            feature_importance: None,
        }
    }
}

/// Batch of training samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingBatch {
    /// Input vectors, one per sample
    pub inputs: Vec<Vec<f64>>,

    /// Output vectors, parallel to `inputs`
    pub outputs: Vec<Vec<f64>>,

    /// Optional per-batch metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl TrainingBatch {
    /// Create a batch from matched input/output sequences
    pub fn new(inputs: Vec<Vec<f64>>, outputs: Vec<Vec<f64>>) -> Self {
        Self {
            inputs,
            outputs,
            metadata: None,
        }
    }

    /// Number of samples in the batch
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the batch holds no samples
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Check the input/output invariant.
    ///
    /// Inputs and outputs must be parallel sequences of equal length.
    pub fn validate(&self) -> Result<(), ServingError> {
        if self.inputs.len() != self.outputs.len() {
            return Err(ServingError::TrainingData(format!(
                "inputs ({}) and outputs ({}) differ in length",
                self.inputs.len(),
                self.outputs.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_serialization() {
        let input = MlInput::from_features(vec![5.0, 0.9]);

        let json = serde_json::to_string(&input).unwrap();
        let deserialized: MlInput = serde_json::from_str(&json).unwrap();

        assert_eq!(input.features, deserialized.features);
        assert!(deserialized.metadata.is_none());
    }

    #[test]
    fn test_batch_validate_ok() {
        let batch = TrainingBatch::new(vec![vec![1.0], vec![2.0]], vec![vec![0.0], vec![1.0]]);
        assert!(batch.validate().is_ok());
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_batch_validate_mismatch() {
        let batch = TrainingBatch::new(vec![vec![1.0], vec![2.0]], vec![vec![0.0]]);
        let err = batch.validate().unwrap_err();
        assert!(matches!(err, ServingError::TrainingData(_)));
    }

    #[test]
    fn test_prediction_optional_fields_skipped() {
        let prediction = Prediction::from_raw(RawScore {
            prediction: vec![0.5],
            confidence: 0.5,
            probabilities: None,
        });

        let json = serde_json::to_string(&prediction).unwrap();
        assert!(!json.contains("probabilities"));
        assert!(!json.contains("explanation"));
    }
}
