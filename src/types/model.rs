//! Model data structures for the serving registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend kind of a predictive model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Tensorflow,
    Onnx,
    Custom,
}

/// Bookkeeping metadata attached to a loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Reported accuracy in [0, 1]
    pub accuracy: f64,

    /// Number of samples seen so far; only ever grows
    pub training_data_size: u64,

    /// When the model was last trained
    pub last_trained: DateTime<Utc>,

    /// Declared feature names, in input order
    pub features: Vec<String>,

    /// Name of the predicted target
    pub target: String,
}

/// A loaded predictive model.
///
/// Backed by closed-form heuristics rather than learned weights; the
/// identifier selects the scoring strategy at inference time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlModel {
    /// Unique identifier; key into the registry cache
    pub id: String,

    /// Human-readable display name
    pub name: String,

    /// Version string
    pub version: String,

    /// Backend kind
    pub kind: ModelKind,

    /// Expected feature vector lengths
    pub input_shape: Vec<usize>,

    /// Produced output vector lengths
    pub output_shape: Vec<usize>,

    /// Mutable bookkeeping; updated only by the training coordinator
    pub metadata: ModelMetadata,
}

/// Static catalog entry describing a model before it is loaded
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub kind: ModelKind,
    pub input_shape: &'static [usize],
    pub output_shape: &'static [usize],
    pub accuracy: f64,
    pub training_data_size: u64,
    pub features: &'static [&'static str],
    pub target: &'static str,
}

impl ModelDescriptor {
    /// Instantiate a fresh model from this descriptor.
    ///
    /// `last_trained` starts at instantiation time and advances only
    /// through the training coordinator.
    pub fn instantiate(&self) -> MlModel {
        MlModel {
            id: self.id.to_string(),
            name: self.name.to_string(),
            version: self.version.to_string(),
            kind: self.kind,
            input_shape: self.input_shape.to_vec(),
            output_shape: self.output_shape.to_vec(),
            metadata: ModelMetadata {
                accuracy: self.accuracy,
                training_data_size: self.training_data_size,
                last_trained: Utc::now(),
                features: self.features.iter().map(|f| f.to_string()).collect(),
                target: self.target.to_string(),
            },
        }
    }
}
