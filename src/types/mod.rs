//! Type definitions for the model serving core

pub mod model;
pub mod prediction;

pub use model::{MlModel, ModelDescriptor, ModelKind, ModelMetadata};
pub use prediction::{MlInput, Prediction, RawScore, TrainingBatch};
