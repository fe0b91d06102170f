//! Error taxonomy for the model serving core

use thiserror::Error;

/// Errors surfaced by the serving facade and its components.
///
/// All loader and coordinator errors propagate unchanged to callers; the
/// only degradation in the core is the dispatcher's documented value
/// fallback for unrecognized model identifiers, which is not an error path.
#[derive(Debug, Error)]
pub enum ServingError {
    /// The catalog has no descriptor for this identifier
    #[error("model `{0}` not found in catalog")]
    ModelNotFound(String),

    /// Metrics were requested for a model never loaded in this process
    #[error("model `{0}` has not been loaded")]
    ModelNotLoaded(String),

    /// Training batch violates the inputs/outputs invariant
    #[error("malformed training batch: {0}")]
    TrainingData(String),

    /// Transient load failure.
    ///
    /// Reserved for I/O-backed loaders; the catalog-backed loader never
    /// raises it. Kept distinct from `ModelNotFound` so callers can retry.
    #[error("transient failure loading model `{id}`: {reason}")]
    LoadTransient { id: String, reason: String },
}

impl ServingError {
    /// Whether a caller may reasonably retry the failed operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServingError::LoadTransient { .. })
    }
}
