//! Catalog-backed model loader

use crate::catalog;
use crate::error::ServingError;
use crate::types::MlModel;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

/// Loader that resolves catalog descriptors into live models.
///
/// The fetch/initialize cost is simulated with a configurable delay; real
/// backends would perform I/O here and may raise `LoadTransient`.
pub struct ModelLoader {
    /// Simulated load latency
    load_delay: Duration,
    /// Number of completed load calls
    loads: AtomicU64,
}

impl ModelLoader {
    /// Create a loader with the given simulated load latency
    pub fn new(load_delay: Duration) -> Self {
        Self {
            load_delay,
            loads: AtomicU64::new(0),
        }
    }

    /// Load a model by identifier.
    ///
    /// Returns a fresh `MlModel` each call; fails with `ModelNotFound` when
    /// the catalog has no descriptor.
    pub async fn load(&self, id: &str) -> Result<MlModel, ServingError> {
        let descriptor =
            catalog::describe(id).ok_or_else(|| ServingError::ModelNotFound(id.to_string()))?;

        self.loads.fetch_add(1, Ordering::Relaxed);
        info!(model = %id, delay_ms = self.load_delay.as_millis() as u64, "Loading model");

        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }

        let model = descriptor.instantiate();
        info!(
            model = %id,
            features = model.metadata.features.len(),
            accuracy = model.metadata.accuracy,
            "Model loaded"
        );

        Ok(model)
    }

    /// Number of loads performed so far
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_known_model() {
        let loader = ModelLoader::new(Duration::ZERO);
        let model = loader.load(catalog::PERFORMANCE_PREDICTOR).await.unwrap();

        assert_eq!(model.id, catalog::PERFORMANCE_PREDICTOR);
        assert_eq!(loader.load_count(), 1);
    }

    #[tokio::test]
    async fn test_load_unknown_model() {
        let loader = ModelLoader::new(Duration::ZERO);
        let err = loader.load("does-not-exist").await.unwrap_err();

        assert!(matches!(err, ServingError::ModelNotFound(_)));
        assert_eq!(loader.load_count(), 0);
    }

    #[tokio::test]
    async fn test_each_load_returns_fresh_model() {
        let loader = ModelLoader::new(Duration::ZERO);
        let a = loader.load(catalog::SKILL_GAP_ANALYZER).await.unwrap();
        let b = loader.load(catalog::SKILL_GAP_ANALYZER).await.unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(loader.load_count(), 2);
    }
}
