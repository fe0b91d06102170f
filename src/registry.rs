//! Process-lifetime model registry with request coalescing.
//!
//! The registry owns at most one live model per identifier. Concurrent
//! requests for the same identifier coalesce onto a single loader call via a
//! per-key `OnceCell`; a failed load leaves no entry behind, so a later
//! request may retry.

use crate::error::ServingError;
use crate::models::loader::ModelLoader;
use crate::types::MlModel;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{OnceCell, RwLock};
use tracing::debug;

/// A cached model shared between inference readers and the training writer.
///
/// Lock granularity is per model: training takes the write half while
/// predictions on other models proceed untouched.
pub type SharedModel = Arc<RwLock<MlModel>>;

type ModelCell = Arc<OnceCell<SharedModel>>;

/// Registry mapping model identifiers to cached instances
pub struct ModelRegistry {
    loader: ModelLoader,
    /// Held only to fetch or insert a cell, never across an await
    models: Mutex<HashMap<String, ModelCell>>,
}

impl ModelRegistry {
    /// Create a registry backed by the given loader
    pub fn new(loader: ModelLoader) -> Self {
        Self {
            loader,
            models: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached model for `id`, loading it on first request.
    ///
    /// At most one loader invocation is in flight per identifier; callers
    /// arriving while a load is pending wait for its result instead of
    /// loading again.
    pub async fn get_or_load(&self, id: &str) -> Result<SharedModel, ServingError> {
        let cell = {
            let mut models = self.models.lock().expect("registry map poisoned");
            models
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        if let Some(model) = cell.get() {
            debug!(model = %id, "Registry cache hit");
            return Ok(model.clone());
        }

        let result = cell
            .get_or_try_init(|| async {
                let model = self.loader.load(id).await?;
                Ok::<SharedModel, ServingError>(Arc::new(RwLock::new(model)))
            })
            .await;

        match result {
            Ok(model) => Ok(model.clone()),
            Err(e) => {
                // Drop the empty cell so the failure does not stick to the key
                let mut models = self.models.lock().expect("registry map poisoned");
                if let Some(existing) = models.get(id) {
                    if existing.get().is_none() {
                        models.remove(id);
                    }
                }
                Err(e)
            }
        }
    }

    /// Return the cached model without loading
    pub fn get(&self, id: &str) -> Option<SharedModel> {
        let models = self.models.lock().expect("registry map poisoned");
        models.get(id).and_then(|cell| cell.get().cloned())
    }

    /// Whether a model has finished loading in this process
    pub fn is_loaded(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Identifiers of all models loaded so far
    pub fn loaded_models(&self) -> Vec<String> {
        let models = self.models.lock().expect("registry map poisoned");
        models
            .iter()
            .filter(|(_, cell)| cell.get().is_some())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Number of loader invocations performed so far
    pub fn load_count(&self) -> u64 {
        self.loader.load_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use std::time::Duration;

    fn registry(delay: Duration) -> Arc<ModelRegistry> {
        Arc::new(ModelRegistry::new(ModelLoader::new(delay)))
    }

    #[tokio::test]
    async fn test_sequential_calls_hit_cache() {
        let registry = registry(Duration::ZERO);

        let first = registry
            .get_or_load(catalog::PERFORMANCE_PREDICTOR)
            .await
            .unwrap();
        let second = registry
            .get_or_load(catalog::PERFORMANCE_PREDICTOR)
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.load_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_coalesce() {
        let registry = registry(Duration::from_millis(50));

        let calls = (0..16).map(|_| registry.get_or_load(catalog::SKILL_GAP_ANALYZER));
        let results = futures::future::join_all(calls).await;

        for result in results {
            result.unwrap();
        }

        assert_eq!(registry.load_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_model_leaves_no_entry() {
        let registry = registry(Duration::ZERO);

        let err = registry.get_or_load("does-not-exist").await.unwrap_err();
        assert!(matches!(err, ServingError::ModelNotFound(_)));
        assert!(!registry.is_loaded("does-not-exist"));
        assert!(registry.loaded_models().is_empty());

        // The key stays retryable after a failure
        let err = registry.get_or_load("does-not-exist").await.unwrap_err();
        assert!(matches!(err, ServingError::ModelNotFound(_)));
    }

    #[tokio::test]
    async fn test_independent_models_load_separately() {
        let registry = registry(Duration::ZERO);

        registry
            .get_or_load(catalog::LEARNING_PATH_PREDICTOR)
            .await
            .unwrap();
        registry
            .get_or_load(catalog::LEARNING_STYLE_DETECTOR)
            .await
            .unwrap();

        assert_eq!(registry.load_count(), 2);
        assert_eq!(registry.loaded_models().len(), 2);
    }
}
