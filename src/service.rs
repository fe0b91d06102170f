//! Public serving facade.
//!
//! `ModelService` is the surface the application layer calls: load a model,
//! run a prediction, apply a training batch, read model metrics. It is
//! constructed explicitly from configuration and passed by reference, never
//! held in global state.

use crate::config::AppConfig;
use crate::error::ServingError;
use crate::metrics::ServingMetrics;
use crate::models::loader::ModelLoader;
use crate::models::{explanation, inference};
use crate::models::{ImportanceEstimator, RandomImportance, TrainingCoordinator};
use crate::registry::ModelRegistry;
use crate::types::{MlInput, MlModel, Prediction, TrainingBatch};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Metrics snapshot for a loaded model
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub training_data_size: u64,
    pub last_trained: DateTime<Utc>,
    pub features: Vec<String>,
    pub target: String,
}

/// Facade over the registry, dispatcher, and training coordinator
pub struct ModelService {
    registry: Arc<ModelRegistry>,
    coordinator: TrainingCoordinator,
    importance: Box<dyn ImportanceEstimator>,
    metrics: Arc<ServingMetrics>,
}

impl ModelService {
    /// Build a service from application configuration
    pub fn new(config: &AppConfig) -> Self {
        Self::with_delays(
            config.registry.load_delay(),
            config.registry.train_delay(),
        )
    }

    /// Build a service with explicit simulation delays
    pub fn with_delays(load_delay: Duration, train_delay: Duration) -> Self {
        let registry = Arc::new(ModelRegistry::new(ModelLoader::new(load_delay)));
        let coordinator = TrainingCoordinator::new(registry.clone(), train_delay);

        Self {
            registry,
            coordinator,
            importance: Box::new(RandomImportance),
            metrics: Arc::new(ServingMetrics::new()),
        }
    }

    /// Replace the feature importance strategy
    pub fn with_estimator(mut self, estimator: Box<dyn ImportanceEstimator>) -> Self {
        self.importance = estimator;
        self
    }

    /// Load a model, returning a snapshot of its current state.
    ///
    /// Idempotent: repeated calls return the cached instance without
    /// re-invoking the loader.
    pub async fn load_model(&self, id: &str) -> Result<MlModel, ServingError> {
        let model = self.registry.get_or_load(id).await?;
        let snapshot = model.read().await.clone();
        Ok(snapshot)
    }

    /// Run inference, loading the model first if it is not cached.
    ///
    /// The returned prediction carries the raw scores plus an explanation
    /// and per-feature importance weights.
    pub async fn predict(&self, id: &str, input: &MlInput) -> Result<Prediction, ServingError> {
        let started = Instant::now();
        let shared = self.registry.get_or_load(id).await?;

        let prediction = {
            let model = shared.read().await;
            let raw = inference::dispatch(&model, input);
            let explanation = explanation::explain(&model, input, &raw);
            let importance = self.importance.estimate(&model);

            let mut prediction = Prediction::from_raw(raw);
            prediction.explanation = Some(explanation);
            prediction.feature_importance = Some(importance);
            prediction
        };

        self.metrics
            .record_prediction(id, started.elapsed(), prediction.confidence);

        debug!(
            model = %id,
            confidence = prediction.confidence,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Prediction served"
        );

        Ok(prediction)
    }

    /// Apply a training batch, loading the model first if necessary
    pub async fn train_model(&self, id: &str, batch: &TrainingBatch) -> Result<(), ServingError> {
        self.coordinator.train(id, batch).await?;
        self.metrics.record_training();
        Ok(())
    }

    /// Metrics for a model already loaded in this process.
    ///
    /// Never loads implicitly; fails with `ModelNotLoaded` when the model
    /// has not been requested yet.
    pub async fn model_metrics(&self, id: &str) -> Result<ModelMetrics, ServingError> {
        let shared = self
            .registry
            .get(id)
            .ok_or_else(|| ServingError::ModelNotLoaded(id.to_string()))?;

        let model = shared.read().await;
        Ok(ModelMetrics {
            accuracy: model.metadata.accuracy,
            training_data_size: model.metadata.training_data_size,
            last_trained: model.metadata.last_trained,
            features: model.metadata.features.clone(),
            target: model.metadata.target.clone(),
        })
    }

    /// Identifiers of all models loaded so far
    pub fn loaded_models(&self) -> Vec<String> {
        self.registry.loaded_models()
    }

    /// Serving metrics collector
    pub fn metrics(&self) -> &ServingMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn service() -> ModelService {
        ModelService::with_delays(Duration::ZERO, Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_load_model_is_idempotent() {
        let service = service();

        let first = service
            .load_model(catalog::PERFORMANCE_PREDICTOR)
            .await
            .unwrap();
        let second = service
            .load_model(catalog::PERFORMANCE_PREDICTOR)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(
            first.metadata.training_data_size,
            second.metadata.training_data_size
        );
        assert_eq!(service.loaded_models(), vec![catalog::PERFORMANCE_PREDICTOR]);
    }

    #[tokio::test]
    async fn test_predict_loads_implicitly() {
        let service = service();
        let input = MlInput::from_features(vec![5.0, 0.9]);

        let prediction = service
            .predict(catalog::LEARNING_PATH_PREDICTOR, &input)
            .await
            .unwrap();

        assert_eq!(prediction.prediction[7], 0.9);
        assert_eq!(prediction.prediction[8], 0.8);
        assert!((prediction.confidence - 0.95).abs() < 1e-9);
        assert!(prediction.explanation.is_some());

        let importance = prediction.feature_importance.unwrap();
        assert_eq!(importance.len(), 21);

        assert!(service
            .loaded_models()
            .contains(&catalog::LEARNING_PATH_PREDICTOR.to_string()));
    }

    #[tokio::test]
    async fn test_predict_unknown_model_fails() {
        let service = service();
        let input = MlInput::from_features(vec![1.0]);

        let err = service.predict("does-not-exist", &input).await.unwrap_err();
        assert!(matches!(err, ServingError::ModelNotFound(_)));
    }

    #[tokio::test]
    async fn test_metrics_require_prior_load() {
        let service = service();

        let err = service
            .model_metrics(catalog::SKILL_GAP_ANALYZER)
            .await
            .unwrap_err();
        assert!(matches!(err, ServingError::ModelNotLoaded(_)));

        service.load_model(catalog::SKILL_GAP_ANALYZER).await.unwrap();
        let metrics = service
            .model_metrics(catalog::SKILL_GAP_ANALYZER)
            .await
            .unwrap();

        assert_eq!(metrics.target, "skill_gaps");
        assert_eq!(metrics.features.len(), 32);
    }

    #[tokio::test]
    async fn test_train_then_metrics_reflect_batch() {
        let service = service();

        service
            .load_model(catalog::PERFORMANCE_PREDICTOR)
            .await
            .unwrap();
        let before = service
            .model_metrics(catalog::PERFORMANCE_PREDICTOR)
            .await
            .unwrap();

        let batch = TrainingBatch::new(vec![vec![0.5; 8]; 25], vec![vec![1.0]; 25]);
        service
            .train_model(catalog::PERFORMANCE_PREDICTOR, &batch)
            .await
            .unwrap();

        let after = service
            .model_metrics(catalog::PERFORMANCE_PREDICTOR)
            .await
            .unwrap();
        assert_eq!(after.training_data_size, before.training_data_size + 25);
        assert!(after.last_trained > before.last_trained);
    }

    #[tokio::test]
    async fn test_performance_reference_scenario() {
        let service = service();
        let input = MlInput::from_features(vec![10.0, 0.8, 0.9]);

        let prediction = service
            .predict(catalog::PERFORMANCE_PREDICTOR, &input)
            .await
            .unwrap();

        let expected = (0.8 + 0.9 + 10.0 / 30.0) / 3.0;
        assert!((prediction.prediction[0] - expected).abs() < 1e-9);
        assert!((prediction.confidence - 0.85).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_metrics_counters_advance() {
        let service = service();
        let input = MlInput::from_features(vec![0.8, 0.6, 0.4, 0.2]);

        service
            .predict(catalog::LEARNING_STYLE_DETECTOR, &input)
            .await
            .unwrap();
        service
            .predict(catalog::LEARNING_STYLE_DETECTOR, &input)
            .await
            .unwrap();

        assert_eq!(
            service
                .metrics()
                .predictions_served
                .load(std::sync::atomic::Ordering::Relaxed),
            2
        );
    }
}
