//! Training coordination and model bookkeeping.
//!
//! Training here never changes predictive behavior; it validates the batch,
//! simulates the training cost, and updates the model's bookkeeping metadata
//! under its write lock.

use crate::error::ServingError;
use crate::registry::ModelRegistry;
use crate::types::TrainingBatch;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Coordinates training batches for cached models
pub struct TrainingCoordinator {
    registry: Arc<ModelRegistry>,
    /// Simulated training duration
    train_delay: Duration,
}

impl TrainingCoordinator {
    /// Create a coordinator over the given registry
    pub fn new(registry: Arc<ModelRegistry>, train_delay: Duration) -> Self {
        Self {
            registry,
            train_delay,
        }
    }

    /// Apply a training batch to a model, loading it first if necessary.
    ///
    /// Fails with `TrainingData` when the batch inputs and outputs differ in
    /// length, before any load or delay happens.
    pub async fn train(&self, id: &str, batch: &TrainingBatch) -> Result<(), ServingError> {
        batch.validate()?;

        let model = self.registry.get_or_load(id).await?;

        info!(
            model = %id,
            samples = batch.len(),
            delay_ms = self.train_delay.as_millis() as u64,
            "Training started"
        );

        if !self.train_delay.is_zero() {
            tokio::time::sleep(self.train_delay).await;
        }

        let mut model = model.write().await;
        model.metadata.training_data_size += batch.len() as u64;
        model.metadata.last_trained = Utc::now();

        info!(
            model = %id,
            training_data_size = model.metadata.training_data_size,
            "Training complete"
        );

        Ok(())
    }
}
