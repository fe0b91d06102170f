//! Model Serving Demo - Main Entry Point
//!
//! Loads every catalog model, runs a sample prediction per model, applies a
//! small synthetic training batch, and prints serving metrics.

use anyhow::Result;
use model_serving::{catalog, AppConfig, MlInput, ModelService, TrainingBatch};
use rand::Rng;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("model_serving=info".parse()?),
        )
        .init();

    info!("Starting model serving demo");

    let config = AppConfig::load().unwrap_or_else(|e| {
        info!(error = %e, "No configuration file, using defaults");
        AppConfig::default()
    });
    info!(
        load_delay_ms = config.registry.load_delay_ms,
        train_delay_ms = config.registry.train_delay_ms,
        "Configuration loaded"
    );

    let service = ModelService::new(&config);

    // Load and exercise every catalog model
    for id in catalog::model_ids() {
        let model = service.load_model(id).await?;
        info!(
            model = %id,
            name = %model.name,
            features = model.metadata.features.len(),
            accuracy = model.metadata.accuracy,
            "Model ready"
        );

        let input = sample_input(id);
        let prediction = service.predict(id, &input).await?;
        info!(
            model = %id,
            confidence = prediction.confidence,
            outputs = prediction.prediction.len(),
            explanation = prediction.explanation.as_deref().unwrap_or(""),
            "Sample prediction"
        );
    }

    // Train the performance predictor on a synthetic batch
    let batch = sample_training_batch(10);
    service
        .train_model(catalog::PERFORMANCE_PREDICTOR, &batch)
        .await?;

    let metrics = service
        .model_metrics(catalog::PERFORMANCE_PREDICTOR)
        .await?;
    info!(
        model = catalog::PERFORMANCE_PREDICTOR,
        training_data_size = metrics.training_data_size,
        last_trained = %metrics.last_trained,
        "Post-training metrics"
    );

    info!(loaded = ?service.loaded_models(), "All models loaded");
    service.metrics().print_summary();

    Ok(())
}

/// Sample feature vector for a model, mirroring real application inputs
fn sample_input(model_id: &str) -> MlInput {
    let mut rng = rand::thread_rng();

    let features = match model_id {
        // week, score, time, hints, accuracy, velocity
        catalog::LEARNING_PATH_PREDICTOR => vec![5.0, 0.75, 120.0, 2.0, 0.8, 0.7],
        // streak, score, completion, persistence
        catalog::PERFORMANCE_PREDICTOR => vec![7.0, 0.8, 0.9, 0.6],
        // visual, kinesthetic, reading, auditory preferences
        catalog::LEARNING_STYLE_DETECTOR => vec![0.8, 0.6, 0.4, 0.2],
        // 32 skill scores between 0.2 and 0.8
        catalog::SKILL_GAP_ANALYZER => (0..32).map(|_| rng.gen_range(0.2..0.8)).collect(),
        _ => vec![0.5],
    };

    MlInput::from_features(features)
}

/// Synthetic training batch for the performance predictor
fn sample_training_batch(samples: usize) -> TrainingBatch {
    let mut rng = rand::thread_rng();
    let mut inputs = Vec::with_capacity(samples);
    let mut outputs = Vec::with_capacity(samples);

    for _ in 0..samples {
        inputs.push(vec![
            rng.gen_range(0.0..30.0), // study_streak
            rng.gen(),                // avg_score
            rng.gen(),                // completion_rate
            rng.gen_range(0.0..5.0),  // struggle_time_hours
            rng.gen(),                // learning_style_visual
            rng.gen(),                // learning_style_kinesthetic
            rng.gen(),                // learning_style_reading
            rng.gen(),                // learning_style_auditory
        ]);
        outputs.push(vec![rng.gen()]); // completion probability
    }

    TrainingBatch::new(inputs, outputs)
}
