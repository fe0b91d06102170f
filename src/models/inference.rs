//! Inference dispatch for the catalog models.
//!
//! Each model identifier maps to a pure scoring function over the feature
//! vector. The set is closed; identifiers without a strategy fall back to a
//! neutral score. That fallback is documented behavior inherited from the
//! source system, not an error path — unknown identifiers at *load* time are
//! rejected by the catalog instead.

use crate::catalog;
use crate::types::{MlInput, MlModel, RawScore};
use tracing::debug;

type ScoreFn = fn(&[f64]) -> RawScore;

/// Identifier-keyed strategy table; adding a model kind is a data change
const STRATEGIES: &[(&str, ScoreFn)] = &[
    (catalog::LEARNING_PATH_PREDICTOR, score_learning_path),
    (catalog::PERFORMANCE_PREDICTOR, score_performance),
    (catalog::LEARNING_STYLE_DETECTOR, score_learning_style),
    (catalog::SKILL_GAP_ANALYZER, score_skill_gap),
];

/// Score `input` with the strategy matching the model's identifier.
///
/// Unrecognized identifiers yield the neutral `[0.5]` / 0.5 fallback.
pub fn dispatch(model: &MlModel, input: &MlInput) -> RawScore {
    match STRATEGIES.iter().find(|(id, _)| *id == model.id) {
        Some((id, score)) => {
            debug!(model = %id, features = input.features.len(), "Dispatching inference");
            score(&input.features)
        }
        None => {
            debug!(model = %model.id, "No strategy for model, using neutral fallback");
            neutral_fallback()
        }
    }
}

/// Neutral score returned for identifiers outside the strategy table
fn neutral_fallback() -> RawScore {
    RawScore {
        prediction: vec![0.5],
        confidence: 0.5,
        probabilities: None,
    }
}

fn feature_or(features: &[f64], index: usize, default: f64) -> f64 {
    features.get(index).copied().unwrap_or(default)
}

/// Topic recommendation vector keyed by performance tier.
///
/// High performers are pushed toward the advanced topics (indices 7, 8),
/// mid performers toward cloud and infrastructure (4, 5), everyone else
/// back to fundamentals (1, 2).
fn score_learning_path(features: &[f64]) -> RawScore {
    let _current_week = feature_or(features, 0, 1.0);
    let performance_score = feature_or(features, 1, 0.5);

    let mut prediction = vec![0.0; 10];
    if performance_score > 0.8 {
        prediction[7] = 0.9;
        prediction[8] = 0.8;
    } else if performance_score > 0.6 {
        prediction[4] = 0.8;
        prediction[5] = 0.7;
    } else {
        prediction[1] = 0.9;
        prediction[2] = 0.8;
    }

    let confidence = (performance_score + 0.3).min(0.95);

    RawScore {
        probabilities: Some(prediction.clone()),
        prediction,
        confidence,
    }
}

/// Completion probability from study habits, clamped to [0.1, 0.99]
fn score_performance(features: &[f64]) -> RawScore {
    let study_streak = feature_or(features, 0, 0.0);
    let avg_score = feature_or(features, 1, 0.5);
    let completion_rate = feature_or(features, 2, 0.5);

    let base = (avg_score + completion_rate + (study_streak / 30.0).min(1.0)) / 3.0;
    let completion_probability = base.clamp(0.1, 0.99);

    RawScore {
        prediction: vec![completion_probability],
        confidence: 0.85,
        probabilities: Some(vec![completion_probability, 1.0 - completion_probability]),
    }
}

/// Default style distribution used when preferences cannot be normalized
const DEFAULT_STYLE_DISTRIBUTION: [f64; 4] = [0.3, 0.4, 0.2, 0.1];

/// Normalize the first four preference features into a style distribution
fn score_learning_style(features: &[f64]) -> RawScore {
    if features.len() >= 4 {
        let sum: f64 = features[..4].iter().sum();
        if sum != 0.0 {
            let prediction: Vec<f64> = features[..4].iter().map(|f| f / sum).collect();
            return RawScore {
                probabilities: Some(prediction.clone()),
                prediction,
                confidence: 0.75,
            };
        }
    }

    let prediction = DEFAULT_STYLE_DISTRIBUTION.to_vec();
    RawScore {
        probabilities: Some(prediction.clone()),
        prediction,
        confidence: 0.6,
    }
}

/// Features below this score are considered a skill gap
const SKILL_GAP_THRESHOLD: f64 = 0.6;

/// Maximum number of skill features considered per analysis
const SKILL_GAP_MAX_FEATURES: usize = 50;

/// Per-feature gap sizes: `1 - score` where the score falls short
fn score_skill_gap(features: &[f64]) -> RawScore {
    let prediction: Vec<f64> = features
        .iter()
        .take(SKILL_GAP_MAX_FEATURES)
        .map(|&f| if f < SKILL_GAP_THRESHOLD { 1.0 - f } else { 0.0 })
        .collect();

    let probabilities: Vec<f64> = prediction
        .iter()
        .map(|&gap| if gap > 0.0 { 1.0 } else { 0.0 })
        .collect();

    RawScore {
        prediction,
        confidence: 0.8,
        probabilities: Some(probabilities),
    }
}
