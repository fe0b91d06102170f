//! Feature attribution strategies.
//!
//! The default estimator assigns pseudo-random weights and is a placeholder,
//! not a real attribution method. It sits behind a trait so permutation
//! importance or a real explainer can replace it without touching callers.

use crate::types::MlModel;
use rand::Rng;
use std::collections::HashMap;

/// Strategy producing one attribution weight per declared feature name
pub trait ImportanceEstimator: Send + Sync {
    fn estimate(&self, model: &MlModel) -> HashMap<String, f64>;
}

/// Placeholder estimator: uniform random weight in [0.1, 0.6) per feature.
///
/// Non-deterministic; tests assert shape and range only.
#[derive(Debug, Default)]
pub struct RandomImportance;

impl ImportanceEstimator for RandomImportance {
    fn estimate(&self, model: &MlModel) -> HashMap<String, f64> {
        let mut rng = rand::thread_rng();
        model
            .metadata
            .features
            .iter()
            .map(|name| (name.clone(), rng.gen_range(0.1..0.6)))
            .collect()
    }
}
