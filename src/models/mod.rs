//! Model loading, inference, and training components

pub mod explanation;
pub mod importance;
pub mod inference;
pub mod loader;
pub mod training;

pub use importance::{ImportanceEstimator, RandomImportance};
pub use loader::ModelLoader;
pub use training::TrainingCoordinator;
