//! Model Serving Core
//!
//! Registry, cache, and inference dispatch for the learning platform's
//! predictive models. Models come from a fixed catalog, load once per
//! process, and score inputs with closed-form heuristics behind a swappable
//! interface.

pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod service;
pub mod types;

pub use config::AppConfig;
pub use error::ServingError;
pub use metrics::ServingMetrics;
pub use registry::ModelRegistry;
pub use service::{ModelMetrics, ModelService};
pub use types::{MlInput, MlModel, Prediction, TrainingBatch};
