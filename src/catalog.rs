//! Static catalog of the models this service can load.
//!
//! Descriptors are fixed at compile time; the loader turns them into live
//! `MlModel` instances on first request. Unknown identifiers are a hard
//! failure, never a default.

use crate::types::{ModelDescriptor, ModelKind};

/// Identifier of the learning path predictor
pub const LEARNING_PATH_PREDICTOR: &str = "learning-path-predictor";
/// Identifier of the performance predictor
pub const PERFORMANCE_PREDICTOR: &str = "performance-predictor";
/// Identifier of the learning style detector
pub const LEARNING_STYLE_DETECTOR: &str = "learning-style-detector";
/// Identifier of the skill gap analyzer
pub const SKILL_GAP_ANALYZER: &str = "skill-gap-analyzer";

const LEARNING_PATH_FEATURES: &[&str] = &[
    "current_week",
    "performance_score",
    "time_spent_hours",
    "hints_used",
    "error_rate",
    "git_score",
    "linux_score",
    "docker_score",
    "k8s_score",
    "aws_score",
    "terraform_score",
    "jenkins_score",
    "monitoring_score",
    "git_attempts",
    "linux_attempts",
    "docker_attempts",
    "k8s_attempts",
    "aws_attempts",
    "terraform_attempts",
    "jenkins_attempts",
    "monitoring_attempts",
];

const PERFORMANCE_FEATURES: &[&str] = &[
    "study_streak",
    "avg_score",
    "completion_rate",
    "struggle_time_hours",
    "learning_style_visual",
    "learning_style_kinesthetic",
    "learning_style_reading",
    "learning_style_auditory",
];

const LEARNING_STYLE_FEATURES: &[&str] = &[
    "visual_preference",
    "kinesthetic_preference",
    "reading_preference",
    "auditory_preference",
];

const SKILL_GAP_FEATURES: &[&str] = &[
    "git_score",
    "git_attempts",
    "git_time_spent",
    "git_errors",
    "linux_score",
    "linux_attempts",
    "linux_time_spent",
    "linux_errors",
    "docker_score",
    "docker_attempts",
    "docker_time_spent",
    "docker_errors",
    "kubernetes_score",
    "kubernetes_attempts",
    "kubernetes_time_spent",
    "kubernetes_errors",
    "aws_score",
    "aws_attempts",
    "aws_time_spent",
    "aws_errors",
    "terraform_score",
    "terraform_attempts",
    "terraform_time_spent",
    "terraform_errors",
    "jenkins_score",
    "jenkins_attempts",
    "jenkins_time_spent",
    "jenkins_errors",
    "monitoring_score",
    "monitoring_attempts",
    "monitoring_time_spent",
    "monitoring_errors",
];

/// Descriptors for every model shipped with the service
const DESCRIPTORS: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: LEARNING_PATH_PREDICTOR,
        name: "Learning Path Predictor",
        version: "1.0.0",
        kind: ModelKind::Custom,
        input_shape: &[21],
        output_shape: &[10],
        accuracy: 0.82,
        training_data_size: 5000,
        features: LEARNING_PATH_FEATURES,
        target: "recommended_topics",
    },
    ModelDescriptor {
        id: PERFORMANCE_PREDICTOR,
        name: "Performance Predictor",
        version: "1.0.0",
        kind: ModelKind::Custom,
        input_shape: &[8],
        output_shape: &[1],
        accuracy: 0.87,
        training_data_size: 5000,
        features: PERFORMANCE_FEATURES,
        target: "completion_probability",
    },
    ModelDescriptor {
        id: LEARNING_STYLE_DETECTOR,
        name: "Learning Style Detector",
        version: "1.0.0",
        kind: ModelKind::Custom,
        input_shape: &[4],
        output_shape: &[4],
        accuracy: 0.79,
        training_data_size: 5000,
        features: LEARNING_STYLE_FEATURES,
        target: "learning_style",
    },
    ModelDescriptor {
        id: SKILL_GAP_ANALYZER,
        name: "Skill Gap Analyzer",
        version: "1.0.0",
        kind: ModelKind::Custom,
        input_shape: &[32],
        output_shape: &[32],
        accuracy: 0.84,
        training_data_size: 5000,
        features: SKILL_GAP_FEATURES,
        target: "skill_gaps",
    },
];

/// Look up the descriptor for a model identifier
pub fn describe(id: &str) -> Option<&'static ModelDescriptor> {
    DESCRIPTORS.iter().find(|d| d.id == id)
}

/// All identifiers known to the catalog
pub fn model_ids() -> Vec<&'static str> {
    DESCRIPTORS.iter().map(|d| d.id).collect()
}
