//! Natural-language explanations for model predictions

use crate::catalog;
use crate::types::{MlInput, MlModel, RawScore};

/// Topic names matching the learning path prediction vector, in order
const PATH_TOPICS: [&str; 10] = [
    "git_basics",
    "linux_commands",
    "docker_fundamentals",
    "kubernetes_basics",
    "aws_services",
    "terraform_intro",
    "ci_cd_jenkins",
    "monitoring_prometheus",
    "advanced_docker",
    "k8s_advanced",
];

const LEARNING_STYLES: [&str; 4] = ["visual", "kinesthetic", "reading", "auditory"];

/// Render a per-model summary of a raw score.
///
/// Pure; missing values have already been defaulted by the dispatcher, so
/// there are no failure modes here.
pub fn explain(model: &MlModel, input: &MlInput, raw: &RawScore) -> String {
    match model.id.as_str() {
        catalog::LEARNING_PATH_PREDICTOR => explain_learning_path(raw),
        catalog::PERFORMANCE_PREDICTOR => explain_performance(input, raw),
        catalog::LEARNING_STYLE_DETECTOR => explain_learning_style(raw),
        catalog::SKILL_GAP_ANALYZER => explain_skill_gap(model, raw),
        _ => format!(
            "Prediction from {} with confidence {:.2}",
            model.name, raw.confidence
        ),
    }
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn explain_learning_path(raw: &RawScore) -> String {
    let top = argmax(&raw.prediction);
    let topic = PATH_TOPICS.get(top).copied().unwrap_or("fundamentals");
    format!(
        "Recommended next topic: {} (score {:.2}) based on your recent performance",
        topic, raw.prediction[top]
    )
}

fn explain_performance(input: &MlInput, raw: &RawScore) -> String {
    let probability = raw.prediction.first().copied().unwrap_or(0.5);
    let streak = input.features.first().copied().unwrap_or(0.0) as u64;

    if probability > 0.8 {
        format!(
            "Your completion probability is very high at {:.0}% thanks to strong study habits ({} day streak)",
            probability * 100.0,
            streak
        )
    } else if probability > 0.6 {
        format!(
            "Your completion probability is good at {:.0}% with room for improvement",
            probability * 100.0
        )
    } else {
        format!(
            "Your completion probability is {:.0}%; a more regular study routine would raise it",
            probability * 100.0
        )
    }
}

fn explain_learning_style(raw: &RawScore) -> String {
    let primary = argmax(&raw.prediction);
    let description = match LEARNING_STYLES[primary] {
        "visual" => "You learn best through diagrams and visual walkthroughs",
        "kinesthetic" => "You learn best through hands-on practice",
        "reading" => "You learn best through written guides and documentation",
        _ => "You learn best through listening and verbal explanations",
    };
    format!(
        "{} (confidence: {:.0}%)",
        description,
        raw.confidence * 100.0
    )
}

fn explain_skill_gap(model: &MlModel, raw: &RawScore) -> String {
    let mut parts = Vec::new();
    for (i, &gap) in raw.prediction.iter().enumerate() {
        if gap <= 0.0 {
            continue;
        }
        let feature = model
            .metadata
            .features
            .get(i)
            .map(String::as_str)
            .unwrap_or("unknown_skill");
        if gap > 0.5 {
            parts.push(format!("high gap in {} ({:.0}%)", feature, gap * 100.0));
        } else {
            parts.push(format!("moderate gap in {} ({:.0}%)", feature, gap * 100.0));
        }
    }

    if parts.is_empty() {
        return "Skill gap analysis: strong foundation, ready for advanced topics".to_string();
    }

    let gap_count = parts.len();
    let summary = if gap_count > raw.prediction.len() / 2 {
        "significant gaps detected, focus on fundamentals"
    } else {
        "targeted practice recommended"
    };

    format!("Skill gap analysis: {}. Overall: {}", parts.join(", "), summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inference;

    fn model(id: &str) -> MlModel {
        catalog::describe(id).unwrap().instantiate()
    }

    #[test]
    fn test_performance_explanation_tiers() {
        let model = model(catalog::PERFORMANCE_PREDICTOR);

        let input = MlInput::from_features(vec![30.0, 0.95, 0.95]);
        let raw = inference::dispatch(&model, &input);
        let text = explain(&model, &input, &raw);
        assert!(text.contains("very high"));

        let input = MlInput::from_features(vec![0.0, 0.1, 0.1]);
        let raw = inference::dispatch(&model, &input);
        let text = explain(&model, &input, &raw);
        assert!(text.contains("study routine"));
    }

    #[test]
    fn test_learning_path_explanation_names_topic() {
        let model = model(catalog::LEARNING_PATH_PREDICTOR);
        let input = MlInput::from_features(vec![5.0, 0.9]);
        let raw = inference::dispatch(&model, &input);

        let text = explain(&model, &input, &raw);
        assert!(text.contains("monitoring_prometheus"));
    }

    #[test]
    fn test_learning_style_explanation_picks_primary() {
        let model = model(catalog::LEARNING_STYLE_DETECTOR);
        let input = MlInput::from_features(vec![0.1, 0.7, 0.1, 0.1]);
        let raw = inference::dispatch(&model, &input);

        let text = explain(&model, &input, &raw);
        assert!(text.contains("hands-on"));
    }

    #[test]
    fn test_skill_gap_explanation_lists_weak_features() {
        let model = model(catalog::SKILL_GAP_ANALYZER);
        let mut features = vec![0.9; 32];
        features[0] = 0.2; // git_score
        let input = MlInput::from_features(features);
        let raw = inference::dispatch(&model, &input);

        let text = explain(&model, &input, &raw);
        assert!(text.contains("high gap in git_score"));
    }

    #[test]
    fn test_skill_gap_explanation_no_gaps() {
        let model = model(catalog::SKILL_GAP_ANALYZER);
        let input = MlInput::from_features(vec![0.9; 32]);
        let raw = inference::dispatch(&model, &input);

        let text = explain(&model, &input, &raw);
        assert!(text.contains("strong foundation"));
    }

    #[test]
    fn test_unknown_model_generic_explanation() {
        let mut unknown = model(catalog::PERFORMANCE_PREDICTOR);
        unknown.id = "motivational-analyzer".to_string();
        let input = MlInput::from_features(vec![1.0]);
        let raw = inference::dispatch(&unknown, &input);

        let text = explain(&unknown, &input, &raw);
        assert!(text.contains("confidence 0.50"));
    }
}
