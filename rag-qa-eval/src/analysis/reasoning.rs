//! Multi-hop reasoning evaluation

use serde::{Deserialize, Serialize};

use super::lexical::{exact_match, f1_score};
use crate::config::ScoringConfig;

/// Weights and threshold for the composite reasoning score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReasoningWeights {
    /// Weight of the final-answer exact match
    pub answer_weight: f64,
    /// Weight of the reasoning-path coverage
    pub reasoning_weight: f64,
    /// A predicted step covers an expected step when their F1 exceeds this
    pub step_threshold: f64,
}

impl Default for ReasoningWeights {
    fn default() -> Self {
        Self {
            answer_weight: 0.7,
            reasoning_weight: 0.3,
            step_threshold: 0.5,
        }
    }
}

impl From<&ScoringConfig> for ReasoningWeights {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            answer_weight: config.answer_weight,
            reasoning_weight: config.reasoning_weight,
            step_threshold: config.reasoning_step_threshold,
        }
    }
}

/// Detailed outcome of a reasoning evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningBreakdown {
    pub answer_score: f64,
    /// One indicator per expected step; empty when steps were not compared
    pub step_scores: Vec<f64>,
    pub reasoning_score: Option<f64>,
    pub final_score: f64,
}

/// Evaluate multi-hop reasoning with the default weights
pub fn evaluate_multi_hop_reasoning(
    prediction: &str,
    ground_truth: &str,
    reasoning_steps: &[String],
    predicted_steps: Option<&[String]>,
) -> f64 {
    reasoning_breakdown(
        prediction,
        ground_truth,
        reasoning_steps,
        predicted_steps,
        &ReasoningWeights::default(),
    )
    .final_score
}

/// Evaluate multi-hop reasoning and keep the per-step detail.
///
/// Without both expected and predicted steps the answer score is returned
/// unchanged. Predicted steps are not consumed: one predicted step may
/// cover several expected steps.
pub fn reasoning_breakdown(
    prediction: &str,
    ground_truth: &str,
    reasoning_steps: &[String],
    predicted_steps: Option<&[String]>,
    weights: &ReasoningWeights,
) -> ReasoningBreakdown {
    let answer_score = exact_match(prediction, ground_truth, &[]);

    let predicted_steps = match predicted_steps {
        Some(steps) if !steps.is_empty() && !reasoning_steps.is_empty() => steps,
        _ => {
            return ReasoningBreakdown {
                answer_score,
                step_scores: Vec::new(),
                reasoning_score: None,
                final_score: answer_score,
            }
        }
    };

    let step_scores: Vec<f64> = reasoning_steps
        .iter()
        .map(|expected| {
            let covered = predicted_steps
                .iter()
                .any(|pred| f1_score(pred, expected) > weights.step_threshold);
            if covered {
                1.0
            } else {
                0.0
            }
        })
        .collect();

    let reasoning_score = if step_scores.is_empty() {
        0.0
    } else {
        step_scores.iter().sum::<f64>() / step_scores.len() as f64
    };

    ReasoningBreakdown {
        answer_score,
        final_score: weights.answer_weight * answer_score
            + weights.reasoning_weight * reasoning_score,
        step_scores,
        reasoning_score: Some(reasoning_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_partial_step_coverage() {
        let expected = steps(&["A", "B"]);
        let predicted = steps(&["B"]);

        let breakdown = reasoning_breakdown(
            "Paris",
            "paris",
            &expected,
            Some(predicted.as_slice()),
            &ReasoningWeights::default(),
        );

        assert_eq!(breakdown.step_scores, vec![0.0, 1.0]);
        assert_eq!(breakdown.reasoning_score, Some(0.5));
        assert!(approx(breakdown.final_score, 0.85));
    }

    #[test]
    fn test_no_predicted_steps_returns_answer_score() {
        let expected = steps(&["find the country", "find its capital"]);
        assert_eq!(evaluate_multi_hop_reasoning("Paris", "Paris", &expected, None), 1.0);
        assert_eq!(evaluate_multi_hop_reasoning("Rome", "Paris", &expected, Some(&[] as &[String])), 0.0);
    }

    #[test]
    fn test_no_expected_steps_returns_answer_score() {
        let predicted = steps(&["something"]);
        assert_eq!(evaluate_multi_hop_reasoning("Paris", "Paris", &[], Some(predicted.as_slice())), 1.0);
    }

    #[test]
    fn test_wrong_answer_full_reasoning() {
        let expected = steps(&["identify the river", "find the source city"]);
        let predicted = steps(&["first identify the river", "then find the source city"]);

        let score = evaluate_multi_hop_reasoning("Berlin", "Munich", &expected, Some(predicted.as_slice()));
        assert!(approx(score, 0.3));
    }

    #[test]
    fn test_predicted_step_reused() {
        let expected = steps(&["capital of france", "capital of france"]);
        let predicted = steps(&["the capital of france"]);

        let breakdown = reasoning_breakdown(
            "x",
            "y",
            &expected,
            Some(predicted.as_slice()),
            &ReasoningWeights::default(),
        );
        assert_eq!(breakdown.step_scores, vec![1.0, 1.0]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // F1("a b", "a c") = 0.5, which does not exceed the threshold
        let expected = steps(&["a c"]);
        let predicted = steps(&["a b"]);
        let breakdown = reasoning_breakdown(
            "x",
            "x",
            &expected,
            Some(predicted.as_slice()),
            &ReasoningWeights::default(),
        );
        assert_eq!(breakdown.step_scores, vec![0.0]);
        assert!(approx(breakdown.final_score, 0.7));
    }

    #[test]
    fn test_custom_weights() {
        let weights = ReasoningWeights {
            answer_weight: 0.5,
            reasoning_weight: 0.5,
            step_threshold: 0.5,
        };
        let expected = steps(&["step one"]);
        let predicted = steps(&["step one"]);
        let breakdown = reasoning_breakdown("a", "b", &expected, Some(predicted.as_slice()), &weights);
        assert!(approx(breakdown.final_score, 0.5));
    }
}
