//! Dataset-level evaluation engine

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::attribution::evaluate_answer_attribution;
use super::lexical::{exact_match, f1_score};
use super::metrics::{MetricAccumulator, MetricSummary, QaResult};
use super::reasoning::{reasoning_breakdown, ReasoningWeights};
use super::rouge::rouge_scores;
use crate::config::Config;
use crate::dataset::{GroundTruth, Prediction, Predictions, QaPair};

/// Mean scores for one question type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub count: usize,
    #[serde(flatten)]
    pub metrics: MetricSummary,
}

/// Aggregated results across a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    pub total_questions: usize,
    /// `None` when no question was scored
    pub overall_metrics: Option<MetricSummary>,
    /// Keyed by question type, in first-seen order
    pub metrics_by_type: IndexMap<String, CategoryMetrics>,
}

/// Output of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRun {
    pub aggregated: AggregatedMetrics,
    pub results: Vec<QaResult>,
}

/// Scores predictions against ground truth
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    weights: ReasoningWeights,
    parallel: bool,
}

impl EvaluationEngine {
    /// Create a new engine with default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom reasoning weights
    pub fn with_weights(weights: ReasoningWeights) -> Self {
        Self {
            weights,
            parallel: false,
        }
    }

    /// Create from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            weights: ReasoningWeights::from(&config.scoring),
            parallel: config.evaluation.parallel,
        }
    }

    /// Score questions on the rayon thread pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Score one question against its prediction.
    ///
    /// Reasoning is scored only when the question lists expected steps,
    /// attribution only when the prediction reports sources.
    pub fn score_pair(&self, qa: &QaPair, prediction: &Prediction) -> QaResult {
        let multi_hop_accuracy = if qa.is_multi_hop() {
            reasoning_breakdown(
                &prediction.answer,
                &qa.answer,
                &qa.reasoning_steps,
                prediction.reasoning_steps.as_deref(),
                &self.weights,
            )
            .final_score
        } else {
            0.0
        };

        let attribution_accuracy = match prediction.predicted_sources.as_deref() {
            Some(sources) => evaluate_answer_attribution(&qa.evidence, Some(sources)),
            None => 0.0,
        };

        QaResult {
            qa_id: qa.qa_id.clone(),
            question_type: qa.question_type.clone(),
            exact_match: exact_match(&prediction.answer, &qa.answer, &qa.alternative_answers),
            f1_score: f1_score(&prediction.answer, &qa.answer),
            rouge: rouge_scores(&prediction.answer, &qa.answer),
            multi_hop_accuracy,
            attribution_accuracy,
        }
    }

    /// Score every question that has a prediction, in ground-truth order
    pub fn score_all(&self, ground_truth: &GroundTruth, predictions: &Predictions) -> Vec<QaResult> {
        let score = |qa: &QaPair| {
            prediction_for(qa, predictions).map(|prediction| self.score_pair(qa, prediction))
        };

        if self.parallel {
            ground_truth.qa_pairs.par_iter().filter_map(score).collect()
        } else {
            ground_truth.qa_pairs.iter().filter_map(score).collect()
        }
    }

    /// Score and aggregate a full dataset
    pub fn evaluate(&self, ground_truth: &GroundTruth, predictions: &Predictions) -> EvaluationRun {
        let results = self.score_all(ground_truth, predictions);
        let aggregated = aggregate(&results);

        tracing::info!(
            "Scored {} of {} questions across {} question types",
            aggregated.total_questions,
            ground_truth.len(),
            aggregated.metrics_by_type.len()
        );

        EvaluationRun { aggregated, results }
    }
}

/// Questions without a prediction are skipped: not scored and not
/// counted as failures.
fn prediction_for<'a>(qa: &QaPair, predictions: &'a Predictions) -> Option<&'a Prediction> {
    let prediction = predictions.get(&qa.qa_id);
    if prediction.is_none() {
        tracing::debug!("No prediction for {}, skipping", qa.qa_id);
    }
    prediction
}

/// Reduce per-question results into overall and per-type means
pub fn aggregate(results: &[QaResult]) -> AggregatedMetrics {
    let overall: MetricAccumulator = results.iter().collect();

    let groups = results
        .iter()
        .fold(IndexMap::<&str, MetricAccumulator>::new(), |mut groups, result| {
            groups
                .entry(result.question_type.as_str())
                .or_default()
                .add(result);
            groups
        });

    let metrics_by_type = groups
        .into_iter()
        .filter_map(|(question_type, acc)| {
            acc.summary().map(|metrics| {
                (
                    question_type.to_string(),
                    CategoryMetrics {
                        count: acc.count(),
                        metrics,
                    },
                )
            })
        })
        .collect();

    AggregatedMetrics {
        total_questions: overall.count(),
        overall_metrics: overall.summary(),
        metrics_by_type,
    }
}
