//! Answer scoring and aggregation

pub mod aggregator;
pub mod attribution;
pub mod lexical;
pub mod metrics;
pub mod normalize;
pub mod reasoning;
pub mod rouge;

pub use aggregator::{aggregate, AggregatedMetrics, CategoryMetrics, EvaluationEngine, EvaluationRun};
pub use attribution::{evaluate_answer_attribution, Evidence};
pub use lexical::{exact_match, f1_score};
pub use metrics::{counts_toward_mean, MetricAccumulator, MetricSummary, QaResult};
pub use normalize::{normalize_answer, normalized_tokens};
pub use reasoning::{
    evaluate_multi_hop_reasoning, reasoning_breakdown, ReasoningBreakdown, ReasoningWeights,
};
pub use rouge::{lcs_length, rouge_l, rouge_n, rouge_scores, RougeScores};
