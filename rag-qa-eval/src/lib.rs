//! QA Evaluation for End-to-End RAG Benchmarks
//!
//! This crate scores generated answers against reference answers and
//! aggregates the scores over a benchmark dataset.
//!
//! # Metrics
//!
//! - Exact match against the reference and accepted alternatives
//! - Token-level F1
//! - ROUGE-1, ROUGE-2 (n-gram set recall) and ROUGE-L (LCS recall)
//! - Multi-hop reasoning accuracy (answer correctness plus step coverage)
//! - Answer attribution accuracy (F1 of cited sources)
//!
//! Results are averaged overall and per question type.
//!
//! # Example
//!
//! ```
//! use rag_qa_eval::{
//!     analysis::EvaluationEngine,
//!     dataset::{GroundTruth, Prediction, Predictions, QaPair},
//! };
//!
//! let ground_truth = GroundTruth::new(vec![
//!     QaPair::new("q1", "factoid", "Paris").alternative("Paris, France"),
//! ]);
//!
//! let mut predictions = Predictions::new();
//! predictions.insert("q1".to_string(), Prediction::new("paris"));
//!
//! let run = EvaluationEngine::new().evaluate(&ground_truth, &predictions);
//! let overall = run.aggregated.overall_metrics.unwrap();
//! assert_eq!(overall.exact_match, 1.0);
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod reporting;

pub use config::Config;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{
        AggregatedMetrics, CategoryMetrics, EvaluationEngine, EvaluationRun, MetricSummary,
        QaResult, ReasoningWeights, RougeScores,
    };
    pub use crate::config::{Config, ConfigError};
    pub use crate::dataset::{
        load_ground_truth_from_file, load_predictions_from_file, GroundTruth, LoadError,
        Prediction, Predictions, QaPair,
    };
    pub use crate::reporting::{print_console_report, JsonReport};
}
