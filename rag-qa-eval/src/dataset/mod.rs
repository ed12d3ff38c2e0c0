//! Ground-truth and prediction records

pub mod loader;

pub use loader::{
    load_ground_truth_from_file, load_ground_truth_from_str, load_predictions_from_file,
    load_predictions_from_str, LoadError,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analysis::Evidence;

/// A single ground-truth question/answer pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub qa_id: String,
    /// Category label used for per-type aggregation
    pub question_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasoning_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub evidence: Evidence,
}

impl QaPair {
    /// Create a new question with a reference answer
    pub fn new(
        qa_id: impl Into<String>,
        question_type: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            qa_id: qa_id.into(),
            question_type: question_type.into(),
            question: None,
            answer: answer.into(),
            alternative_answers: Vec::new(),
            reasoning_steps: Vec::new(),
            evidence: Evidence::new(),
        }
    }

    /// Set the question text
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Add an acceptable alternative answer
    pub fn alternative(mut self, answer: impl Into<String>) -> Self {
        self.alternative_answers.push(answer.into());
        self
    }

    /// Add an expected reasoning step
    pub fn step(mut self, step: impl Into<String>) -> Self {
        self.reasoning_steps.push(step.into());
        self
    }

    /// Add expected evidence sources of one type
    pub fn with_evidence<I, S>(mut self, source_type: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence
            .entry(source_type.into())
            .or_default()
            .extend(sources.into_iter().map(Into::into));
        self
    }

    /// Whether the question expects a multi-hop reasoning path
    pub fn is_multi_hop(&self) -> bool {
        !self.reasoning_steps.is_empty()
    }
}

/// The ground-truth dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub qa_pairs: Vec<QaPair>,
}

impl GroundTruth {
    pub fn new(qa_pairs: Vec<QaPair>) -> Self {
        Self { qa_pairs }
    }

    pub fn len(&self) -> usize {
        self.qa_pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qa_pairs.is_empty()
    }
}

/// A system's prediction for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_steps: Option<Vec<String>>,
    /// Cited sources; `None` means the system did not report citations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_sources: Option<Vec<String>>,
}

impl Prediction {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            reasoning_steps: None,
            predicted_sources: None,
        }
    }

    /// Set predicted reasoning steps
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reasoning_steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    /// Set cited sources
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predicted_sources = Some(sources.into_iter().map(Into::into).collect());
        self
    }
}

/// Predictions keyed by question identifier
pub type Predictions = IndexMap<String, Prediction>;
