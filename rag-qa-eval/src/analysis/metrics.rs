//! Per-question score records and their aggregation

use serde::{Deserialize, Serialize};

use super::rouge::RougeScores;

/// Scores for a single question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaResult {
    pub qa_id: String,
    pub question_type: String,
    /// 1.0 or 0.0
    pub exact_match: f64,
    pub f1_score: f64,
    #[serde(flatten)]
    pub rouge: RougeScores,
    /// 0.0 when the question has no expected reasoning steps
    pub multi_hop_accuracy: f64,
    /// 0.0 when the prediction reports no sources
    pub attribution_accuracy: f64,
}

/// Mean scores over a set of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub exact_match: f64,
    pub f1_score: f64,
    pub rouge_1: f64,
    pub rouge_2: f64,
    pub rouge_l: f64,
    /// Mean over results with a positive multi-hop score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_hop_accuracy: Option<f64>,
    /// Mean over results with a positive attribution score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_accuracy: Option<f64>,
}

impl MetricSummary {
    /// Named metric values in report order
    pub fn to_breakdown(&self) -> Vec<(&'static str, f64)> {
        let mut breakdown = vec![
            ("exact_match", self.exact_match),
            ("f1_score", self.f1_score),
            ("rouge_1", self.rouge_1),
            ("rouge_2", self.rouge_2),
            ("rouge_l", self.rouge_l),
        ];
        if let Some(v) = self.multi_hop_accuracy {
            breakdown.push(("multi_hop_accuracy", v));
        }
        if let Some(v) = self.attribution_accuracy {
            breakdown.push(("attribution_accuracy", v));
        }
        breakdown
    }
}

/// A zero score on the multi-hop and attribution axes is read as "not
/// applicable" and left out of their means. Genuine zero scores are
/// indistinguishable from inapplicable ones here.
pub fn counts_toward_mean(score: f64) -> bool {
    score > 0.0
}

/// Running sums for computing a [`MetricSummary`].
///
/// Accumulators merge associatively, so partial sums from independent
/// workers can be combined in any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricAccumulator {
    count: usize,
    exact_match: f64,
    f1_score: f64,
    rouge_1: f64,
    rouge_2: f64,
    rouge_l: f64,
    multi_hop: PositiveMean,
    attribution: PositiveMean,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PositiveMean {
    sum: f64,
    count: usize,
}

impl PositiveMean {
    fn add(&mut self, score: f64) {
        if counts_toward_mean(score) {
            self.sum += score;
            self.count += 1;
        }
    }

    fn merge(&mut self, other: PositiveMean) {
        self.sum += other.sum;
        self.count += other.count;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl MetricAccumulator {
    /// Add one result
    pub fn add(&mut self, result: &QaResult) {
        self.count += 1;
        self.exact_match += result.exact_match;
        self.f1_score += result.f1_score;
        self.rouge_1 += result.rouge.rouge_1;
        self.rouge_2 += result.rouge.rouge_2;
        self.rouge_l += result.rouge.rouge_l;
        self.multi_hop.add(result.multi_hop_accuracy);
        self.attribution.add(result.attribution_accuracy);
    }

    /// Combine with another accumulator
    pub fn merge(mut self, other: MetricAccumulator) -> Self {
        self.count += other.count;
        self.exact_match += other.exact_match;
        self.f1_score += other.f1_score;
        self.rouge_1 += other.rouge_1;
        self.rouge_2 += other.rouge_2;
        self.rouge_l += other.rouge_l;
        self.multi_hop.merge(other.multi_hop);
        self.attribution.merge(other.attribution);
        self
    }

    /// Number of results added
    pub fn count(&self) -> usize {
        self.count
    }

    /// Means of every dimension, or `None` if nothing was added
    pub fn summary(&self) -> Option<MetricSummary> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;

        Some(MetricSummary {
            exact_match: self.exact_match / n,
            f1_score: self.f1_score / n,
            rouge_1: self.rouge_1 / n,
            rouge_2: self.rouge_2 / n,
            rouge_l: self.rouge_l / n,
            multi_hop_accuracy: self.multi_hop.mean(),
            attribution_accuracy: self.attribution.mean(),
        })
    }
}

impl<'a> FromIterator<&'a QaResult> for MetricAccumulator {
    fn from_iter<I: IntoIterator<Item = &'a QaResult>>(iter: I) -> Self {
        let mut acc = Self::default();
        for result in iter {
            acc.add(result);
        }
        acc
    }
}
