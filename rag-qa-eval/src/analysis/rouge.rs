//! ROUGE-family overlap scores
//!
//! These are recall-oriented: every score is measured against the reference.
//! N-gram overlap treats both sides as sets, so repeated n-grams count once.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::normalize::normalized_tokens;

/// ROUGE-1, ROUGE-2 and ROUGE-L for one prediction
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScores {
    pub rouge_1: f64,
    pub rouge_2: f64,
    pub rouge_l: f64,
}

/// Compute all three ROUGE scores for a prediction against a reference
pub fn rouge_scores(prediction: &str, ground_truth: &str) -> RougeScores {
    let pred_tokens = normalized_tokens(prediction);
    let truth_tokens = normalized_tokens(ground_truth);

    RougeScores {
        rouge_1: ngram_overlap(&pred_tokens, &truth_tokens, 1),
        rouge_2: ngram_overlap(&pred_tokens, &truth_tokens, 2),
        rouge_l: lcs_overlap(&pred_tokens, &truth_tokens),
    }
}

/// N-gram set overlap of a prediction against a reference
pub fn rouge_n(prediction: &str, ground_truth: &str, n: usize) -> f64 {
    ngram_overlap(&normalized_tokens(prediction), &normalized_tokens(ground_truth), n)
}

/// LCS-based overlap of a prediction against a reference
pub fn rouge_l(prediction: &str, ground_truth: &str) -> f64 {
    lcs_overlap(&normalized_tokens(prediction), &normalized_tokens(ground_truth))
}

/// Distinct contiguous n-grams of a token sequence
fn ngram_set(tokens: &[String], n: usize) -> HashSet<&[String]> {
    if n == 0 {
        return HashSet::new();
    }
    tokens.windows(n).collect()
}

fn ngram_overlap(pred_tokens: &[String], truth_tokens: &[String], n: usize) -> f64 {
    let truth_ngrams = ngram_set(truth_tokens, n);
    if truth_ngrams.is_empty() {
        return 0.0;
    }

    let pred_ngrams = ngram_set(pred_tokens, n);
    let overlap = pred_ngrams.intersection(&truth_ngrams).count();

    overlap as f64 / truth_ngrams.len() as f64
}

fn lcs_overlap(pred_tokens: &[String], truth_tokens: &[String]) -> f64 {
    if truth_tokens.is_empty() {
        return 0.0;
    }
    lcs_length(pred_tokens, truth_tokens) as f64 / truth_tokens.len() as f64
}

/// Length of the longest common subsequence of two token sequences.
///
/// `dp[i][j]` holds the LCS length of the first `i` tokens of `a` and the
/// first `j` tokens of `b`.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (m, n) = (a.len(), b.len());
    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    dp[m][n]
}
