//! Exact match and token-level F1

use std::collections::HashMap;

use super::normalize::{normalize_answer, normalized_tokens};

/// Compute exact match score.
///
/// Returns 1.0 when the normalized prediction equals the normalized
/// reference or any normalized alternative, 0.0 otherwise.
pub fn exact_match(prediction: &str, ground_truth: &str, alternatives: &[String]) -> f64 {
    let pred_norm = normalize_answer(prediction);

    if pred_norm == normalize_answer(ground_truth) {
        return 1.0;
    }

    if alternatives
        .iter()
        .any(|alt| pred_norm == normalize_answer(alt))
    {
        1.0
    } else {
        0.0
    }
}

/// Compute token-level F1 between prediction and reference
pub fn f1_score(prediction: &str, ground_truth: &str) -> f64 {
    let pred_tokens = normalized_tokens(prediction);
    let truth_tokens = normalized_tokens(ground_truth);

    // No credit when either side is empty, even if both are
    if pred_tokens.is_empty() || truth_tokens.is_empty() {
        return 0.0;
    }

    let num_common = common_token_count(&pred_tokens, &truth_tokens);
    if num_common == 0 {
        return 0.0;
    }

    let precision = num_common as f64 / pred_tokens.len() as f64;
    let recall = num_common as f64 / truth_tokens.len() as f64;

    harmonic_mean(precision, recall)
}

/// Size of the multiset intersection of two token sequences
fn common_token_count(a: &[String], b: &[String]) -> usize {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in a {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut common = 0;
    for token in b {
        if let Some(remaining) = counts.get_mut(token.as_str()) {
            if *remaining > 0 {
                *remaining -= 1;
                common += 1;
            }
        }
    }
    common
}

/// Harmonic mean of precision and recall, 0.0 when both are zero
pub(crate) fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        assert_eq!(exact_match("Paris", "paris", &[]), 1.0);
        assert_eq!(f1_score("Paris", "paris"), 1.0);
    }

    #[test]
    fn test_exact_match_alternatives() {
        let alternatives = vec!["NYC".to_string(), "New York City".to_string()];
        assert_eq!(exact_match("new york city.", "New York", &alternatives), 1.0);
        assert_eq!(exact_match("Boston", "New York", &alternatives), 0.0);
    }

    #[test]
    fn test_exact_match_reflexive() {
        for s in ["a", "Some Answer!", "42 apples"] {
            assert_eq!(exact_match(s, s, &[]), 1.0);
        }
    }

    #[test]
    fn test_f1_partial_overlap() {
        let prediction = "The capital is Paris, France";
        assert_eq!(exact_match(prediction, "Paris", &[]), 0.0);
        assert!(approx(f1_score(prediction, "Paris"), 1.0 / 3.0));
    }

    #[test]
    fn test_f1_empty_inputs() {
        assert_eq!(f1_score("", ""), 0.0);
        assert_eq!(f1_score("paris", ""), 0.0);
        assert_eq!(f1_score("...", "paris"), 0.0);
    }

    #[test]
    fn test_f1_no_overlap() {
        assert_eq!(f1_score("london", "paris"), 0.0);
    }

    #[test]
    fn test_f1_counts_multiplicity() {
        // common = min(3, 1) for "a" -> 1; precision 1/3, recall 1/1
        assert!(approx(f1_score("a a a", "a"), 0.5));
        // identical multisets in different order
        assert_eq!(f1_score("b a a", "a b a"), 1.0);
    }

    #[test]
    fn test_harmonic_mean_zero() {
        assert_eq!(harmonic_mean(0.0, 0.0), 0.0);
        assert!(approx(harmonic_mean(0.5, 0.5), 0.5));
    }
}
