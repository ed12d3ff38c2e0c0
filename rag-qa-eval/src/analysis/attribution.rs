//! Answer attribution evaluation

use std::collections::HashSet;

use indexmap::IndexMap;

use super::lexical::harmonic_mean;

/// Expected evidence: source type -> source identifiers
pub type Evidence = IndexMap<String, Vec<String>>;

/// Score predicted source citations against the expected evidence.
///
/// - no predicted sources at all: 0.0
/// - no expected sources: 1.0 if nothing was cited, 0.0 otherwise
/// - otherwise the F1 of the predicted source set against the expected set
pub fn evaluate_answer_attribution(evidence: &Evidence, predicted_sources: Option<&[String]>) -> f64 {
    let predicted_sources = match predicted_sources {
        Some(sources) => sources,
        None => return 0.0,
    };

    let expected: HashSet<&str> = evidence
        .values()
        .flatten()
        .map(String::as_str)
        .collect();

    if expected.is_empty() {
        return if predicted_sources.is_empty() { 1.0 } else { 0.0 };
    }

    let predicted: HashSet<&str> = predicted_sources.iter().map(String::as_str).collect();
    if predicted.is_empty() {
        return 0.0;
    }

    let correct = predicted.intersection(&expected).count();
    let precision = correct as f64 / predicted.len() as f64;
    let recall = correct as f64 / expected.len() as f64;

    harmonic_mean(precision, recall)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(entries: &[(&str, &[&str])]) -> Evidence {
        entries
            .iter()
            .map(|(kind, ids)| (kind.to_string(), ids.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    fn sources(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_half_precision_half_recall() {
        let expected = evidence(&[("doc", &["s1", "s2"])]);
        let predicted = sources(&["s1", "s3"]);
        assert_eq!(evaluate_answer_attribution(&expected, Some(predicted.as_slice())), 0.5);
    }

    #[test]
    fn test_flattens_source_types() {
        let expected = evidence(&[("doc", &["s1"]), ("table", &["t1"])]);
        let predicted = sources(&["t1", "s1"]);
        assert_eq!(evaluate_answer_attribution(&expected, Some(predicted.as_slice())), 1.0);
    }

    #[test]
    fn test_absent_predicted_sources() {
        assert_eq!(evaluate_answer_attribution(&Evidence::new(), None), 0.0);
        let expected = evidence(&[("doc", &["s1"])]);
        assert_eq!(evaluate_answer_attribution(&expected, None), 0.0);
    }

    #[test]
    fn test_no_expected_sources() {
        let empty = Evidence::new();
        assert_eq!(evaluate_answer_attribution(&empty, Some(&[] as &[String])), 1.0);
        assert_eq!(evaluate_answer_attribution(&empty, Some(sources(&["s1"]).as_slice())), 0.0);

        let empty_lists = evidence(&[("doc", &[])]);
        assert_eq!(evaluate_answer_attribution(&empty_lists, Some(&[] as &[String])), 1.0);
    }

    #[test]
    fn test_empty_citation_with_expected_sources() {
        let expected = evidence(&[("doc", &["s1"])]);
        assert_eq!(evaluate_answer_attribution(&expected, Some(&[] as &[String])), 0.0);
    }

    #[test]
    fn test_duplicate_citations_count_once() {
        let expected = evidence(&[("doc", &["s1", "s2"])]);
        let predicted = sources(&["s1", "s1", "s2"]);
        assert_eq!(evaluate_answer_attribution(&expected, Some(predicted.as_slice())), 1.0);
    }

    #[test]
    fn test_no_correct_citation() {
        let expected = evidence(&[("doc", &["s1"])]);
        assert_eq!(evaluate_answer_attribution(&expected, Some(sources(&["x"]).as_slice())), 0.0);
    }
}
