//! Results reporting

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::{AggregatedMetrics, EvaluationRun, QaResult};

/// JSON report export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub evaluated_at: String,
    pub aggregated_metrics: AggregatedMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_results: Option<Vec<QaResult>>,
}

impl JsonReport {
    /// Create from an evaluation run
    pub fn from_run(run: &EvaluationRun, include_details: bool) -> Self {
        Self {
            evaluated_at: chrono::Utc::now().to_rfc3339(),
            aggregated_metrics: run.aggregated.clone(),
            detailed_results: include_details.then(|| run.results.clone()),
        }
    }

    /// Write to JSON file
    pub fn write_to_file(&self, path: impl AsRef<Path>, pretty: bool) -> io::Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

/// Print the console report to stdout
pub fn print_console_report(aggregated: &AggregatedMetrics) {
    let stdout = io::stdout();
    if let Err(e) = write_console_report(&mut stdout.lock(), aggregated) {
        tracing::warn!("Failed to write report: {}", e);
    }
}

/// Write the human-readable report
pub fn write_console_report<W: Write>(out: &mut W, aggregated: &AggregatedMetrics) -> io::Result<()> {
    writeln!(out, "\n=== End-to-End RAG QA Evaluation Results ===\n")?;
    writeln!(out, "Total Questions Evaluated: {}", aggregated.total_questions)?;

    let overall = match &aggregated.overall_metrics {
        Some(overall) => overall,
        None => {
            writeln!(out, "\nNo questions had a matching prediction.")?;
            return Ok(());
        }
    };

    writeln!(out, "\nOverall Metrics:")?;
    for (metric, value) in overall.to_breakdown() {
        writeln!(out, "  {}: {:.3}", metric, value)?;
    }

    writeln!(out, "\nMetrics by Question Type:")?;
    for (question_type, category) in &aggregated.metrics_by_type {
        writeln!(out, "\n  {} (n={}):", question_type, category.count)?;
        for (metric, value) in category.metrics.to_breakdown() {
            writeln!(out, "    {}: {:.3}", metric, value)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EvaluationEngine;
    use crate::dataset::{GroundTruth, Prediction, Predictions, QaPair};

    fn run() -> EvaluationRun {
        let gt = GroundTruth::new(vec![
            QaPair::new("q1", "factoid", "Paris"),
            QaPair::new("q2", "comparison", "Rome is older"),
        ]);
        let mut predictions = Predictions::new();
        predictions.insert("q1".to_string(), Prediction::new("paris"));
        predictions.insert("q2".to_string(), Prediction::new("Rome"));
        EvaluationEngine::new().evaluate(&gt, &predictions)
    }

    #[test]
    fn test_console_report() {
        let mut buf = Vec::new();
        write_console_report(&mut buf, &run().aggregated).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Total Questions Evaluated: 2"));
        assert!(text.contains("  exact_match: 0.500"));
        assert!(text.contains("  factoid (n=1):"));
        assert!(text.contains("    f1_score: 1.000"));
        assert!(!text.contains("multi_hop_accuracy"));
    }

    #[test]
    fn test_console_report_without_data() {
        let run = EvaluationEngine::new().evaluate(&GroundTruth::default(), &Predictions::new());
        let mut buf = Vec::new();
        write_console_report(&mut buf, &run.aggregated).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Total Questions Evaluated: 0"));
        assert!(text.contains("No questions had a matching prediction."));
    }

    #[test]
    fn test_json_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        JsonReport::from_run(&run(), true).write_to_file(&path, true).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["aggregated_metrics"]["total_questions"], 2);
        assert_eq!(value["aggregated_metrics"]["metrics_by_type"]["factoid"]["count"], 1);
        assert_eq!(value["detailed_results"][0]["qa_id"], "q1");
        assert_eq!(value["detailed_results"][0]["rouge_l"], 1.0);
    }

    #[test]
    fn test_json_report_without_details() {
        let report = JsonReport::from_run(&run(), false);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("detailed_results").is_none());

        let parsed: JsonReport = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.aggregated_metrics, report.aggregated_metrics);
    }
}
