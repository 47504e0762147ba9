//! Aggregation of per-example ROUGE scores into a dataset-level report.

use serde::Serialize;

use super::error::EvalError;
use super::rouge::{RougeScore, RougeScores, calculate_rouge};

/// Mean precision/recall/f-measure for one ROUGE metric over a dataset,
/// plus the standard deviation of the f-measure.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricSummary {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
    pub fmeasure_std: f64,
}

/// Dataset-level evaluation report.
///
/// `per_example` preserves the input pair order one-to-one, so the i-th score
/// always belongs to the i-th prediction/reference pair.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub count: usize,
    pub rouge1: MetricSummary,
    pub rouge2: MetricSummary,
    pub rouge_l: MetricSummary,
    pub per_example: Vec<RougeScores>,
}

impl AggregateReport {
    /// Renders the report as the human-readable block the CLI prints.
    pub fn format(&self) -> String {
        let mut lines = Vec::new();
        for (name, summary) in [
            ("ROUGE1", &self.rouge1),
            ("ROUGE2", &self.rouge2),
            ("ROUGEL", &self.rouge_l),
        ] {
            lines.push(format!("{name}:"));
            lines.push(format!("  precision: {:.4}", summary.precision));
            lines.push(format!("  recall: {:.4}", summary.recall));
            lines.push(format!("  fmeasure: {:.4}", summary.fmeasure));
            lines.push(format!("  std: {:.4}", summary.fmeasure_std));
        }
        lines.join("\n")
    }
}

/// Scores every prediction/reference pair and aggregates the results.
///
/// Pairs are matched positionally; a count mismatch is an error
/// ([`EvalError::LengthMismatch`]), as is an empty input
/// ([`EvalError::EmptyInput`]), since an empty dataset has no defined mean.
pub fn evaluate_predictions(
    predictions: &[String],
    references: &[String],
) -> Result<AggregateReport, EvalError> {
    if predictions.len() != references.len() {
        return Err(EvalError::LengthMismatch {
            predictions: predictions.len(),
            references: references.len(),
        });
    }
    if predictions.is_empty() {
        return Err(EvalError::EmptyInput);
    }

    let per_example: Vec<RougeScores> = predictions
        .iter()
        .zip(references)
        .map(|(prediction, reference)| calculate_rouge(prediction, reference))
        .collect();

    Ok(AggregateReport {
        count: per_example.len(),
        rouge1: summarize(&per_example, |s| s.rouge1),
        rouge2: summarize(&per_example, |s| s.rouge2),
        rouge_l: summarize(&per_example, |s| s.rouge_l),
        per_example,
    })
}

fn summarize(scores: &[RougeScores], metric: impl Fn(&RougeScores) -> RougeScore) -> MetricSummary {
    let count = scores.len() as f64;

    let mut precision_sum = 0.0;
    let mut recall_sum = 0.0;
    let mut fmeasure_sum = 0.0;
    for score in scores {
        let score = metric(score);
        precision_sum += score.precision;
        recall_sum += score.recall;
        fmeasure_sum += score.fmeasure;
    }

    let fmeasure_mean = fmeasure_sum / count;
    let variance = scores
        .iter()
        .map(|score| {
            let diff = metric(score).fmeasure - fmeasure_mean;
            diff * diff
        })
        .sum::<f64>()
        / count;

    MetricSummary {
        precision: precision_sum / count,
        recall: recall_sum / count,
        fmeasure: fmeasure_mean,
        fmeasure_std: variance.sqrt(),
    }
}
