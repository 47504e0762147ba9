//! ROUGE-1/2/L scoring for a single prediction/reference pair.

use std::collections::HashMap;

use serde::Serialize;

/// One ROUGE metric: precision, recall, and their harmonic mean.
///
/// All values are in `[0, 1]`. The f-measure is `0` when precision and recall
/// are both `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RougeScore {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

impl RougeScore {
    fn new(precision: f64, recall: f64) -> Self {
        Self {
            precision,
            recall,
            fmeasure: harmonic_mean(precision, recall),
        }
    }
}

/// ROUGE-1, ROUGE-2, and ROUGE-L for one prediction/reference pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RougeScores {
    pub rouge1: RougeScore,
    pub rouge2: RougeScore,
    pub rouge_l: RougeScore,
}

/// Scores `prediction` against `reference`.
///
/// Either side being empty (or containing no alphanumeric tokens) yields
/// all-zero scores rather than an error.
pub fn calculate_rouge(prediction: &str, reference: &str) -> RougeScores {
    let pred_tokens = tokenize(prediction);
    let ref_tokens = tokenize(reference);

    if pred_tokens.is_empty() || ref_tokens.is_empty() {
        return RougeScores::default();
    }

    RougeScores {
        rouge1: rouge_n(&pred_tokens, &ref_tokens, 1),
        rouge2: rouge_n(&pred_tokens, &ref_tokens, 2),
        rouge_l: rouge_l(&pred_tokens, &ref_tokens),
    }
}

/// Splits text into lowercase alphanumeric tokens.
///
/// This is the single tokenization rule for evaluation: predictions and
/// references must go through the same splitter or overlap counts are
/// meaningless.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// N-gram overlap score with clipped counts.
fn rouge_n(prediction: &[String], reference: &[String], n: usize) -> RougeScore {
    if prediction.len() < n || reference.len() < n {
        return RougeScore::default();
    }

    let mut ref_counts: HashMap<&[String], usize> = HashMap::new();
    for ngram in reference.windows(n) {
        *ref_counts.entry(ngram).or_default() += 1;
    }

    let mut overlap = 0usize;
    for ngram in prediction.windows(n) {
        if let Some(count) = ref_counts.get_mut(ngram)
            && *count > 0
        {
            *count -= 1;
            overlap += 1;
        }
    }

    let pred_total = prediction.len() - n + 1;
    let ref_total = reference.len() - n + 1;

    RougeScore::new(
        overlap as f64 / pred_total as f64,
        overlap as f64 / ref_total as f64,
    )
}

/// Longest-common-subsequence score.
fn rouge_l(prediction: &[String], reference: &[String]) -> RougeScore {
    let lcs = lcs_length(prediction, reference) as f64;

    RougeScore::new(
        lcs / prediction.len() as f64,
        lcs / reference.len() as f64,
    )
}

fn lcs_length(a: &[String], b: &[String]) -> usize {
    let (m, n) = (a.len(), b.len());
    if m == 0 || n == 0 {
        return 0;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 0..m {
        for j in 0..n {
            dp[i + 1][j + 1] = if a[i] == b[j] {
                dp[i][j] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }
    dp[m][n]
}

fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}
