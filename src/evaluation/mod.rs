//! ROUGE evaluation of generated summaries.
//!
//! [`calculate_rouge`] scores a single prediction/reference pair on ROUGE-1,
//! ROUGE-2, and ROUGE-L; [`evaluate_predictions`] aggregates a matched set of
//! pairs into per-metric mean/std statistics while keeping the ordered
//! per-example scores for inspection.
//!
//! Both sides of every comparison go through the same tokenizer — see
//! [`rouge::tokenize`]. Scoring the prediction with one splitting rule and the
//! reference with another silently shifts every number, so the tokenizer is
//! deliberately the only entry point to token space.

pub mod error;
pub mod report;
pub mod rouge;

#[cfg(test)]
mod tests;

pub use error::EvalError;
pub use report::{AggregateReport, MetricSummary, evaluate_predictions};
pub use rouge::{RougeScore, RougeScores, calculate_rouge};
