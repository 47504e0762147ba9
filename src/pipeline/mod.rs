//! The three runnable operations behind the CLI: preprocess, generate,
//! evaluate.
//!
//! Each operation is a plain function over explicit options so that library
//! callers and tests drive them the same way the binary does. The stages
//! share nothing mutable: every step consumes its input and produces a new
//! value.

pub mod error;

pub use error::PipelineError;

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{info, warn};

use crate::cleaning::{CleanOptions, preprocess_review};
use crate::dataset::{
    Record, RecordFormat, collect_field, load_records, load_records_as, save_records,
    save_records_as,
};
use crate::evaluation::{AggregateReport, evaluate_predictions};
use crate::model::{GenerationParams, Summarizer};
use crate::prompt::{PromptOptions, PromptTemplate, create_summarization_prompt};

/// Options for [`run_preprocess`].
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Explicit format; `None` auto-detects from the file extensions.
    pub format: Option<RecordFormat>,
    pub clean_options: CleanOptions,
}

/// Options for [`run_generate`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Record field holding the review text.
    pub review_field: String,
    /// Label recorded on every output record (the model name or path).
    pub model_label: String,
    pub template: PromptTemplate,
    pub prompt_options: PromptOptions,
    pub params: GenerationParams,
}

/// Per-run counters reported by [`run_generate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    /// Records that received a `generated_summary`.
    pub generated: usize,
    /// Records that received a `generation_error` marker.
    pub failed: usize,
    /// Records skipped for an empty or missing review field.
    pub skipped: usize,
}

/// Options for [`run_evaluate`].
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    pub predictions: PathBuf,
    pub references: PathBuf,
    pub pred_field: String,
    pub ref_field: String,
    /// Optional path for the JSON report.
    pub output: Option<PathBuf>,
}

/// Cleans the `review` (and, when present, `summary`) field of every record.
///
/// Originals are preserved under `review_original` / `summary_original`.
/// Returns the number of records written.
pub fn run_preprocess(options: &PreprocessOptions) -> Result<usize, PipelineError> {
    info!(input = %options.input.display(), "Loading reviews");
    let mut records = match options.format {
        Some(format) => load_records_as(&options.input, format)?,
        None => load_records(&options.input)?,
    };
    info!(count = records.len(), "Loaded reviews");

    for record in &mut records {
        clean_field(record, "review", &options.clean_options);
        clean_field(record, "summary", &options.clean_options);
    }

    info!(output = %options.output.display(), "Saving processed reviews");
    match options.format {
        Some(format) => save_records_as(&records, &options.output, format)?,
        None => save_records(&records, &options.output)?,
    }

    Ok(records.len())
}

/// Generates a summary for every record with a non-empty review field.
///
/// Engine failures are per item: the failing record is written with a
/// `generation_error` marker and the batch continues. Records with an empty
/// or missing review are skipped with a warning, not prompted.
pub fn run_generate(
    options: &GenerateOptions,
    summarizer: &Summarizer,
) -> Result<GenerateStats, PipelineError> {
    info!(input = %options.input.display(), "Loading reviews");
    let records = load_records(&options.input)?;
    info!(count = records.len(), "Loaded reviews");

    let mut stats = GenerateStats::default();
    let mut results: Vec<Record> = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let review_text = record
            .get(&options.review_field)
            .and_then(Value::as_str)
            .unwrap_or("");

        if review_text.is_empty() {
            warn!(index, "Skipping record with empty review");
            stats.skipped += 1;
            continue;
        }

        let prompt =
            create_summarization_prompt(&[review_text], options.template, &options.prompt_options);

        let mut result = record;
        match summarizer.generate(&prompt, &options.params) {
            Ok(summary) => {
                result.insert("generated_summary".to_string(), Value::String(summary));
                stats.generated += 1;
            }
            Err(e) => {
                warn!(index, error = %e, "Generation failed for record");
                result.insert("generation_error".to_string(), Value::String(e.to_string()));
                stats.failed += 1;
            }
        }
        result.insert(
            "model".to_string(),
            Value::String(options.model_label.clone()),
        );
        result.insert(
            "model_type".to_string(),
            Value::String(options.template.to_string()),
        );
        results.push(result);
    }

    info!(
        output = %options.output.display(),
        generated = stats.generated,
        failed = stats.failed,
        skipped = stats.skipped,
        "Saving generation results"
    );
    save_records(&results, &options.output)?;

    Ok(stats)
}

/// Scores predictions against references with ROUGE-1/2/L.
///
/// Pairs are matched positionally; a count mismatch or empty input is an
/// error, never a silent truncation.
pub fn run_evaluate(options: &EvaluateOptions) -> Result<AggregateReport, PipelineError> {
    info!(path = %options.predictions.display(), "Loading predictions");
    let pred_records = load_records(&options.predictions)?;

    info!(path = %options.references.display(), "Loading references");
    let ref_records = load_records(&options.references)?;

    let predictions = collect_field(&pred_records, &options.pred_field)?;
    let references = collect_field(&ref_records, &options.ref_field)?;

    info!(count = predictions.len(), "Evaluating predictions");
    let report = evaluate_predictions(&predictions, &references)?;

    if let Some(output) = &options.output {
        info!(path = %output.display(), "Saving evaluation report");
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, json + "\n")?;
    }

    Ok(report)
}

fn clean_field(record: &mut Record, field: &str, options: &CleanOptions) {
    let Some(original) = record.get(field).and_then(Value::as_str).map(str::to_string) else {
        return;
    };

    let cleaned = preprocess_review(&original, options);
    record.insert(format!("{field}_original"), Value::String(original));
    record.insert(field.to_string(), Value::String(cleaned));
}
