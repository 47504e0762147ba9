//! Ringkas library crate (used by the CLI binary and integration tests).
//!
//! Toolkit for summarizing Indonesian e-commerce product reviews with
//! instruction-tuned language models: text cleaning, dataset loading, prompt
//! construction, quantized inference, and ROUGE evaluation.
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Cleaning
//! - [`clean_text`], [`normalize_text`], [`preprocess_review`] - Review text
//!   normalization
//! - [`CleanOptions`] - Cleaning behavior toggles
//!
//! ## Datasets
//! - [`load_records`], [`save_records`] - JSON / JSON Lines / CSV record I/O
//! - [`Record`], [`RecordFormat`], [`FormatError`]
//!
//! ## Prompts
//! - [`PromptTemplate`] - Mistral / Llama / generic / Indonesian chat formats
//! - [`create_summarization_prompt`], [`create_multi_review_prompt`],
//!   [`create_aspect_based_prompt`]
//!
//! ## Model
//! - [`Summarizer`], [`ModelConfig`], [`GenerationParams`] - Quantized GGUF
//!   inference (with a deterministic stub for tests)
//! - [`Quantization`], [`EngineError`]
//!
//! ## Evaluation
//! - [`calculate_rouge`], [`evaluate_predictions`] - ROUGE-1/2/L scoring
//! - [`RougeScore`], [`RougeScores`], [`AggregateReport`], [`EvalError`]
//!
//! ## Pipeline
//! - [`run_preprocess`], [`run_generate`], [`run_evaluate`] - The operations
//!   behind the CLI subcommands
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - Environment-driven defaults

pub mod cleaning;
pub mod config;
pub mod dataset;
pub mod evaluation;
pub mod model;
pub mod pipeline;
pub mod prompt;

pub use cleaning::{CleanOptions, clean_text, normalize_text, preprocess_review};
pub use config::{Config, ConfigError};
pub use dataset::{
    FormatError, Record, RecordFormat, collect_field, load_records, load_records_as, save_records,
    save_records_as, string_field,
};
pub use evaluation::{
    AggregateReport, EvalError, MetricSummary, RougeScore, RougeScores, calculate_rouge,
    evaluate_predictions,
};
pub use model::{
    DEFAULT_MAX_SEQ_LEN, DEFAULT_SEED, EngineError, GenerationParams, ModelConfig, Quantization,
    Summarizer,
};
pub use pipeline::{
    EvaluateOptions, GenerateOptions, GenerateStats, PipelineError, PreprocessOptions,
    run_evaluate, run_generate, run_preprocess,
};
pub use prompt::{
    PromptOptions, PromptTemplate, create_aspect_based_prompt, create_multi_review_prompt,
    create_summarization_prompt,
};
