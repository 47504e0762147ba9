use thiserror::Error;

use crate::config::ConfigError;
use crate::dataset::FormatError;
use crate::evaluation::EvalError;
use crate::model::EngineError;

/// Errors from the end-to-end preprocess/generate/evaluate operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data error: {0}")]
    Format(#[from] FormatError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
