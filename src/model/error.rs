use std::path::PathBuf;
use thiserror::Error;

/// Errors from the model interface and the underlying inference engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Model (or tokenizer) file does not exist.
    #[error("model not found at path: {}", path.display())]
    ModelNotFound { path: PathBuf },

    /// Engine failed while loading weights.
    #[error("failed to load model: {reason}")]
    LoadFailed { reason: String },

    /// Tokenizer failed to load or encode.
    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    /// Engine failed during generation.
    #[error("generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// Engine ran out of device memory.
    #[error("engine out of memory: {reason}")]
    OutOfMemory { reason: String },

    /// Generation was requested but no engine is loaded (never loaded, or
    /// explicitly unloaded).
    #[error("model is unavailable: no engine loaded")]
    Unavailable,

    /// Model configuration is invalid.
    #[error("invalid model configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EngineError {
    fn from(err: candle_core::Error) -> Self {
        let reason = err.to_string();
        if reason.to_lowercase().contains("out of memory") {
            EngineError::OutOfMemory { reason }
        } else {
            EngineError::GenerationFailed { reason }
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::LoadFailed {
            reason: err.to_string(),
        }
    }
}
