use thiserror::Error;

/// Errors for invalid run configuration (bad template names, bad flag
/// combinations). These are always surfaced to the caller, never recovered.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Template name is not one of the supported set.
    #[error("unknown template '{name}' (choose from: mistral, llama, generic, indonesian)")]
    UnknownTemplate { name: String },

    /// Record format name is not one of the supported set.
    #[error("unknown format '{name}' (choose from: json, jsonl, csv)")]
    UnknownFormat { name: String },

    /// `--load-in-4bit` and `--load-in-8bit` were both requested.
    #[error("conflicting quantization flags: pick one of --load-in-4bit / --load-in-8bit")]
    ConflictingQuantization,

    /// An environment override could not be parsed.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidEnvValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}
