use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving review records.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Input file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// I/O failure while reading or writing.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Format could not be inferred from the file extension.
    #[error("cannot auto-detect format for '{}' (expected .json, .jsonl, or .csv)", path.display())]
    UnknownExtension { path: PathBuf },

    /// File content is not valid JSON.
    #[error("malformed JSON in {}: {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A JSONL line is not a valid JSON object.
    #[error("malformed JSON at {}:{line}: {source}", path.display())]
    MalformedJsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON array element is not an object.
    #[error("record {index} in {} is not a JSON object", path.display())]
    NotAnObject { path: PathBuf, index: usize },

    /// CSV parse or write failure (bad header, inconsistent row width).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required field is absent from a record.
    #[error("record {index} is missing required field '{field}'")]
    MissingField { field: String, index: usize },

    /// A required field is present but not a string.
    #[error("field '{field}' in record {index} is not a string")]
    NotAString { field: String, index: usize },
}
