//! Loading and saving review records in JSON, JSONL, and CSV.
//!
//! Records are loosely typed: marketplace exports carry arbitrary metadata
//! fields alongside the review text, so a record is a [`serde_json`] object
//! map (insertion order preserved). Required fields are extracted explicitly
//! via [`string_field`] / [`collect_field`]; a missing field is a
//! [`FormatError`], never a silent default.

pub mod error;


pub use error::FormatError;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::debug;

/// A single review record: an ordered set of named JSON values.
pub type Record = Map<String, Value>;

/// Supported on-disk record formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// A JSON array of objects (a lone object is treated as a one-record set).
    Json,
    /// One JSON object per line.
    Jsonl,
    /// CSV with a header row; every cell loads as a string.
    Csv,
}

impl RecordFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("jsonl") => Ok(Self::Jsonl),
            Some("csv") => Ok(Self::Csv),
            _ => Err(FormatError::UnknownExtension {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl FromStr for RecordFormat {
    type Err = crate::config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "jsonl" => Ok(Self::Jsonl),
            "csv" => Ok(Self::Csv),
            _ => Err(crate::config::ConfigError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Jsonl => write!(f, "jsonl"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Loads records from `path`, inferring the format from the extension.
pub fn load_records(path: &Path) -> Result<Vec<Record>, FormatError> {
    let format = RecordFormat::from_path(path)?;
    load_records_as(path, format)
}

/// Loads records from `path` in an explicit format.
pub fn load_records_as(path: &Path, format: RecordFormat) -> Result<Vec<Record>, FormatError> {
    if !path.exists() {
        return Err(FormatError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let records = match format {
        RecordFormat::Json => load_json(path)?,
        RecordFormat::Jsonl => load_jsonl(path)?,
        RecordFormat::Csv => load_csv(path)?,
    };

    debug!(path = %path.display(), %format, count = records.len(), "Loaded records");
    Ok(records)
}

/// Saves records to `path`, inferring the format from the extension.
///
/// Parent directories are created if missing.
pub fn save_records(records: &[Record], path: &Path) -> Result<(), FormatError> {
    let format = RecordFormat::from_path(path)?;
    save_records_as(records, path, format)
}

/// Saves records to `path` in an explicit format.
pub fn save_records_as(
    records: &[Record],
    path: &Path,
    format: RecordFormat,
) -> Result<(), FormatError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    match format {
        RecordFormat::Json => save_json(records, path)?,
        RecordFormat::Jsonl => save_jsonl(records, path)?,
        RecordFormat::Csv => save_csv(records, path)?,
    }

    debug!(path = %path.display(), %format, count = records.len(), "Saved records");
    Ok(())
}

/// Extracts a required string field from a record.
pub fn string_field<'a>(
    record: &'a Record,
    field: &str,
    index: usize,
) -> Result<&'a str, FormatError> {
    let value = record.get(field).ok_or_else(|| FormatError::MissingField {
        field: field.to_string(),
        index,
    })?;

    value.as_str().ok_or_else(|| FormatError::NotAString {
        field: field.to_string(),
        index,
    })
}

/// Extracts a required string field from every record, preserving order.
pub fn collect_field(records: &[Record], field: &str) -> Result<Vec<String>, FormatError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| string_field(record, field, index).map(str::to_string))
        .collect()
}

fn load_json(path: &Path) -> Result<Vec<Record>, FormatError> {
    let content = fs::read_to_string(path)?;
    let value: Value =
        serde_json::from_str(&content).map_err(|source| FormatError::MalformedJson {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        Value::Object(record) => Ok(vec![record]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                _ => Err(FormatError::NotAnObject {
                    path: path.to_path_buf(),
                    index,
                }),
            })
            .collect(),
        _ => Err(FormatError::NotAnObject {
            path: path.to_path_buf(),
            index: 0,
        }),
    }
}

fn load_jsonl(path: &Path) -> Result<Vec<Record>, FormatError> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: Record =
            serde_json::from_str(line).map_err(|source| FormatError::MalformedJsonLine {
                path: path.to_path_buf(),
                line: line_idx + 1,
                source,
            })?;
        records.push(record);
    }

    Ok(records)
}

fn load_csv(path: &Path) -> Result<Vec<Record>, FormatError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.insert(header.to_string(), Value::String(cell.to_string()));
        }
        records.push(record);
    }

    Ok(records)
}

fn save_json(records: &[Record], path: &Path) -> Result<(), FormatError> {
    let values: Vec<Value> = records.iter().cloned().map(Value::Object).collect();
    let json = serde_json::to_string_pretty(&values).map_err(|source| {
        FormatError::MalformedJson {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut file = BufWriter::new(fs::File::create(path)?);
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}

fn save_jsonl(records: &[Record], path: &Path) -> Result<(), FormatError> {
    let mut file = BufWriter::new(fs::File::create(path)?);

    for record in records {
        let line = serde_json::to_string(record).map_err(|source| FormatError::MalformedJson {
            path: path.to_path_buf(),
            source,
        })?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
    }

    file.flush()?;
    Ok(())
}

fn save_csv(records: &[Record], path: &Path) -> Result<(), FormatError> {
    let mut writer = csv::Writer::from_path(path)?;

    if records.is_empty() {
        writer.flush()?;
        return Ok(());
    }

    // Header row comes from the first record. Later records may omit fields
    // (written as empty cells); fields absent from the header are dropped.
    let headers: Vec<&String> = records[0].keys().collect();
    writer.write_record(&headers)?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|header| match record.get(header.as_str()) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
