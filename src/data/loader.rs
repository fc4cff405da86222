use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use base64::prelude::*;
use csv::StringRecord;

use super::model::{ColumnSet, Dataset, Row};
use super::normalize::{normalize_number, normalize_timestamp};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an upload was rejected. Unparseable cells are not errors; they become
/// missing values.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The payload cannot be tokenized into CSV rows.
    #[error("malformed CSV at line {line}: {message}")]
    Format { line: u64, message: String },
    /// The payload bytes are not valid in the declared encoding.
    #[error("payload is not valid {0}")]
    Encoding(&'static str),
    /// No header row.
    #[error("file is empty")]
    EmptyFile,
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        LoadError::Format {
            line,
            message: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RawUpload – bytes as handed over by the upload widget
// ---------------------------------------------------------------------------

/// How the bytes of a [`RawUpload`] are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadEncoding {
    /// Raw UTF-8 CSV text.
    Utf8,
    /// Browser-style `data:text/csv;base64,<payload>`; the `data:` prefix is
    /// optional.
    Base64DataUrl,
}

/// An uploaded file, consumed once by [`parse_upload`].
#[derive(Debug, Clone)]
pub struct RawUpload {
    /// Display name, if the transport knows one.
    pub name: Option<String>,
    pub bytes: Vec<u8>,
    pub encoding: UploadEncoding,
}

impl RawUpload {
    pub fn utf8(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        RawUpload {
            name: Some(name.into()),
            bytes: bytes.into(),
            encoding: UploadEncoding::Utf8,
        }
    }

    /// Identity of the payload; equal uploads parse to equal datasets.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.encoding.hash(&mut hasher);
        self.bytes.hash(&mut hasher);
        hasher.finish()
    }

    /// Decode into CSV text, stripping a UTF-8 BOM.
    pub fn decode(&self) -> Result<String, LoadError> {
        let bytes = match self.encoding {
            UploadEncoding::Utf8 => self.bytes.clone(),
            UploadEncoding::Base64DataUrl => {
                let text =
                    std::str::from_utf8(&self.bytes).map_err(|_| LoadError::Encoding("base64"))?;
                let payload = match text.strip_prefix("data:") {
                    Some(rest) => rest.split_once(',').map(|(_, p)| p).unwrap_or(""),
                    None => text,
                };
                BASE64_STANDARD
                    .decode(payload.trim())
                    .map_err(|_| LoadError::Encoding("base64"))?
            }
        };
        let text = String::from_utf8(bytes).map_err(|_| LoadError::Encoding("UTF-8"))?;
        Ok(match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Decode and parse an upload.
pub fn parse_upload(upload: &RawUpload) -> Result<Dataset, LoadError> {
    let text = upload.decode()?;
    parse_csv(&text)
}

/// Parse raw CSV bytes (UTF-8).
pub fn parse(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let text = std::str::from_utf8(bytes).map_err(|_| LoadError::Encoding("UTF-8"))?;
    parse_csv(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// CSV layout: header row, first column timestamps (`HH:MM:SS,ffffff`),
/// remaining columns numeric with `,` or `.` decimals.
///
/// Rows are kept even when their timestamp or cells do not parse; those
/// cells are `None`. Short rows are padded with `None`, long rows are a
/// format error.
pub fn parse_csv(text: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(LoadError::EmptyFile),
    };
    let mut names = column_names(&header);
    if names.is_empty() {
        return Err(LoadError::EmptyFile);
    }
    let time_column = names.remove(0);
    let width = header.len();

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        if record.len() > width {
            return Err(LoadError::Format {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                message: format!("expected {width} fields, found {}", record.len()),
            });
        }

        let raw_time = record.get(0).unwrap_or("");
        let timestamp = normalize_timestamp(raw_time);
        if timestamp.is_none() {
            log::debug!("row {}: unparseable timestamp {raw_time:?}", rows.len());
        }

        let values = (1..width)
            .map(|i| record.get(i).and_then(normalize_number))
            .collect();

        rows.push(Row { timestamp, values });
    }

    Ok(Dataset {
        time_column,
        columns: ColumnSet::new(names),
        rows,
    })
}

/// Trimmed header names; blanks become `Unnamed: <i>` and repeats get a
/// `.1`, `.2`, … suffix so every name is unique.
fn column_names(header: &StringRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for (i, cell) in header.iter().enumerate() {
        let cell = cell.trim();
        let base = if cell.is_empty() {
            format!("Unnamed: {i}")
        } else {
            cell.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 0;
        while names.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        names.push(name);
    }
    names
}
