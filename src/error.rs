// ABOUTME: Defines all error types for office-agent using thiserror.
// ABOUTME: Each concern has its own error enum, unified under OfficeError.

use std::path::PathBuf;

/// Top-level error type for office-agent.
#[derive(Debug, thiserror::Error)]
pub enum OfficeError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Governor error: {0}")]
    Governor(#[from] GovernorError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Shell error: {0}")]
    Shell(#[from] ShellError),
}

/// Errors from the call-rate governor itself.
///
/// Errors raised by a guarded operation never appear here; they are
/// returned to the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GovernorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("operation cancelled")]
    Cancelled,
}

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

/// Errors from spreadsheet and document files.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet read error: {0}")]
    XlsxRead(#[from] calamine::Error),

    #[error("Spreadsheet write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Malformed document {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Invalid cell ({row}, {col}): rows and columns start at 1")]
    InvalidCell { row: u32, col: u32 },
}

/// Errors from shaping model output into tables.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Response is not valid table JSON ({source}); response began with: {preview}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        preview: String,
    },
}

/// Errors from the shell helpers.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("Failed to open {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
