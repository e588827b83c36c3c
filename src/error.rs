use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DteError {
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Input path not found: {0}")]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse '{name}' as JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{name}' is missing required field '{field}'")]
    MissingField { name: String, field: String },

    #[error("'{name}' has an invalid value for '{field}': {reason}")]
    InvalidField {
        name: String,
        field: String,
        reason: String,
    },

    #[error("Unknown document type '{0}'. Expected one of: 01, 03, 04, 05, 06, 07, 08, 09, 11, 14, 15")]
    UnknownDocumentType(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM (e.g., 2024-01)")]
    InvalidMonth(String),

    #[error("Invalid page {page}: only {count} page(s) available")]
    InvalidPage { page: usize, count: usize },

    #[error("Invalid page '{0}'. Use first, prev, next, last or a page number.")]
    InvalidPageMove(String),

    #[error("No document type selected; choose one before exporting")]
    NoTypeSelected,

    #[error("Failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, DteError>;
