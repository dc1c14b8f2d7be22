use thiserror::Error;

pub type StatusResult<T> = Result<T, StatusError>;

/// Hard failures of an export or import call.
///
/// Scalar coercion problems never show up here: a bad cell degrades to its
/// zero/absent default instead.
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file type: {file}. Please use CSV or Excel (.xlsx) files.")]
    UnsupportedFileType { file: String },

    #[error("Sheet \"{sheet}\" not found. Available sheets: {}", available.join(", "))]
    SheetNotFound { sheet: String, available: Vec<String> },

    #[error("Sheet \"{sheet}\" is missing required columns: {}", columns.join(", "))]
    MissingColumns { sheet: String, columns: Vec<String> },

    #[error("Sheet \"{sheet}\" is empty or has no data rows")]
    EmptySheet { sheet: String },

    #[error("Failed to parse Excel file: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Payload error: {0}")]
    Payload(String),
}

impl From<serde_yaml::Error> for StatusError {
    fn from(err: serde_yaml::Error) -> Self {
        StatusError::Payload(err.to_string())
    }
}

impl From<serde_json::Error> for StatusError {
    fn from(err: serde_json::Error) -> Self {
        StatusError::Payload(err.to_string())
    }
}
