use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Error loading data for station {station} from {}: {reason}", path.display())]
    SourceLoad {
        station: String,
        path: PathBuf,
        reason: String,
    },
}

impl ProcessingError {
    pub fn source_load(station: &str, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ProcessingError::SourceLoad {
            station: station.to_string(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_source_load(&self) -> bool {
        matches!(self, ProcessingError::SourceLoad { .. })
    }
}
