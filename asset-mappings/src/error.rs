//! Error types for the mapping viewer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
