use thiserror::Error;

use stratboard_core::DomainError;
use stratboard_infra::StoreError;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("sheet '{sheet}' expects {expected} columns, row has {found}")]
    ColumnMismatch {
        sheet: String,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
