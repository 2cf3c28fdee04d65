//! Error types for mapping edit operations.

use std::fmt;

/// Errors from mapping edit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Target field not present in the vocabulary.
    UnknownField(String),
    /// Source column not present in the session.
    ColumnNotFound(String),
    /// Row index outside the session.
    RowOutOfRange { index: usize, len: usize },
    /// A save is already in flight for this session.
    SaveInFlight,
    /// The session has no rows to submit.
    NoRows,
    /// Non-ignored rows still have no target field.
    UnmappedColumns(Vec<String>),
    /// A confirmation requires a time column.
    MissingTimeColumn,
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(field) => write!(f, "Unknown target field: {field}"),
            Self::ColumnNotFound(column) => write!(f, "Column not found: {column}"),
            Self::RowOutOfRange { index, len } => {
                write!(f, "Row {index} out of range (session has {len} rows)")
            }
            Self::SaveInFlight => write!(f, "A save is already in progress"),
            Self::NoRows => write!(f, "Nothing to submit: the mapping has no rows"),
            Self::UnmappedColumns(columns) => {
                write!(f, "Columns without a target field: {}", columns.join(", "))
            }
            Self::MissingTimeColumn => write!(f, "A time column is required"),
        }
    }
}

impl std::error::Error for MappingError {}
