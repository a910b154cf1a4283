use std::io;

/// Error returned when loading a table or fitting a model fails.
///
/// Hitting the iteration cap is not an error: see [`crate::Fit::converged`].
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `row` is the index of the data row, the header excluded.
    #[error("cannot parse {value:?} as a number at row {row}, column {col}")]
    Parse {
        row: usize,
        col: usize,
        value: String,
    },

    #[error("row {row} has {got} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("no header found")]
    Empty,
}

impl FitError {
    pub(crate) fn invalid(msg: impl Into<String>) -> FitError {
        FitError::InvalidArgument(msg.into())
    }
}

pub type FitResult<T> = Result<T, FitError>;
