use std::fmt;
use std::path::PathBuf;

use lpmodel_core::SolverError;

/// Failures raised while moving a model in or out of HiGHS.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsError {
    /// A matrix entry names a column past the end of the model.
    ColumnOutOfRange { row: usize, column: usize, num_cols: usize },
    /// An array's length disagrees with the column or row count.
    ArrayLength {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// The row start array does not cover this row.
    MissingRow { row: usize },
    /// A count or index does not fit HiGHS's integer type.
    TooLarge { what: &'static str, value: usize },
    /// A string handed to HiGHS contains an interior nul byte.
    NulInString { what: &'static str },
    /// A C API call returned the error status.
    Call { call: &'static str, status: i32 },
    /// `Highs_writeModel` or `Highs_readModel` failed.
    File { path: PathBuf, call: &'static str },
}

impl HighsError {
    pub fn code(&self) -> &'static str {
        match self {
            HighsError::ColumnOutOfRange { .. } => "HIGHS_COLUMN_OUT_OF_RANGE",
            HighsError::ArrayLength { .. } => "HIGHS_ARRAY_LENGTH",
            HighsError::MissingRow { .. } => "HIGHS_MISSING_ROW",
            HighsError::TooLarge { .. } => "HIGHS_INDEX_OVERFLOW",
            HighsError::NulInString { .. } => "HIGHS_NUL_IN_STRING",
            HighsError::Call { .. } => "HIGHS_CALL_FAILED",
            HighsError::File { .. } => "HIGHS_FILE",
        }
    }
}

impl fmt::Display for HighsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.code())?;
        match self {
            HighsError::ColumnOutOfRange {
                row,
                column,
                num_cols,
            } => write!(f, "row {row} uses column {column} but the model has {num_cols}"),
            HighsError::ArrayLength {
                what,
                expected,
                found,
            } => write!(f, "{what} has {found} entries, expected {expected}"),
            HighsError::MissingRow { row } => write!(f, "row {row} has no start offset"),
            HighsError::TooLarge { what, value } => {
                write!(f, "{what} {value} exceeds the HiGHS index range")
            }
            HighsError::NulInString { what } => write!(f, "{what} contains a nul byte"),
            HighsError::Call { call, status } => write!(f, "{call} returned status {status}"),
            HighsError::File { path, call } => write!(f, "{call} failed for {}", path.display()),
        }
    }
}

impl std::error::Error for HighsError {}

impl From<HighsError> for SolverError {
    fn from(err: HighsError) -> Self {
        let reason = err.to_string();
        match err {
            HighsError::File { path, .. } => SolverError::ModelFile { path, reason },
            _ => SolverError::Backend(reason),
        }
    }
}
