//! # Error Types
//!
//! Store-level errors. Per-field validation detail never surfaces here; it
//! stays in each row's field→message map where the dashboard can render it
//! next to the offending cell.

use thiserror::Error;

/// Errors from working-set operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed row is not in the working set (already removed, or an
    /// id from a stale snapshot).
    #[error("Row not found: {id}")]
    RowNotFound { id: String },

    /// The save-gate failed; the offending rows carry their own error maps.
    #[error("Validation failed for {invalid_rows} row(s)")]
    ValidationFailed { invalid_rows: usize },
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::RowNotFound {
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Row not found: abc");

        let err = StoreError::ValidationFailed { invalid_rows: 2 };
        assert_eq!(err.to_string(), "Validation failed for 2 row(s)");
    }
}
