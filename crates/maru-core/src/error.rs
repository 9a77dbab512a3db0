//! # Error Types
//!
//! Typed validation errors for maru-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Each variant renders the exact user-facing Korean message the
//!    dashboard shows next to the offending field
//! 3. The calculator and normalizer have NO error taxonomy at all: the
//!    calculator is total (absent inputs read as zero) and the normalizer
//!    passes unrecognized input through unchanged. Validation is the only
//!    fallible concern in this crate, and it fails per-field, never as a
//!    thrown error.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Per-field validation failures.
///
/// These are collected into a field→message map by
/// [`crate::validate::validate_row`]; callers decide whether to block save.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank after trimming.
    #[error("{label} 항목을 입력하세요")]
    Required { label: String },

    /// Carrier is not one of the four canonical values.
    #[error("올바른 통신사를 선택하세요 (SKT/KT/LGU+/MVNO)")]
    InvalidCarrier,

    /// Activation type is not one of the three canonical values.
    #[error("올바른 개통유형을 선택하세요 (신규/MNP/기변)")]
    InvalidActivationType,

    /// Activation date is not a real calendar date in YYYY-MM-DD form.
    #[error("개통일은 YYYY-MM-DD 형식의 올바른 날짜여야 합니다")]
    InvalidDate,

    /// A monetary field that must be non-negative is negative.
    #[error("{label}은(는) 0 이상이어야 합니다")]
    MustBeNonNegative { label: String },

    /// Tax rate is outside the valid fraction range.
    #[error("세율은 0과 1 사이여야 합니다")]
    TaxRateOutOfRange,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            label: "판매자".to_string(),
        };
        assert_eq!(err.to_string(), "판매자 항목을 입력하세요");

        assert_eq!(
            ValidationError::InvalidCarrier.to_string(),
            "올바른 통신사를 선택하세요 (SKT/KT/LGU+/MVNO)"
        );

        let err = ValidationError::MustBeNonNegative {
            label: "액면가".to_string(),
        };
        assert_eq!(err.to_string(), "액면가은(는) 0 이상이어야 합니다");
    }
}
