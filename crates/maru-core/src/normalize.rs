//! # Normalizer
//!
//! Best-effort normalization of free-text carrier and activation-type input
//! onto the closed vocabulary.
//!
//! Two strategies coexist, used at different points:
//!
//! - **Substring matching** ([`normalize_carrier`],
//!   [`normalize_activation_type`]): auto-correction during paste import,
//!   where cells arrive as whatever the source spreadsheet held
//!   ("sk텔레콤", "LG유플러스", "번호이동").
//! - **Exact-map lookup** ([`map_carrier`], [`map_activation_type`]): direct
//!   key lookup for the short codes clerks type by hand ("sk", "lgu+").
//!
//! Neither strategy ever fails: unrecognized input passes through unchanged,
//! preserving what the user entered. The validator is the gate on
//! vocabulary correctness, not this module.

use crate::types::{ActivationType, Carrier};

/// Normalizes a free-text carrier name by substring match.
///
/// Matching is case-insensitive on the trimmed input. SK is checked before
/// KT because "SKT" contains both.
///
/// ```rust
/// use maru_core::normalize::normalize_carrier;
///
/// assert_eq!(normalize_carrier("sk"), "SKT");
/// assert_eq!(normalize_carrier("LGU"), "LGU+");
/// assert_eq!(normalize_carrier("알뜰폰"), "MVNO");
/// assert_eq!(normalize_carrier("xyz"), "xyz"); // passthrough
/// ```
pub fn normalize_carrier(input: &str) -> String {
    let upper = input.trim().to_uppercase();
    if upper.contains("SK") {
        Carrier::Skt.as_str().to_string()
    } else if upper.contains("KT") {
        Carrier::Kt.as_str().to_string()
    } else if upper.contains("LG") {
        Carrier::LguPlus.as_str().to_string()
    } else if upper.contains("알뜰") || upper.contains("MVNO") {
        Carrier::Mvno.as_str().to_string()
    } else {
        input.to_string()
    }
}

/// Normalizes a free-text activation type by substring match.
///
/// Korean synonyms collapse onto the canonical form: 번호이동 and 번이 are
/// both MNP, 기기변경 is 기변. Matching is on the trimmed original-case
/// input; lowercase "mnp" is the exact-map table's job, not this one's.
pub fn normalize_activation_type(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.contains("신규") {
        ActivationType::New.as_str().to_string()
    } else if trimmed.contains("MNP") || trimmed.contains("번호이동") || trimmed.contains("번이") {
        ActivationType::Mnp.as_str().to_string()
    } else if trimmed.contains("기변") || trimmed.contains("기기변경") {
        ActivationType::DeviceChange.as_str().to_string()
    } else {
        input.to_string()
    }
}

/// Exact-key carrier lookup; unknown keys pass through unchanged.
pub fn map_carrier(input: &str) -> String {
    match Carrier::from_code(input) {
        Some(carrier) => carrier.as_str().to_string(),
        None => input.to_string(),
    }
}

/// Exact-key activation-type lookup; unknown keys pass through unchanged.
pub fn map_activation_type(input: &str) -> String {
    match ActivationType::from_code(input) {
        Some(kind) => kind.as_str().to_string(),
        None => input.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_substring_matching() {
        assert_eq!(normalize_carrier("sk"), "SKT");
        assert_eq!(normalize_carrier("SK텔레콤"), "SKT");
        assert_eq!(normalize_carrier("skt"), "SKT");
        assert_eq!(normalize_carrier("KT"), "KT");
        assert_eq!(normalize_carrier("kt olleh"), "KT");
        assert_eq!(normalize_carrier("LGU"), "LGU+");
        assert_eq!(normalize_carrier("lg유플러스"), "LGU+");
        assert_eq!(normalize_carrier("알뜰"), "MVNO");
        assert_eq!(normalize_carrier("mvno"), "MVNO");
    }

    #[test]
    fn test_carrier_sk_wins_over_kt() {
        // "SKT" contains both "SK" and "KT"; SK must match first
        assert_eq!(normalize_carrier("SKT"), "SKT");
    }

    #[test]
    fn test_carrier_passthrough() {
        assert_eq!(normalize_carrier("xyz"), "xyz");
        assert_eq!(normalize_carrier(""), "");
    }

    #[test]
    fn test_activation_type_substring_matching() {
        assert_eq!(normalize_activation_type("신규"), "신규");
        assert_eq!(normalize_activation_type("신규가입"), "신규");
        assert_eq!(normalize_activation_type("MNP"), "MNP");
        assert_eq!(normalize_activation_type("번호이동"), "MNP");
        assert_eq!(normalize_activation_type("번이"), "MNP");
        assert_eq!(normalize_activation_type("기변"), "기변");
        assert_eq!(normalize_activation_type("기기변경"), "기변");
    }

    #[test]
    fn test_activation_type_passthrough() {
        assert_eq!(normalize_activation_type("취소"), "취소");
        // lowercase short code is the exact map's job
        assert_eq!(normalize_activation_type("mnp"), "mnp");
    }

    #[test]
    fn test_exact_map_lookup() {
        assert_eq!(map_carrier("sk"), "SKT");
        assert_eq!(map_carrier("lgu+"), "LGU+");
        assert_eq!(map_carrier("xyz"), "xyz");

        assert_eq!(map_activation_type("번호이동"), "MNP");
        assert_eq!(map_activation_type("취소"), "취소");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for input in ["sk", "LGU", "알뜰", "xyz"] {
            let once = normalize_carrier(input);
            assert_eq!(normalize_carrier(&once), once);
        }
        for input in ["번호이동", "기기변경", "신규", "취소"] {
            let once = normalize_activation_type(input);
            assert_eq!(normalize_activation_type(&once), once);
        }
    }
}
