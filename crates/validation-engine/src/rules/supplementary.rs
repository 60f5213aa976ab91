//! Informational checks: execution-date validity and signature presence
//!
//! Problems surface as `Warning` issues only; this category never fails a
//! document and the aggregator excludes it from the overall verdict.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{CheckStatus, SupplementaryCheck};
use tracing::debug;

use crate::dates::parse_date_token;
use crate::patterns::{contains_any, EXECUTION_DATE, SIGNATURE_KEYWORDS};

lazy_static! {
    /// Any bare date token, used when no labeled execution date is present
    static ref DATE_TOKEN: Regex = Regex::new(
        r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|(?i:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}|\d{4}-\d{2}-\d{2}"
    )
    .unwrap();
}

/// Check execution-date validity and signature presence
pub fn check_supplementary(text: &str, today: NaiveDate) -> SupplementaryCheck {
    let text_lower = text.to_lowercase();
    let mut issues = Vec::new();

    let execution_date = EXECUTION_DATE
        .captures(text)
        .and_then(|caps| parse_date_token(&caps[1]))
        .or_else(|| {
            DATE_TOKEN
                .find_iter(text)
                .filter_map(|m| parse_date_token(m.as_str()))
                .next()
        });

    match execution_date {
        None => issues.push("No execution date found".to_string()),
        Some(date) if date > today => {
            issues.push("Execution date is in the future".to_string());
        }
        Some(_) => {}
    }

    let has_signature_block = contains_any(&text_lower, SIGNATURE_KEYWORDS);
    if !has_signature_block {
        issues.push("No signature block detected".to_string());
    }

    let status = if issues.is_empty() {
        CheckStatus::Pass
    } else {
        CheckStatus::Warning
    };

    debug!(?status, ?execution_date, has_signature_block, "Supplementary check complete");

    SupplementaryCheck {
        status,
        issues,
        execution_date,
        has_signature_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_dated_and_signed_passes() {
        let text = "Dated: 03/04/2024\nSignature of Principal: ______";
        let check = check_supplementary(text, today());

        assert_eq!(check.status, CheckStatus::Pass);
        assert_eq!(
            check.execution_date,
            NaiveDate::from_ymd_opt(2024, 3, 4)
        );
        assert!(check.has_signature_block);
        assert!(check.issues.is_empty());
    }

    #[test]
    fn test_missing_date_warns() {
        let text = "Signed by the principal before two witnesses.";
        let check = check_supplementary(text, today());

        assert_eq!(check.status, CheckStatus::Warning);
        assert_eq!(check.execution_date, None);
        assert!(check.issues.iter().any(|i| i == "No execution date found"));
    }

    #[test]
    fn test_future_date_warns() {
        let text = "Executed on 01/15/2030. Signature: ______";
        let check = check_supplementary(text, today());

        assert_eq!(check.status, CheckStatus::Warning);
        assert!(check
            .issues
            .iter()
            .any(|i| i == "Execution date is in the future"));
    }

    #[test]
    fn test_missing_signature_warns() {
        let text = "Dated: March 4, 2024. This document takes effect immediately.";
        let check = check_supplementary(text, today());

        assert_eq!(check.status, CheckStatus::Warning);
        assert!(!check.has_signature_block);
        assert!(check.issues.iter().any(|i| i == "No signature block detected"));
    }

    #[test]
    fn test_bare_date_token_accepted() {
        let text = "Los Angeles, 06/15/2024. Signed: ______";
        let check = check_supplementary(text, today());

        assert_eq!(
            check.execution_date,
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
        assert_eq!(check.status, CheckStatus::Pass);
    }

    #[test]
    fn test_never_fails() {
        let check = check_supplementary("", today());
        assert_eq!(check.status, CheckStatus::Warning);
    }
}
