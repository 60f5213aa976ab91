//! Notarization validation: notary name, commission number, commission expiry
//!
//! An expired commission downgrades to `Warning`, not `Fail`: current policy
//! routes expirations to manual review. This precedence is intentional.

use chrono::NaiveDate;
use shared_types::{CheckStatus, NotaryCheck};
use tracing::debug;

use crate::dates::parse_date_token;
use crate::patterns::{
    contains_any, COMMISSION_EXPIRY, COMMISSION_NUMBER, NOTARY_NAME_ACKNOWLEDGED,
    NOTARY_NAME_AFTER, NOTARY_NAME_BEFORE, STATE_COMMISSION_KEYWORDS,
};

/// Validate notarization evidence in the extracted text.
///
/// `today` is injected so the expiry comparison is a deterministic function
/// of the inputs.
pub fn check_notary(text: &str, today: NaiveDate) -> NotaryCheck {
    let mut issues = Vec::new();

    let notary_name = find_notary_name(text);
    let commission_number = COMMISSION_NUMBER
        .captures(text)
        .map(|caps| caps[1].to_string());
    let commission_expiry = COMMISSION_EXPIRY
        .captures(text)
        .and_then(|caps| parse_date_token(&caps[1]));

    if notary_name.is_none() {
        issues.push("Notary name not found or not clearly visible".to_string());
    }
    if commission_number.is_none() {
        issues.push("Notary commission number not found".to_string());
    }

    let expired = commission_expiry.is_some_and(|expiry| expiry < today);
    if expired {
        issues.push("Notary commission has expired".to_string());
    }

    let text_lower = text.to_lowercase();
    let has_state_token = contains_any(&text_lower, STATE_COMMISSION_KEYWORDS);

    let status = if notary_name.is_none() || commission_number.is_none() {
        CheckStatus::Fail
    } else if expired {
        CheckStatus::Warning
    } else if !has_state_token {
        issues.push("Notary validation requires manual verification".to_string());
        CheckStatus::Warning
    } else {
        CheckStatus::Pass
    };

    debug!(
        ?status,
        name_found = notary_name.is_some(),
        number_found = commission_number.is_some(),
        expired,
        "Notary check complete"
    );

    NotaryCheck {
        is_valid: status == CheckStatus::Pass,
        status,
        issues,
        notary_name,
        commission_number,
        commission_expiry,
    }
}

/// Locate the notary's name near "Notary Public" or an acknowledgment clause
fn find_notary_name(text: &str) -> Option<String> {
    NOTARY_NAME_AFTER
        .captures(text)
        .or_else(|| NOTARY_NAME_BEFORE.captures(text))
        .or_else(|| NOTARY_NAME_ACKNOWLEDGED.captures(text))
        .map(|caps| caps[1].trim().to_string())
}
