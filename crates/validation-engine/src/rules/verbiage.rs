//! Required legal language and disposition-authority validation

use shared_types::{CheckStatus, PhraseMatch, PoaType, VerbiageCheck};
use tracing::debug;

use crate::patterns::{
    contains_any, excerpt_around, find_first, near_position, CALIFORNIA_MARKERS,
    CREMATION_AUTHORITY_PHRASES, LAW_REFERENCE_KEYWORDS, OTHER_STATE_NAMES, REQUIRED_PHRASES,
};

/// Window (bytes) within which the durability qualifier must appear
/// relative to "power of attorney"
const DURABILITY_WINDOW: usize = 80;

/// Window (bytes) within which a state name counts as a statutory reference
const LAW_REFERENCE_WINDOW: usize = 60;

/// Check cremation/disposition authorization language and the required
/// legal phrase list against the extracted text
pub fn check_verbiage(text: &str) -> VerbiageCheck {
    let text_lower = text.to_lowercase();
    let mut issues = Vec::new();

    let has_cremation_authority = contains_any(&text_lower, CREMATION_AUTHORITY_PHRASES);
    if !has_cremation_authority {
        issues.push("No explicit cremation authority found in document".to_string());
    }

    let poa_type = classify_poa_type(&text_lower);

    let mut required_phrases = Vec::new();
    let mut missing: Vec<&str> = Vec::new();
    for (label, variants) in REQUIRED_PHRASES.iter().copied() {
        match find_first(&text_lower, variants) {
            Some((variant, pos)) => required_phrases.push(PhraseMatch {
                phrase: label.to_string(),
                found: true,
                location: Some(excerpt_around(text, pos, variant.len())),
            }),
            None => {
                missing.push(label);
                required_phrases.push(PhraseMatch {
                    phrase: label.to_string(),
                    found: false,
                    location: None,
                });
            }
        }
    }
    for label in &missing {
        issues.push(format!("Required phrase not found: {}", label));
    }

    let status = if !has_cremation_authority || !missing.is_empty() {
        CheckStatus::Fail
    } else if let Some(issue) = jurisdiction_mismatch(&text_lower) {
        issues.push(issue);
        CheckStatus::Warning
    } else {
        CheckStatus::Pass
    };

    debug!(
        ?status,
        has_cremation_authority,
        ?poa_type,
        missing = missing.len(),
        "Verbiage check complete"
    );

    VerbiageCheck {
        status,
        issues,
        has_cremation_authority,
        poa_type,
        required_phrases,
    }
}

/// Classify durability from the qualifier nearest "power of attorney".
/// "non-durable" is tested first since "durable" is a substring of it.
fn classify_poa_type(text_lower: &str) -> PoaType {
    let Some(pos) = text_lower.find("power of attorney") else {
        return PoaType::Unknown;
    };
    if near_position(text_lower, pos, DURABILITY_WINDOW, &["non-durable", "nondurable"]) {
        PoaType::NonDurable
    } else if near_position(text_lower, pos, DURABILITY_WINDOW, &["durable"]) {
        PoaType::Durable
    } else {
        PoaType::Unknown
    }
}

/// Detect a jurisdiction mismatch: another state's statutes referenced, or
/// no California marker anywhere in the document
fn jurisdiction_mismatch(text_lower: &str) -> Option<String> {
    for state in OTHER_STATE_NAMES {
        if let Some(pos) = text_lower.find(state) {
            if near_position(text_lower, pos, LAW_REFERENCE_WINDOW, LAW_REFERENCE_KEYWORDS) {
                return Some(format!(
                    "Document may not be California-specific: references {} law",
                    state
                ));
            }
        }
    }
    if !contains_any(text_lower, CALIFORNIA_MARKERS) {
        return Some("Document may not be California-specific".to_string());
    }
    None
}
