//! Phrase tables and matching helpers shared by the rule validators

use lazy_static::lazy_static;
use regex::Regex;

/// Phrases granting cremation/disposition authority
pub const CREMATION_AUTHORITY_PHRASES: &[&str] = &[
    "cremation",
    "cremate",
    "cremated",
    "disposition of remains",
    "disposition of my remains",
    "final disposition",
];

/// Required legal phrases: display label plus acceptable variants.
/// "non-durable" is listed before "durable" since the latter is a substring.
pub const REQUIRED_PHRASES: &[(&str, &[&str])] = &[
    ("power of attorney", &["power of attorney"]),
    ("durability designation", &["non-durable", "durable"]),
    ("principal designation", &["principal"]),
    ("agent designation", &["agent", "attorney-in-fact"]),
];

/// Relationship markers that disqualify a witness
pub const PROHIBITED_WITNESS_MARKERS: &[&str] =
    &["spouse", "agent", "attorney-in-fact", "beneficiary"];

/// Markers tying the document to California law
pub const CALIFORNIA_MARKERS: &[&str] = &["california", "probate code", "health and safety code"];

/// Other states whose statutory references flag a jurisdiction mismatch
pub const OTHER_STATE_NAMES: &[&str] = &[
    "texas",
    "florida",
    "nevada",
    "arizona",
    "oregon",
    "washington",
    "new york",
    "colorado",
    "utah",
    "illinois",
];

/// Words indicating a statutory reference near a state name
pub const LAW_REFERENCE_KEYWORDS: &[&str] = &["law", "statute", "code", "revised"];

/// Tokens spelling out the notary's state of commission
pub const STATE_COMMISSION_KEYWORDS: &[&str] = &["state of", "commissioned in", "county of"];

/// Signature block indicators
pub const SIGNATURE_KEYWORDS: &[&str] = &["signature", "signed", "/s/"];

lazy_static! {
    /// Name following "Notary Public" (e.g. "Notary Public: Jane Doe")
    pub static ref NOTARY_NAME_AFTER: Regex = Regex::new(
        r"(?i:notary\s+public)[,:\s]+([A-Z][A-Za-z.'-]*(?:[ \t]+[A-Z][A-Za-z.'-]*){1,3})"
    )
    .unwrap();

    /// Name preceding "Notary Public" (e.g. "Jane Doe, Notary Public")
    pub static ref NOTARY_NAME_BEFORE: Regex = Regex::new(
        r"([A-Z][A-Za-z.'-]*(?:[ \t]+[A-Z][A-Za-z.'-]*){1,3})[,\s]+(?:a\s+)?(?i:notary\s+public)"
    )
    .unwrap();

    /// Name in an acknowledgment clause ("before me, Jane Doe, ...")
    pub static ref NOTARY_NAME_ACKNOWLEDGED: Regex = Regex::new(
        r"(?i:before\s+me)[,\s]+([A-Z][A-Za-z.'-]*(?:[ \t]+[A-Z][A-Za-z.'-]*){1,3})"
    )
    .unwrap();

    /// 6-9 digit commission number near "Commission Number"
    pub static ref COMMISSION_NUMBER: Regex = Regex::new(
        r"(?i:commission\s*(?:number|no\.?|num\.?|#)?)\s*[:#]?\s*(\d{6,9})\b"
    )
    .unwrap();

    /// Date token following "Commission Expires"/"Expires"
    pub static ref COMMISSION_EXPIRY: Regex = Regex::new(
        r"\b(?i:(?:commission\s+)?expir(?:es|ation|y)(?:\s+(?:date|on))?)\s*[:\s]\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|(?i:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}|\d{4}-\d{2}-\d{2})"
    )
    .unwrap();

    /// "Witness" line followed by a name-like token. Deliberately broad;
    /// fragments can count as separate witnesses (known limitation).
    pub static ref WITNESS_NAME: Regex = Regex::new(
        r"(?i:witness(?:ed)?(?:\s+by|\s+signature)?)\s*(?:#?\s*\d+)?\s*[:\-]?\s*([A-Z][A-Za-z.'-]*(?:[ \t]+[A-Z][A-Za-z.'-]*){1,3})"
    )
    .unwrap();

    /// Free-standing date token ("Dated: 03/04/2024", "Executed on March 4, 2024")
    pub static ref EXECUTION_DATE: Regex = Regex::new(
        r"\b(?i:dated|executed\s+on|executed\s+this|date\s+of\s+execution)\s*[:\s]\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|(?i:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}|\d{4}-\d{2}-\d{2})"
    )
    .unwrap();
}

/// Check whether any phrase from the list appears in the lowercased text
pub fn contains_any(text_lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text_lower.contains(p))
}

/// Find the first phrase from the list present in the lowercased text,
/// returning the phrase and its byte offset
pub fn find_first<'a>(text_lower: &str, phrases: &[&'a str]) -> Option<(&'a str, usize)> {
    phrases
        .iter()
        .copied()
        .filter_map(|p| text_lower.find(p).map(|pos| (p, pos)))
        .min_by_key(|(_, pos)| *pos)
}

/// Extract a display excerpt around a match for issue context
pub fn excerpt_around(text: &str, start: usize, match_len: usize) -> String {
    let context = 40;
    let mut ctx_start = start.saturating_sub(context);
    let mut ctx_end = (start + match_len + context).min(text.len());
    while ctx_start > 0 && !text.is_char_boundary(ctx_start) {
        ctx_start -= 1;
    }
    while ctx_end < text.len() && !text.is_char_boundary(ctx_end) {
        ctx_end += 1;
    }

    let mut result = String::new();
    if ctx_start > 0 {
        result.push_str("...");
    }
    result.push_str(text[ctx_start..ctx_end].trim());
    if ctx_end < text.len() {
        result.push_str("...");
    }
    result
}

/// Check whether a keyword group appears within `window` bytes of a position
pub fn near_position(text_lower: &str, pos: usize, window: usize, keywords: &[&str]) -> bool {
    let mut start = pos.saturating_sub(window);
    let mut end = (pos + window).min(text_lower.len());
    while start > 0 && !text_lower.is_char_boundary(start) {
        start -= 1;
    }
    while end < text_lower.len() && !text_lower.is_char_boundary(end) {
        end += 1;
    }
    let context = &text_lower[start..end];
    keywords.iter().any(|kw| context.contains(kw))
}
