pub mod aggregate;
pub mod dates;
pub mod extract;
pub mod patterns;
pub mod pipeline;
pub mod rules;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::warn;

use shared_types::{
    CheckResult, CheckStatus, ExtractedText, NotaryCheck, SupplementaryCheck, ValidationResult,
    VerbiageCheck, WitnessCheck,
};

/// ValidationEngine entry point
pub struct ValidationEngine;

impl ValidationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run all rule validators against extracted text and aggregate the
    /// verdict. Deterministic given identical input and date; the expiry
    /// comparison uses the current UTC date.
    pub fn validate_document(&self, extracted: &ExtractedText) -> ValidationResult {
        self.validate_document_at(extracted, Utc::now().date_naive())
    }

    /// Variant with an injected validation date
    pub fn validate_document_at(
        &self,
        extracted: &ExtractedText,
        today: NaiveDate,
    ) -> ValidationResult {
        let started = Instant::now();
        let text = extracted.text.as_str();

        // A panicking validator must not take down the run: its category
        // degrades to not_checked and absence-is-fail applies downstream.
        let notary = contain("notary", || rules::check_notary(text, today))
            .unwrap_or_else(notary_not_checked);
        let witness =
            contain("witness", || rules::check_witnesses(text)).unwrap_or_else(witness_not_checked);
        let verbiage =
            contain("verbiage", || rules::check_verbiage(text)).unwrap_or_else(verbiage_not_checked);
        let supplementary = contain("supplementary", || rules::check_supplementary(text, today))
            .unwrap_or_else(supplementary_not_checked);

        let overall = aggregate::overall_from_checks(&[
            CheckResult::Notary(notary.clone()),
            CheckResult::Witness(witness.clone()),
            CheckResult::Verbiage(verbiage.clone()),
            CheckResult::Supplementary(supplementary.clone()),
        ]);

        ValidationResult {
            notary,
            witness,
            verbiage,
            supplementary,
            overall,
            ocr_confidence: extracted.confidence,
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn contain<T>(category: &'static str, run: impl FnOnce() -> T) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(category, "Rule validator panicked; reporting category as not checked");
            None
        }
    }
}

const INTERNAL_FAILURE_ISSUE: &str = "Check skipped due to an internal validator failure";

fn notary_not_checked() -> NotaryCheck {
    NotaryCheck {
        status: CheckStatus::NotChecked,
        issues: vec![INTERNAL_FAILURE_ISSUE.to_string()],
        notary_name: None,
        commission_number: None,
        commission_expiry: None,
        is_valid: false,
    }
}

fn witness_not_checked() -> WitnessCheck {
    WitnessCheck {
        status: CheckStatus::NotChecked,
        issues: vec![INTERNAL_FAILURE_ISSUE.to_string()],
        witness_count: 0,
        required_witnesses: rules::witness::REQUIRED_WITNESSES,
        witness_names: vec![],
    }
}

fn verbiage_not_checked() -> VerbiageCheck {
    VerbiageCheck {
        status: CheckStatus::NotChecked,
        issues: vec![INTERNAL_FAILURE_ISSUE.to_string()],
        has_cremation_authority: false,
        poa_type: shared_types::PoaType::Unknown,
        required_phrases: vec![],
    }
}

fn supplementary_not_checked() -> SupplementaryCheck {
    SupplementaryCheck {
        status: CheckStatus::NotChecked,
        issues: vec![INTERNAL_FAILURE_ISSUE.to_string()],
        execution_date: None,
        has_signature_block: false,
    }
}
