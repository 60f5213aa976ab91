use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text extracted from a document by the PDF-text or OCR backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    /// Extraction confidence, 0-100. Unreadable input reports 0.
    pub confidence: f32,
}

impl ExtractedText {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 100.0),
        }
    }
}

/// Outcome of a single rule category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    NotChecked,
}

/// Aggregate verdict for a document. `NotChecked` is not representable here;
/// an absence of evidence aggregates to `Fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Pass,
    Fail,
    Warning,
}

/// Notarization evidence found in the document text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotaryCheck {
    pub status: CheckStatus,
    pub issues: Vec<String>,
    pub notary_name: Option<String>,
    pub commission_number: Option<String>,
    /// Parsed expiry when a date-like token was matched, `None` otherwise
    pub commission_expiry: Option<NaiveDate>,
    pub is_valid: bool,
}

/// Witness signatures found in the document text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessCheck {
    pub status: CheckStatus,
    pub issues: Vec<String>,
    pub witness_count: usize,
    pub required_witnesses: usize,
    pub witness_names: Vec<String>,
}

/// Durability classification of a power of attorney
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoaType {
    Durable,
    NonDurable,
    Unknown,
}

/// One entry of the required-phrase checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub phrase: String,
    pub found: bool,
    /// Matched excerpt from the document, `None` when not found
    pub location: Option<String>,
}

/// Required legal language and disposition-authority evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbiageCheck {
    pub status: CheckStatus,
    pub issues: Vec<String>,
    pub has_cremation_authority: bool,
    pub poa_type: PoaType,
    pub required_phrases: Vec<PhraseMatch>,
}

/// Informational checks (execution date, signature block). Never fails a
/// document and is excluded from the overall verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementaryCheck {
    pub status: CheckStatus,
    pub issues: Vec<String>,
    pub execution_date: Option<NaiveDate>,
    pub has_signature_block: bool,
}

/// One rule category's result. The aggregator reads only `status()` and
/// `issues()`; category-specific detail stays behind the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CheckResult {
    Notary(NotaryCheck),
    Witness(WitnessCheck),
    Verbiage(VerbiageCheck),
    Supplementary(SupplementaryCheck),
}

impl CheckResult {
    pub fn status(&self) -> CheckStatus {
        match self {
            CheckResult::Notary(c) => c.status,
            CheckResult::Witness(c) => c.status,
            CheckResult::Verbiage(c) => c.status,
            CheckResult::Supplementary(c) => c.status,
        }
    }

    pub fn issues(&self) -> &[String] {
        match self {
            CheckResult::Notary(c) => &c.issues,
            CheckResult::Witness(c) => &c.issues,
            CheckResult::Verbiage(c) => &c.issues,
            CheckResult::Supplementary(c) => &c.issues,
        }
    }

    /// Supplementary checks are informational only
    pub fn counts_toward_overall(&self) -> bool {
        !matches!(self, CheckResult::Supplementary(_))
    }
}

/// Full verdict for one validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub notary: NotaryCheck,
    pub witness: WitnessCheck,
    pub verbiage: VerbiageCheck,
    pub supplementary: SupplementaryCheck,
    pub overall: OverallStatus,
    pub ocr_confidence: f32,
    pub processing_time_ms: u64,
}

/// Pixel dimensions and estimated print density of a scanned image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub megapixels: f32,
    pub dpi: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    Grayscale,
    GrayscaleAlpha,
    Rgb,
    Rgba,
}

/// Normalized quality sub-scores, each 0.0-1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    pub sharpness: f32,
    pub brightness: f32,
    pub contrast: f32,
}

/// Quality report for a scanned image. Attached to the document record,
/// not part of `ValidationResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageQuality {
    /// Weighted combination of the sub-scores, 0-100
    pub overall_score: f32,
    pub resolution: Resolution,
    pub color_space: ColorSpace,
    pub quality: QualityScores,
    pub recommendations: Vec<String>,
}

/// Subscription tier governing the monthly validation quota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Professional,
    Enterprise,
}

impl Tier {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Tier::Professional | Tier::Enterprise)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

/// Per-user quota counter. Mutated only by the quota gate; the counter is
/// zeroed exactly once per calendar month on first use after rollover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaState {
    pub tier: Tier,
    pub role: Role,
    pub validations_this_month: u32,
    pub last_reset_month: u32,
    pub last_reset_year: i32,
}

impl QuotaState {
    pub fn new(tier: Tier, role: Role, today: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            tier,
            role,
            validations_this_month: 0,
            last_reset_month: today.month(),
            last_reset_year: today.year(),
        }
    }
}
