pub mod error;
pub mod types;

pub use error::{AnalysisError, ExtractionError};
pub use types::{
    CheckResult, CheckStatus, ColorSpace, ExtractedText, ImageQuality, NotaryCheck, OverallStatus,
    PhraseMatch, PoaType, QualityScores, QuotaState, Resolution, Role, SupplementaryCheck, Tier,
    ValidationResult, VerbiageCheck, WitnessCheck,
};
