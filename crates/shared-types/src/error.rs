//! Error taxonomy for the validation core
//!
//! Three distinct failure classes:
//! - `ExtractionError`: fatal to the pipeline run, no partial result
//! - `AnalysisError`: non-fatal; the document proceeds without a quality score
//! - Validator anomalies never surface as errors; the affected category is
//!   reported as `not_checked` and the absence-is-fail aggregation applies

use thiserror::Error;

/// Text extraction failed. The whole pipeline run is abandoned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Document data is unreadable or corrupt: {0}")]
    Unreadable(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction backend failure: {0}")]
    Backend(String),
}

/// Image-quality analysis failed. Distinct from a low score: the caller can
/// tell "could not analyze" apart from "analyzed and scored poorly".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Image data could not be decoded: {0}")]
    Undecodable(String),

    #[error("Image too small to analyze: {width}x{height}")]
    TooSmall { width: u32, height: u32 },
}
