//! Contracts for the external extraction and image-quality collaborators
//!
//! The backends (PDF-text, OCR, raster analysis) live outside this crate;
//! the pipeline only depends on these traits.

use std::future::Future;

use shared_types::{AnalysisError, ExtractedText, ExtractionError, ImageQuality};

/// PDF-text or OCR backend. Calls may take seconds. Implementations report
/// a confidence in 0-100, or the conservative default 0 when the backend
/// cannot judge its own output.
pub trait TextExtractor {
    fn extract(
        &self,
        document: &[u8],
    ) -> impl Future<Output = Result<ExtractedText, ExtractionError>> + Send;
}

/// Image-quality backend consulted for scanned input only
pub trait ImageQualityProbe {
    fn analyze(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<ImageQuality, AnalysisError>> + Send;
}
