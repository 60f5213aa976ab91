//! Validation pipeline: extraction, quality analysis, rule validation
//!
//! The quota gate is consulted by the caller before a pipeline run, never
//! here; a run that starts always produces either a full report or an
//! extraction error.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};

use shared_types::{ExtractionError, ImageQuality, ValidationResult};

use crate::extract::{ImageQualityProbe, TextExtractor};
use crate::ValidationEngine;

/// Raw document input for one validation run
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Uploaded PDF bytes
    Pdf(Vec<u8>),
    /// Photographed or scanned image bytes
    ScannedImage(Vec<u8>),
}

impl DocumentSource {
    pub fn bytes(&self) -> &[u8] {
        match self {
            DocumentSource::Pdf(bytes) => bytes,
            DocumentSource::ScannedImage(bytes) => bytes,
        }
    }

    pub fn is_scanned(&self) -> bool {
        matches!(self, DocumentSource::ScannedImage(_))
    }
}

/// Pipeline output: the verdict plus the image-quality record that an
/// external persistence layer attaches to the document
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub result: ValidationResult,
    /// Present for scanned input when analysis succeeded
    pub image_quality: Option<ImageQuality>,
    /// Set when quality analysis was attempted and failed; the verdict
    /// itself is unaffected
    pub quality_analysis_failed: bool,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Sequences extraction, image-quality analysis, rule validation and
/// aggregation for a single document
pub struct ValidationPipeline<E, Q> {
    engine: ValidationEngine,
    extractor: E,
    quality_probe: Q,
}

impl<E: TextExtractor, Q: ImageQualityProbe> ValidationPipeline<E, Q> {
    pub fn new(extractor: E, quality_probe: Q) -> Self {
        Self {
            engine: ValidationEngine::new(),
            extractor,
            quality_probe,
        }
    }

    pub async fn process(&self, source: &DocumentSource) -> Result<DocumentReport, PipelineError> {
        self.process_at(source, Utc::now().date_naive()).await
    }

    /// Variant with an injected validation date
    pub async fn process_at(
        &self,
        source: &DocumentSource,
        today: NaiveDate,
    ) -> Result<DocumentReport, PipelineError> {
        let started = Instant::now();

        // Extraction failure is fatal: no partial result is produced
        let extracted = self.extractor.extract(source.bytes()).await?;
        info!(
            confidence = extracted.confidence,
            chars = extracted.text.len(),
            "Text extraction complete"
        );

        // Quality analysis applies to scanned input only and never fails
        // the run
        let (image_quality, quality_analysis_failed) = if source.is_scanned() {
            match self.quality_probe.analyze(source.bytes()).await {
                Ok(quality) => {
                    info!(score = quality.overall_score, "Image quality analyzed");
                    (Some(quality), false)
                }
                Err(err) => {
                    warn!(%err, "Image quality analysis failed; continuing without score");
                    (None, true)
                }
            }
        } else {
            (None, false)
        };

        let mut result = self.engine.validate_document_at(&extracted, today);
        // Report the full pipeline duration, extraction included
        result.processing_time_ms = started.elapsed().as_millis() as u64;

        info!(overall = ?result.overall, elapsed_ms = result.processing_time_ms, "Validation complete");

        Ok(DocumentReport {
            result,
            image_quality,
            quality_analysis_failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{
        AnalysisError, CheckStatus, ColorSpace, ExtractedText, ImageQuality, OverallStatus,
        QualityScores, Resolution,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    /// Extractor returning canned text, or failing when empty
    struct FixtureExtractor {
        text: &'static str,
        confidence: f32,
    }

    impl TextExtractor for FixtureExtractor {
        async fn extract(&self, _document: &[u8]) -> Result<ExtractedText, ExtractionError> {
            if self.text.is_empty() {
                return Err(ExtractionError::Unreadable("empty fixture".to_string()));
            }
            Ok(ExtractedText::new(self.text, self.confidence))
        }
    }

    /// Probe returning a fixed quality record, or failing on demand
    struct FixtureProbe {
        fail: bool,
    }

    impl ImageQualityProbe for FixtureProbe {
        async fn analyze(&self, _image: &[u8]) -> Result<ImageQuality, AnalysisError> {
            if self.fail {
                return Err(AnalysisError::Undecodable("fixture".to_string()));
            }
            Ok(ImageQuality {
                overall_score: 82.0,
                resolution: Resolution {
                    width: 2550,
                    height: 3300,
                    megapixels: 8.4,
                    dpi: 300,
                },
                color_space: ColorSpace::Rgb,
                quality: QualityScores {
                    sharpness: 0.8,
                    brightness: 0.9,
                    contrast: 0.7,
                },
                recommendations: vec![],
            })
        }
    }

    const POA_TEXT: &str = "DURABLE POWER OF ATTORNEY\n\
         I, the principal, authorize my agent to direct the cremation of my \
         remains under the California Probate Code.\n\
         Dated: 03/04/2024\n\
         Signature: ______\n\
         Witness: John Smith\n\
         Witness: Mary Jones\n\
         State of California. Acknowledged before me, Jane Roe, Notary Public.\n\
         Commission Number: 2345678\n\
         Commission Expires: 12/31/2030";

    #[tokio::test]
    async fn test_pdf_source_skips_quality_analysis() {
        let pipeline = ValidationPipeline::new(
            FixtureExtractor {
                text: POA_TEXT,
                confidence: 97.0,
            },
            FixtureProbe { fail: true },
        );

        let report = pipeline
            .process_at(&DocumentSource::Pdf(vec![1, 2, 3]), today())
            .await
            .expect("pipeline should succeed");

        // The failing probe is never consulted for PDF input
        assert!(report.image_quality.is_none());
        assert!(!report.quality_analysis_failed);
        assert_eq!(report.result.overall, OverallStatus::Pass);
    }

    #[tokio::test]
    async fn test_scanned_source_attaches_quality() {
        let pipeline = ValidationPipeline::new(
            FixtureExtractor {
                text: POA_TEXT,
                confidence: 88.0,
            },
            FixtureProbe { fail: false },
        );

        let report = pipeline
            .process_at(&DocumentSource::ScannedImage(vec![0xFF]), today())
            .await
            .expect("pipeline should succeed");

        let quality = report.image_quality.expect("quality should be attached");
        assert_eq!(quality.resolution.dpi, 300);
        assert!(!report.quality_analysis_failed);
        assert_eq!(report.result.ocr_confidence, 88.0);
    }

    #[tokio::test]
    async fn test_quality_failure_is_non_fatal() {
        let pipeline = ValidationPipeline::new(
            FixtureExtractor {
                text: POA_TEXT,
                confidence: 88.0,
            },
            FixtureProbe { fail: true },
        );

        let report = pipeline
            .process_at(&DocumentSource::ScannedImage(vec![0xFF]), today())
            .await
            .expect("quality failure must not abort the run");

        assert!(report.image_quality.is_none());
        assert!(report.quality_analysis_failed);
        // The verdict is still produced
        assert_eq!(report.result.overall, OverallStatus::Pass);
    }

    #[tokio::test]
    async fn test_extraction_failure_is_fatal() {
        let pipeline = ValidationPipeline::new(
            FixtureExtractor {
                text: "",
                confidence: 0.0,
            },
            FixtureProbe { fail: false },
        );

        let err = pipeline
            .process_at(&DocumentSource::Pdf(vec![1]), today())
            .await
            .expect_err("unreadable input must abort the run");

        assert!(matches!(
            err,
            PipelineError::Extraction(ExtractionError::Unreadable(_))
        ));
    }

    #[tokio::test]
    async fn test_no_evidence_document_fails_overall() {
        let pipeline = ValidationPipeline::new(
            FixtureExtractor {
                text: "An unrelated letter about gardening.",
                confidence: 75.0,
            },
            FixtureProbe { fail: false },
        );

        let report = pipeline
            .process_at(&DocumentSource::Pdf(vec![1]), today())
            .await
            .expect("pipeline should succeed");

        assert_eq!(report.result.notary.status, CheckStatus::Fail);
        assert_eq!(report.result.witness.status, CheckStatus::Fail);
        assert_eq!(report.result.verbiage.status, CheckStatus::Fail);
        assert_eq!(report.result.overall, OverallStatus::Fail);
    }
}
