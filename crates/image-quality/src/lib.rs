//! Image-quality analysis for scanned document input
//!
//! Produces the resolution, color-space and sharpness/brightness/contrast
//! metrics used to warn uploaders before OCR runs on a poor scan. Decode
//! failures surface as a distinct `AnalysisError`; a caller can always tell
//! "could not analyze" apart from "analyzed and scored poorly".

use image::DynamicImage;
use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use shared_types::{AnalysisError, ColorSpace, ImageQuality, QualityScores, Resolution};
use tracing::debug;
use validation_engine::extract::ImageQualityProbe;

/// Assumed page width (inches) for DPI estimation; the decoded formats we
/// accept carry no density metadata, so a letter-width heuristic is used
const PAGE_WIDTH_INCHES: f32 = 8.5;

/// Minimum dimensions worth scoring
const MIN_DIMENSION: u32 = 32;

/// DPI floor below which OCR accuracy degrades noticeably
const DPI_FLOOR: u32 = 300;

/// Sub-score weights for the overall 0-100 score
const SHARPNESS_WEIGHT: f32 = 0.4;
const BRIGHTNESS_WEIGHT: f32 = 0.3;
const CONTRAST_WEIGHT: f32 = 0.3;

/// Mean Sobel gradient magnitude treated as fully sharp
const SHARPNESS_FULL_SCALE: f32 = 120.0;

/// Luminance standard deviation treated as full contrast
const CONTRAST_FULL_SCALE: f32 = 80.0;

/// Thresholds for remediation recommendations
const SHARPNESS_RECOMMEND_FLOOR: f32 = 0.4;
const CONTRAST_RECOMMEND_FLOOR: f32 = 0.3;
const DARK_MEAN_FLOOR: f32 = 0.25;
const BRIGHT_MEAN_CEILING: f32 = 0.85;

/// Analyze raw image bytes and score them for OCR suitability
pub fn analyze_image_quality(bytes: &[u8]) -> Result<ImageQuality, AnalysisError> {
    let image = image::load_from_memory(bytes)
        .map_err(|err| AnalysisError::Undecodable(err.to_string()))?;

    let (width, height) = (image.width(), image.height());
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(AnalysisError::TooSmall { width, height });
    }

    let color_space = classify_color_space(&image);
    let gray = image.to_luma8();

    let (mean_luma, stddev_luma) = luminance_stats(&gray);
    let mean_norm = mean_luma / 255.0;

    let sharpness = sharpness_score(&gray);
    let brightness = brightness_score(mean_norm);
    let contrast = (stddev_luma / CONTRAST_FULL_SCALE).clamp(0.0, 1.0);

    let dpi = (width as f32 / PAGE_WIDTH_INCHES).round() as u32;
    let megapixels = (width as f32 * height as f32) / 1_000_000.0;

    let overall_score = 100.0
        * (SHARPNESS_WEIGHT * sharpness
            + BRIGHTNESS_WEIGHT * brightness
            + CONTRAST_WEIGHT * contrast);

    let recommendations = build_recommendations(dpi, sharpness, contrast, mean_norm);

    debug!(
        width,
        height,
        dpi,
        sharpness,
        brightness,
        contrast,
        overall_score,
        "Image quality analysis complete"
    );

    Ok(ImageQuality {
        overall_score,
        resolution: Resolution {
            width,
            height,
            megapixels,
            dpi,
        },
        color_space,
        quality: QualityScores {
            sharpness,
            brightness,
            contrast,
        },
        recommendations,
    })
}

/// In-process probe backed by `analyze_image_quality`, for hosts that run
/// the analysis alongside the validation pipeline
pub struct LocalImageAnalyzer;

impl ImageQualityProbe for LocalImageAnalyzer {
    async fn analyze(&self, image: &[u8]) -> Result<ImageQuality, AnalysisError> {
        analyze_image_quality(image)
    }
}

fn classify_color_space(image: &DynamicImage) -> ColorSpace {
    use image::ColorType;
    match image.color() {
        ColorType::L8 | ColorType::L16 => ColorSpace::Grayscale,
        ColorType::La8 | ColorType::La16 => ColorSpace::GrayscaleAlpha,
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => ColorSpace::Rgb,
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => ColorSpace::Rgba,
        _ => ColorSpace::Rgb,
    }
}

/// Mean and standard deviation of the luminance channel
fn luminance_stats(gray: &GrayImage) -> (f32, f32) {
    let total = (gray.width() as u64 * gray.height() as u64).max(1) as f64;

    let mut sum = 0.0f64;
    for pixel in gray.pixels() {
        sum += pixel.0[0] as f64;
    }
    let mean = sum / total;

    let mut variance = 0.0f64;
    for pixel in gray.pixels() {
        let delta = pixel.0[0] as f64 - mean;
        variance += delta * delta;
    }
    variance /= total;

    (mean as f32, variance.sqrt() as f32)
}

/// Edge-energy estimate: mean Sobel gradient magnitude, normalized
fn sharpness_score(gray: &GrayImage) -> f32 {
    let horizontal = horizontal_sobel(gray);
    let vertical = vertical_sobel(gray);
    let total = (gray.width() as u64 * gray.height() as u64).max(1) as f64;

    let mut sum = 0.0f64;
    for (h, v) in horizontal.pixels().zip(vertical.pixels()) {
        let dx = h.0[0] as f64;
        let dy = v.0[0] as f64;
        sum += (dx * dx + dy * dy).sqrt();
    }
    let mean = (sum / total) as f32;

    (mean / SHARPNESS_FULL_SCALE).clamp(0.0, 1.0)
}

/// Full score inside the usable exposure band, linear falloff outside
fn brightness_score(mean_norm: f32) -> f32 {
    if mean_norm < DARK_MEAN_FLOOR {
        (mean_norm / DARK_MEAN_FLOOR).clamp(0.0, 1.0)
    } else if mean_norm > BRIGHT_MEAN_CEILING {
        ((1.0 - mean_norm) / (1.0 - BRIGHT_MEAN_CEILING)).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

fn build_recommendations(
    dpi: u32,
    sharpness: f32,
    contrast: f32,
    mean_norm: f32,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if dpi < DPI_FLOOR {
        recommendations.push(
            "Image resolution is low. For better OCR results, scan at 300 DPI or higher."
                .to_string(),
        );
    }
    if sharpness < SHARPNESS_RECOMMEND_FLOOR {
        recommendations.push(
            "Image appears blurry. Hold the camera steady or use a flatbed scanner.".to_string(),
        );
    }
    if mean_norm < DARK_MEAN_FLOOR {
        recommendations
            .push("Image is too dark. Increase lighting or scanner brightness.".to_string());
    }
    if mean_norm > BRIGHT_MEAN_CEILING {
        recommendations
            .push("Image is overexposed. Reduce lighting or scanner brightness.".to_string());
    }
    if contrast < CONTRAST_RECOMMEND_FLOOR {
        recommendations
            .push("Image contrast is low. Increase contrast for clearer text.".to_string());
    }

    recommendations
}
