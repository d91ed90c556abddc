//! Ready made enhancement pipelines.
//!
//! Fixed compositions of the equalizers and support filters with tuned
//! constants, one per capture scenario: license plate crops, satellite
//! imagery, low light shots and degraded document scans. Each runs the
//! same steps every time; callers wanting different tuning compose the
//! building blocks directly.

use ndarray::{Array2, ArrayView2};
use tracing::debug;

use crate::equalize::equalize_clahe;
use crate::error::EngineResult;
use crate::filters::basic::{absdiff, normalize_minmax};
use crate::filters::blur::gaussian_blur;
use crate::filters::denoise::bilateral_denoise;
use crate::filters::sharpen::{sharpen3x3, unsharp_mask};
use crate::filters::threshold::adaptive_threshold;
use crate::pointwise::gamma_correction;

const PLATE_CLIP: f32 = 2.5;
const PLATE_GRID: usize = 8;
const PLATE_BLOCK: usize = 21;
const PLATE_DELTA: f32 = 8.0;

const SATELLITE_CLIP: f32 = 2.0;
const SATELLITE_GRID: usize = 16;

const LOW_LIGHT_GAMMA: f32 = 0.6;
const LOW_LIGHT_CLIP: f32 = 3.0;
const LOW_LIGHT_GRID: usize = 8;

const DOCUMENT_CLIP: f32 = 2.5;
const DOCUMENT_GRID: usize = 8;
const DOCUMENT_RANGE: (u8, u8) = (30, 220);
const DOCUMENT_BLOCK: usize = 21;
const DOCUMENT_DELTA: f32 = 10.0;

const UNSHARP_AMOUNT: f32 = 0.3;

/// Preprocess a license plate crop for OCR.
///
/// Contrast limited equalization, a light blur against the amplified
/// noise, then either a sharpen or, with `binary`, an adaptive threshold
/// producing a black and white image ready for a recognizer.
///
/// # Arguments
/// * `image` - Single channel plate crop
/// * `binary` - Swap the final sharpening for binarization
pub fn enhance_license_plate(image: ArrayView2<u8>, binary: bool) -> EngineResult<Array2<u8>> {
    let equalized = equalize_clahe(image, PLATE_CLIP, PLATE_GRID)?;
    let smoothed = gaussian_blur(equalized.view(), 3, 0.0)?;

    if binary {
        adaptive_threshold(smoothed.view(), PLATE_BLOCK, PLATE_DELTA)
    } else {
        Ok(sharpen3x3(smoothed.view(), 1.0))
    }
}

/// Enhance a satellite image band.
///
/// A fine tile grid resolves contrast across varied terrain; a gentle
/// unsharp restores the detail the equalization flattens.
pub fn enhance_satellite(image: ArrayView2<u8>) -> EngineResult<Array2<u8>> {
    let equalized = equalize_clahe(image, SATELLITE_CLIP, SATELLITE_GRID)?;
    unsharp_mask(equalized.view(), 5, 0.0, UNSHARP_AMOUNT)
}

/// Brighten and rebalance a low light capture.
///
/// Gamma lifts the shadows before equalization so the contrast limit
/// works with the lifted values; the final blur tones down the noise both
/// steps amplify.
pub fn enhance_low_light(image: ArrayView2<u8>) -> EngineResult<Array2<u8>> {
    let lifted = gamma_correction(image, LOW_LIGHT_GAMMA);
    let equalized = equalize_clahe(lifted.view(), LOW_LIGHT_CLIP, LOW_LIGHT_GRID)?;
    gaussian_blur(equalized.view(), 3, 0.0)
}

/// Background estimate kernel by image size; 0 means the image is too
/// small to estimate one.
fn background_ksize(height: usize, width: usize) -> usize {
    if height > 35 && width > 35 {
        35
    } else if height > 15 && width > 15 {
        15
    } else if height > 5 && width > 5 {
        5
    } else {
        0
    }
}

/// Restore a degraded document scan.
///
/// Estimates the uneven paper background with a large blur and subtracts
/// it, restretches what remains onto a printable range, then equalizes,
/// denoises and sharpens. `binary` adds a final adaptive threshold.
///
/// # Arguments
/// * `image` - Single channel document scan
/// * `binary` - Binarize the restored image
///
/// # Returns
/// Restored image, or black and white when `binary` is set
pub fn restore_document(image: ArrayView2<u8>, binary: bool) -> EngineResult<Array2<u8>> {
    let (height, width) = image.dim();

    let smoothed = if height > 5 && width > 5 {
        gaussian_blur(image, 3, 0.0)?
    } else {
        image.to_owned()
    };

    let ksize = background_ksize(height, width);
    debug!(ksize, "document background estimate");
    let background = if ksize > 0 {
        gaussian_blur(smoothed.view(), ksize, 0.0)?
    } else {
        smoothed.clone()
    };

    let foreground = absdiff(smoothed.view(), background.view())?;
    let stretched = normalize_minmax(foreground.view(), DOCUMENT_RANGE.0, DOCUMENT_RANGE.1);
    let equalized = equalize_clahe(stretched.view(), DOCUMENT_CLIP, DOCUMENT_GRID)?;
    let denoised = bilateral_denoise(equalized.view(), 3, 40.0, 40.0);
    let sharpened = unsharp_mask(denoised.view(), 0, 1.0, UNSHARP_AMOUNT)?;

    if binary {
        adaptive_threshold(sharpened.view(), DOCUMENT_BLOCK, DOCUMENT_DELTA)
    } else {
        Ok(sharpened)
    }
}
