//! Separable Gaussian blur for single channel images.
//!
//! Kernel sizing follows the OpenCV conventions the pipeline constants
//! were tuned against: an odd `ksize` with sigma derived from it when
//! `sigma <= 0`, or `ksize == 0` with the size derived from sigma.

use ndarray::{Array2, ArrayView2};

use crate::error::{EngineError, EngineResult};

/// Sigma implied by a kernel size when the caller passes `sigma <= 0`.
fn sigma_for_ksize(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Resolve the kernel size and sigma pair, deriving whichever is missing.
fn resolve_kernel(ksize: usize, sigma: f32) -> EngineResult<(usize, f32)> {
    if ksize == 0 {
        if sigma <= 0.0 {
            return Err(EngineError::parameter(
                "either ksize or sigma must be positive",
            ));
        }
        let derived = ((sigma * 6.0 + 1.0).round() as usize) | 1;
        return Ok((derived, sigma));
    }
    if ksize % 2 == 0 {
        return Err(EngineError::parameter(format!(
            "ksize must be odd, got {}",
            ksize
        )));
    }
    let sigma = if sigma <= 0.0 {
        sigma_for_ksize(ksize)
    } else {
        sigma
    };
    Ok((ksize, sigma))
}

/// Normalized 1D Gaussian kernel.
fn gaussian_kernel_1d(ksize: usize, sigma: f32) -> Vec<f32> {
    let half = (ksize / 2) as f32;
    let mut kernel: Vec<f32> = (0..ksize)
        .map(|i| {
            let x = i as f32 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }
    kernel
}

/// Separable Gaussian blur with f32 output, for callers that keep
/// processing before quantizing. Borders clamp to the edge pixel.
pub(crate) fn gaussian_blur_f32(
    image: ArrayView2<u8>,
    ksize: usize,
    sigma: f32,
) -> EngineResult<Array2<f32>> {
    let (ksize, sigma) = resolve_kernel(ksize, sigma)?;
    let (height, width) = image.dim();
    let kernel = gaussian_kernel_1d(ksize, sigma);
    let half = (kernel.len() / 2) as isize;

    let mut temp = Array2::<f32>::zeros((height, width));
    let mut result = Array2::<f32>::zeros((height, width));

    // Horizontal pass
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - half).clamp(0, width as isize - 1) as usize;
                sum += image[[y, sx]] as f32 * weight;
            }
            temp[[y, x]] = sum;
        }
    }

    // Vertical pass
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - half).clamp(0, height as isize - 1) as usize;
                sum += temp[[sy, x]] * weight;
            }
            result[[y, x]] = sum;
        }
    }

    Ok(result)
}

/// Separable Gaussian blur.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `ksize` - Odd kernel size, or 0 to derive it from `sigma`
/// * `sigma` - Gaussian sigma, or a value <= 0 to derive it from `ksize`
///
/// # Returns
/// Blurred image of the same dimensions
pub fn gaussian_blur(image: ArrayView2<u8>, ksize: usize, sigma: f32) -> EngineResult<Array2<u8>> {
    let blurred = gaussian_blur_f32(image, ksize, sigma)?;
    Ok(blurred.mapv(|v| v.round().clamp(0.0, 255.0) as u8))
}
