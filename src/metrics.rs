//! Image quality metrics.
//!
//! Mean squared error and peak signal to noise ratio between two intensity
//! images. Differently sized inputs are compared over their common top
//! left region, which keeps before/after comparisons usable when a
//! pipeline changes the framing.

use ndarray::ArrayView2;

use crate::error::{EngineError, EngineResult};

/// Mean squared error over the common top left region.
///
/// # Arguments
/// * `a` - First intensity image
/// * `b` - Second intensity image
///
/// # Returns
/// Mean of the squared per pixel differences, 0.0 for identical images
pub fn mse(a: ArrayView2<u8>, b: ArrayView2<u8>) -> EngineResult<f64> {
    let height = a.dim().0.min(b.dim().0);
    let width = a.dim().1.min(b.dim().1);
    if height == 0 || width == 0 {
        return Err(EngineError::input("images share no region to compare"));
    }

    let mut sum = 0.0f64;
    for y in 0..height {
        for x in 0..width {
            let diff = a[[y, x]] as f64 - b[[y, x]] as f64;
            sum += diff * diff;
        }
    }
    Ok(sum / (height * width) as f64)
}

/// Peak signal to noise ratio in decibels.
///
/// Positive infinity for identical images; typical lossy processing lands
/// somewhere between 10 and 50 dB.
pub fn psnr(a: ArrayView2<u8>, b: ArrayView2<u8>) -> EngineResult<f64> {
    let error = mse(a, b)?;
    if error == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(20.0 * 255.0f64.log10() - 10.0 * error.log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use ndarray::Array2;

    #[test]
    fn test_mse_identical_is_zero() {
        let img = Array2::from_elem((8, 8), 42u8);
        let error = mse(img.view(), img.view()).unwrap();
        assert_eq!(error, 0.0);
    }

    #[test]
    fn test_mse_known_difference() {
        let a = Array2::<u8>::zeros((3, 3));
        let b = Array2::from_elem((3, 3), 10u8);

        let error = mse(a.view(), b.view()).unwrap();

        assert!((error - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_mse_crops_to_common_region() {
        // 4x4 zeros against 2x6 tens: the comparison covers the 2x4
        // overlap, all at distance 10
        let a = Array2::<u8>::zeros((4, 4));
        let b = Array2::from_elem((2, 6), 10u8);

        let error = mse(a.view(), b.view()).unwrap();

        assert!((error - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_mse_rejects_empty_overlap() {
        let a = Array2::<u8>::zeros((0, 4));
        let b = Array2::from_elem((4, 4), 1u8);
        let err = mse(a.view(), b.view()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_psnr_identical_is_infinite() {
        let img = Array2::from_elem((4, 4), 7u8);
        let ratio = psnr(img.view(), img.view()).unwrap();
        assert!(ratio.is_infinite() && ratio > 0.0);
    }

    #[test]
    fn test_psnr_known_value() {
        // MSE 100 gives 20 log10(255) - 20 = 28.1308 dB
        let a = Array2::<u8>::zeros((3, 3));
        let b = Array2::from_elem((3, 3), 10u8);

        let ratio = psnr(a.view(), b.view()).unwrap();

        assert!((ratio - 28.1308).abs() < 1e-3);
    }

    #[test]
    fn test_psnr_decreases_with_distortion() {
        let base = Array2::from_elem((8, 8), 100u8);
        let near = Array2::from_elem((8, 8), 105u8);
        let far = Array2::from_elem((8, 8), 160u8);

        let near_ratio = psnr(base.view(), near.view()).unwrap();
        let far_ratio = psnr(base.view(), far.view()).unwrap();

        assert!(near_ratio > far_ratio);
    }
}
