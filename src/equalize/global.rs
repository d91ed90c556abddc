//! Whole image histogram equalization.

use ndarray::{Array2, ArrayView2};

use crate::equalize::check_nonempty;
use crate::equalize::histogram::{apply_lut, region_lut};
use crate::error::EngineResult;

/// Equalize the full image through a single histogram.
///
/// Spreads the intensity distribution over the whole `[0, 255]` range. One
/// table for the entire image, so local contrast in small regions is not
/// considered; the tiled and windowed equalizers exist for that.
///
/// # Arguments
/// * `image` - Single channel intensity image
///
/// # Returns
/// Remapped image of the same dimensions
pub fn equalize_global(image: ArrayView2<u8>) -> EngineResult<Array2<u8>> {
    check_nonempty(&image)?;
    let lut = region_lut(image, None);
    Ok(apply_lut(image, &lut))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use ndarray::Array2;

    #[test]
    fn test_equalize_global_uniform_ramp_is_identity() {
        // Every level occupies one full row, so the CDF is already linear
        let mut img = Array2::<u8>::zeros((256, 256));
        for y in 0..256 {
            for x in 0..256 {
                img[[y, x]] = y as u8;
            }
        }

        let out = equalize_global(img.view()).unwrap();

        assert_eq!(out, img);
    }

    #[test]
    fn test_equalize_global_stretches_two_levels() {
        let mut img = Array2::<u8>::zeros((4, 4));
        for x in 0..4 {
            img[[0, x]] = 100;
            img[[1, x]] = 100;
            img[[2, x]] = 150;
            img[[3, x]] = 150;
        }

        let out = equalize_global(img.view()).unwrap();

        assert_eq!(out[[0, 0]], 0);
        assert_eq!(out[[3, 3]], 255);
    }

    #[test]
    fn test_equalize_global_flat_image_unchanged() {
        let img = Array2::from_elem((16, 16), 128u8);
        let out = equalize_global(img.view()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_equalize_global_preserves_shape() {
        let mut img = Array2::<u8>::zeros((13, 37));
        for y in 0..13 {
            for x in 0..37 {
                img[[y, x]] = ((y * 37 + x) % 251) as u8;
            }
        }

        let out = equalize_global(img.view()).unwrap();

        assert_eq!(out.dim(), (13, 37));
    }

    #[test]
    fn test_equalize_global_rejects_empty() {
        let img = Array2::<u8>::zeros((0, 5));
        let err = equalize_global(img.view()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }
}
