//! Basic pixel arithmetic.

use ndarray::{Array2, ArrayView2};

use crate::error::{EngineError, EngineResult};

/// Stretch the intensity range linearly onto `[lo, hi]`.
///
/// The darkest input level lands on `lo`, the brightest on `hi`. A flat
/// image has no range to stretch and maps entirely to `lo`.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `lo` - Output value for the darkest input level
/// * `hi` - Output value for the brightest input level
pub fn normalize_minmax(image: ArrayView2<u8>, lo: u8, hi: u8) -> Array2<u8> {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for &px in image.iter() {
        min = min.min(px);
        max = max.max(px);
    }
    if min >= max {
        return Array2::from_elem(image.raw_dim(), lo);
    }

    let scale = (hi as f32 - lo as f32) / (max as f32 - min as f32);
    image.map(|&px| {
        let v = lo as f32 + (px as f32 - min as f32) * scale;
        v.round().clamp(0.0, 255.0) as u8
    })
}

/// Absolute per pixel difference of two images of identical dimensions.
pub fn absdiff(a: ArrayView2<u8>, b: ArrayView2<u8>) -> EngineResult<Array2<u8>> {
    if a.dim() != b.dim() {
        return Err(EngineError::input(format!(
            "dimension mismatch: {:?} vs {:?}",
            a.dim(),
            b.dim()
        )));
    }

    let (height, width) = a.dim();
    let mut output = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            output[[y, x]] = a[[y, x]].abs_diff(b[[y, x]]);
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_normalize_stretches_to_target_range() {
        let img = Array2::from_shape_vec((1, 3), vec![50u8, 75, 100]).unwrap();
        let out = normalize_minmax(img.view(), 30, 220);
        assert_eq!(out.as_slice().unwrap(), &[30, 125, 220]);
    }

    #[test]
    fn test_normalize_flat_image_maps_to_lo() {
        let img = Array2::from_elem((4, 4), 99u8);
        let out = normalize_minmax(img.view(), 30, 220);
        assert!(out.iter().all(|&px| px == 30));
    }

    #[test]
    fn test_normalize_full_range_identity() {
        let mut img = Array2::<u8>::zeros((1, 256));
        for x in 0..256 {
            img[[0, x]] = x as u8;
        }

        let out = normalize_minmax(img.view(), 0, 255);

        assert_eq!(out, img);
    }

    #[test]
    fn test_absdiff_known_values() {
        let a = Array2::from_shape_vec((1, 3), vec![10u8, 200, 128]).unwrap();
        let b = Array2::from_shape_vec((1, 3), vec![30u8, 100, 128]).unwrap();

        let out = absdiff(a.view(), b.view()).unwrap();

        assert_eq!(out.as_slice().unwrap(), &[20, 100, 0]);
    }

    #[test]
    fn test_absdiff_is_symmetric() {
        let a = Array2::from_shape_vec((2, 2), vec![1u8, 250, 7, 99]).unwrap();
        let b = Array2::from_shape_vec((2, 2), vec![200u8, 3, 7, 120]).unwrap();

        let ab = absdiff(a.view(), b.view()).unwrap();
        let ba = absdiff(b.view(), a.view()).unwrap();

        assert_eq!(ab, ba);
    }

    #[test]
    fn test_absdiff_rejects_shape_mismatch() {
        let a = Array2::<u8>::zeros((2, 3));
        let b = Array2::<u8>::zeros((3, 2));
        assert!(absdiff(a.view(), b.view()).is_err());
    }
}
