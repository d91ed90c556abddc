//! Sharpening for single channel images.

use ndarray::{Array2, ArrayView2};

use crate::error::EngineResult;
use crate::filters::blur::gaussian_blur_f32;

/// 3x3 kernel sharpen.
///
/// Convolves with the eight neighbor kernel: center weight
/// `1 + 8 * amount`, every neighbor `-amount`. An amount of 1.0 gives the
/// classic `[[-1,-1,-1],[-1,9,-1],[-1,-1,-1]]` kernel; 0.0 is the
/// identity. Borders clamp to the edge pixel.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `amount` - Sharpening strength
pub fn sharpen3x3(image: ArrayView2<u8>, amount: f32) -> Array2<u8> {
    let (height, width) = image.dim();
    let center = 1.0 + 8.0 * amount;

    let mut output = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let mut sum = image[[y, x]] as f32 * center;
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    if dy == 0 && dx == 0 {
                        continue;
                    }
                    let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                    let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                    sum -= image[[sy, sx]] as f32 * amount;
                }
            }
            output[[y, x]] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }
    output
}

/// Unsharp mask: `(1 + amount) * image - amount * blurred`.
///
/// Boosts whatever the blur removes. Gentler and more controllable than
/// the 3x3 kernel because the blur radius picks the detail scale.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `ksize` - Blur kernel size, or 0 to derive it from `sigma`
/// * `sigma` - Blur sigma, or a value <= 0 to derive it from `ksize`
/// * `amount` - Strength of the high frequency boost
///
/// # Returns
/// Sharpened image of the same dimensions
pub fn unsharp_mask(
    image: ArrayView2<u8>,
    ksize: usize,
    sigma: f32,
    amount: f32,
) -> EngineResult<Array2<u8>> {
    let blurred = gaussian_blur_f32(image, ksize, sigma)?;
    let (height, width) = image.dim();

    let mut output = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let v = (1.0 + amount) * image[[y, x]] as f32 - amount * blurred[[y, x]];
            output[[y, x]] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn vertical_edge() -> Array2<u8> {
        let mut img = Array2::<u8>::zeros((8, 8));
        for y in 0..8 {
            for x in 0..8 {
                img[[y, x]] = if x < 4 { 100 } else { 150 };
            }
        }
        img
    }

    #[test]
    fn test_sharpen_zero_amount_is_identity() {
        let img = vertical_edge();
        let out = sharpen3x3(img.view(), 0.0);
        assert_eq!(out, img);
    }

    #[test]
    fn test_sharpen_flat_image_unchanged() {
        let img = Array2::from_elem((8, 8), 90u8);
        let out = sharpen3x3(img.view(), 1.0);
        assert_eq!(out, img);
    }

    #[test]
    fn test_sharpen_overshoots_edge() {
        // At amount 0.5 the dark side of the edge drops to
        // 100 * 3 - 0.5 * (5 * 100 + 3 * 150) = 25 and the bright side
        // rises to 150 * 3 - 0.5 * (5 * 150 + 3 * 100) = 225
        let img = vertical_edge();
        let out = sharpen3x3(img.view(), 0.5);

        assert_eq!(out[[4, 3]], 25);
        assert_eq!(out[[4, 4]], 225);
        // Far field untouched
        assert_eq!(out[[4, 0]], 100);
        assert_eq!(out[[4, 7]], 150);
    }

    #[test]
    fn test_sharpen_clamps_extremes() {
        let mut img = Array2::from_elem((5, 5), 10u8);
        img[[2, 2]] = 250;

        let out = sharpen3x3(img.view(), 1.0);

        assert_eq!(out[[2, 2]], 255);
        assert_eq!(out[[2, 1]], 0);
    }

    #[test]
    fn test_unsharp_flat_image_unchanged() {
        let img = Array2::from_elem((12, 12), 123u8);
        let out = unsharp_mask(img.view(), 5, 0.0, 0.3).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_unsharp_increases_edge_contrast() {
        let img = vertical_edge();
        let out = unsharp_mask(img.view(), 5, 0.0, 0.5).unwrap();

        assert!(out[[4, 3]] < 100);
        assert!(out[[4, 4]] > 150);
    }

    #[test]
    fn test_unsharp_propagates_kernel_errors() {
        let img = vertical_edge();
        assert!(unsharp_mask(img.view(), 4, 0.0, 0.3).is_err());
    }
}
