//! Image resampling.
//!
//! Bilinear interpolation for smooth downscaling and nearest neighbor for
//! upscaling. The windowed equalizer pairs the two when an input exceeds
//! its pixel ceiling: shrink bilinearly, equalize, then blow the result
//! back up to the original dimensions.

use ndarray::{Array2, ArrayView2};

use crate::error::{EngineError, EngineResult};

fn check_resize(image: &ArrayView2<u8>, new_height: usize, new_width: usize) -> EngineResult<()> {
    let (height, width) = image.dim();
    if height == 0 || width == 0 {
        return Err(EngineError::input(format!(
            "expected a non-empty image, got {}x{}",
            height, width
        )));
    }
    if new_height == 0 || new_width == 0 {
        return Err(EngineError::parameter(format!(
            "target dimensions must be positive, got {}x{}",
            new_height, new_width
        )));
    }
    Ok(())
}

/// Resize with bilinear interpolation.
///
/// Sample positions are pixel center aligned, so resizing to the same
/// dimensions reproduces the input exactly.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `new_height` - Target height in pixels
/// * `new_width` - Target width in pixels
pub fn resize_bilinear(
    image: ArrayView2<u8>,
    new_height: usize,
    new_width: usize,
) -> EngineResult<Array2<u8>> {
    check_resize(&image, new_height, new_width)?;
    let (height, width) = image.dim();
    let scale_y = height as f64 / new_height as f64;
    let scale_x = width as f64 / new_width as f64;

    let mut output = Array2::<u8>::zeros((new_height, new_width));
    for y in 0..new_height {
        let sy = ((y as f64 + 0.5) * scale_y - 0.5).max(0.0);
        let y0 = (sy as usize).min(height - 1);
        let y1 = (y0 + 1).min(height - 1);
        let fy = sy - y0 as f64;

        for x in 0..new_width {
            let sx = ((x as f64 + 0.5) * scale_x - 0.5).max(0.0);
            let x0 = (sx as usize).min(width - 1);
            let x1 = (x0 + 1).min(width - 1);
            let fx = sx - x0 as f64;

            let top = image[[y0, x0]] as f64 * (1.0 - fx) + image[[y0, x1]] as f64 * fx;
            let bottom = image[[y1, x0]] as f64 * (1.0 - fx) + image[[y1, x1]] as f64 * fx;
            let value = top * (1.0 - fy) + bottom * fy;
            output[[y, x]] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(output)
}

/// Resize with nearest neighbor sampling.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `new_height` - Target height in pixels
/// * `new_width` - Target width in pixels
pub fn resize_nearest(
    image: ArrayView2<u8>,
    new_height: usize,
    new_width: usize,
) -> EngineResult<Array2<u8>> {
    check_resize(&image, new_height, new_width)?;
    let (height, width) = image.dim();

    let mut output = Array2::<u8>::zeros((new_height, new_width));
    for y in 0..new_height {
        let sy = (y * height / new_height).min(height - 1);
        for x in 0..new_width {
            let sx = (x * width / new_width).min(width - 1);
            output[[y, x]] = image[[sy, sx]];
        }
    }
    Ok(output)
}
