//! Adaptive binarization.

use ndarray::{Array2, ArrayView2};

use crate::error::{EngineError, EngineResult};
use crate::filters::blur::gaussian_blur_f32;

/// Gaussian weighted adaptive threshold.
///
/// Each pixel is compared against the Gaussian weighted mean of its
/// `block_size` sided neighborhood, shifted down by `delta`: pixels above
/// `mean - delta` become 255, the rest 0. A per pixel threshold survives
/// uneven lighting that would defeat any single global cut.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `block_size` - Odd neighborhood side of at least 3
/// * `delta` - Offset subtracted from the local mean
///
/// # Returns
/// Binary image containing only 0 and 255
pub fn adaptive_threshold(
    image: ArrayView2<u8>,
    block_size: usize,
    delta: f32,
) -> EngineResult<Array2<u8>> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(EngineError::parameter(format!(
            "block_size must be an odd value of at least 3, got {}",
            block_size
        )));
    }

    let local_mean = gaussian_blur_f32(image, block_size, 0.0)?;
    let (height, width) = image.dim();

    let mut output = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            if image[[y, x]] as f32 > local_mean[[y, x]] - delta {
                output[[y, x]] = 255;
            }
        }
    }
    Ok(output)
}
