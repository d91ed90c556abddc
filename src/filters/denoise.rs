//! Edge preserving denoise.

use ndarray::{Array2, ArrayView2};

/// Bilateral denoise.
///
/// Weighted neighborhood average where the weight falls off with both
/// spatial distance and intensity difference. Noise inside a flat region
/// averages away while pixels across a strong edge contribute almost
/// nothing, so the edge survives.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `radius` - Neighborhood radius in pixels
/// * `sigma_space` - Spatial falloff
/// * `sigma_color` - Intensity falloff
///
/// # Returns
/// Denoised image of the same dimensions
pub fn bilateral_denoise(
    image: ArrayView2<u8>,
    radius: usize,
    sigma_space: f32,
    sigma_color: f32,
) -> Array2<u8> {
    let (height, width) = image.dim();
    let sigma_space = sigma_space.max(0.1);
    let sigma_color = sigma_color.max(0.1);
    let r = radius as isize;

    let mut output = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let center = image[[y, x]] as f32;
            let mut sum = 0.0f32;
            let mut weight_sum = 0.0f32;

            for dy in -r..=r {
                let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                for dx in -r..=r {
                    let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                    let neighbor = image[[sy, sx]] as f32;

                    let spatial_sq = (dy * dy + dx * dx) as f32;
                    let spatial = (-spatial_sq / (2.0 * sigma_space * sigma_space)).exp();
                    let diff = center - neighbor;
                    let range = (-diff * diff / (2.0 * sigma_color * sigma_color)).exp();

                    let weight = spatial * range;
                    sum += neighbor * weight;
                    weight_sum += weight;
                }
            }

            // The center pixel always carries weight 1, so the sum is
            // never zero
            output[[y, x]] = (sum / weight_sum).round().clamp(0.0, 255.0) as u8;
        }
    }
    output
}
