//! Windowed adaptive equalization over a sample point lattice.
//!
//! Sample points sit every `step_size` pixels along both axes. Each point
//! owns the unclipped equalization table of a `window_size` sided window
//! centered on it, and every pixel remaps through the table of its nearest
//! sample point. Unlike the tile grid this adapts smoothly at a chosen
//! granularity, at the cost of building far more tables.

use ndarray::{s, Array2, ArrayView2};
use rayon::prelude::*;
use tracing::debug;

use crate::equalize::advisor::advise_ahe_params;
use crate::equalize::check_nonempty;
use crate::equalize::histogram::region_lut;
use crate::error::{EngineError, EngineResult};
use crate::resample::{resize_bilinear, resize_nearest};

/// Largest pixel count processed at full resolution. Bigger inputs are
/// shrunk bilinearly, equalized, then scaled back up nearest neighbor.
pub const AHE_PIXEL_CEILING: usize = 1_000_000;

/// Adaptive equalization with one histogram window per lattice point.
///
/// Parameters left as `None` are filled in by
/// [`advise_ahe_params`](crate::equalize::advise_ahe_params); the advisor
/// runs at most once per call and always sees the full resolution image.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `window_size` - Side length of each sampling window
/// * `step_size` - Lattice spacing between sample points
///
/// # Returns
/// Remapped image of the same dimensions, even when the pixel ceiling
/// forces internal resampling
pub fn equalize_ahe(
    image: ArrayView2<u8>,
    window_size: Option<usize>,
    step_size: Option<usize>,
) -> EngineResult<Array2<u8>> {
    check_nonempty(&image)?;

    let (window, step) = match (window_size, step_size) {
        (Some(window), Some(step)) => (window, step),
        _ => {
            let advice = advise_ahe_params(image)?;
            (
                window_size.unwrap_or(advice.window_size),
                step_size.unwrap_or(advice.step_size),
            )
        }
    };
    if window == 0 {
        return Err(EngineError::parameter("window_size must be at least 1"));
    }
    if step == 0 {
        return Err(EngineError::parameter("step_size must be at least 1"));
    }

    let (height, width) = image.dim();
    if height * width > AHE_PIXEL_CEILING {
        let scale = (AHE_PIXEL_CEILING as f64 / (height * width) as f64).sqrt();
        let small_h = ((height as f64 * scale) as usize).max(1);
        let small_w = ((width as f64 * scale) as usize).max(1);
        debug!(height, width, small_h, small_w, "over pixel ceiling, resampling");

        let small = resize_bilinear(image, small_h, small_w)?;
        let equalized = equalize_lattice(small.view(), window, step);
        return resize_nearest(equalized.view(), height, width);
    }

    Ok(equalize_lattice(image, window, step))
}

/// Index of the nearest lattice point for one coordinate, in O(1).
///
/// Points sit at multiples of `step`; a coordinate exactly between two
/// points resolves to the earlier one. Clamped to the last existing point.
fn nearest_lattice_index(coord: usize, step: usize, points: usize) -> usize {
    ((coord + (step - 1) / 2) / step).min(points - 1)
}

fn equalize_lattice(image: ArrayView2<u8>, window: usize, step: usize) -> Array2<u8> {
    let (height, width) = image.dim();
    let rows = height.div_ceil(step);
    let cols = width.div_ceil(step);
    let half = window / 2;

    // One unclipped table per lattice point, built in parallel. Windows
    // are truncated at the image borders, never shifted inward.
    let luts: Vec<[u8; 256]> = (0..rows * cols)
        .into_par_iter()
        .map(|point| {
            let cy = ((point / cols) * step) as isize;
            let cx = ((point % cols) * step) as isize;
            let y0 = (cy - half as isize).max(0) as usize;
            let y1 = ((cy - half as isize + window as isize) as usize).min(height);
            let x0 = (cx - half as isize).max(0) as usize;
            let x1 = ((cx - half as isize + window as isize) as usize).min(width);
            region_lut(image.slice(s![y0..y1, x0..x1]), None)
        })
        .collect();

    let mut output = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        let row = nearest_lattice_index(y, step, rows);
        for x in 0..width {
            let col = nearest_lattice_index(x, step, cols);
            output[[y, x]] = luts[row * cols + col][image[[y, x]] as usize];
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equalize::global::equalize_global;
    use ndarray::Array2;

    /// Reference lookup: scan every point, keep the first at minimal
    /// distance.
    fn nearest_by_scan(coord: usize, step: usize, points: usize) -> usize {
        let mut best = 0;
        let mut best_dist = usize::MAX;
        for p in 0..points {
            let dist = (p * step).abs_diff(coord);
            if dist < best_dist {
                best = p;
                best_dist = dist;
            }
        }
        best
    }

    #[test]
    fn test_nearest_lattice_index_matches_linear_scan() {
        for &step in &[1usize, 2, 3, 4, 5, 7, 16] {
            for dim in 1usize..60 {
                let points = dim.div_ceil(step);
                for coord in 0..dim {
                    assert_eq!(
                        nearest_lattice_index(coord, step, points),
                        nearest_by_scan(coord, step, points),
                        "coord {} step {} dim {}",
                        coord,
                        step,
                        dim
                    );
                }
            }
        }
    }

    #[test]
    fn test_ahe_flat_image_unchanged() {
        let img = Array2::from_elem((40, 40), 90u8);
        let out = equalize_ahe(img.view(), Some(16), Some(8)).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_ahe_preserves_shape() {
        let mut img = Array2::<u8>::zeros((37, 29));
        for y in 0..37 {
            for x in 0..29 {
                img[[y, x]] = ((x * 11 + y * 17) % 256) as u8;
            }
        }

        let out = equalize_ahe(img.view(), Some(16), Some(4)).unwrap();

        assert_eq!(out.dim(), (37, 29));
    }

    #[test]
    fn test_ahe_single_window_covering_image_matches_global() {
        // Step larger than the image leaves one sample point at the
        // origin; a window of 64 covers all of a 20x20 image, so the
        // single table equals the global unclipped one
        let mut img = Array2::<u8>::zeros((20, 20));
        for y in 0..20 {
            for x in 0..20 {
                img[[y, x]] = ((y * 20 + x) % 240) as u8;
            }
        }

        let windowed = equalize_ahe(img.view(), Some(64), Some(100)).unwrap();
        let global = equalize_global(img.view()).unwrap();

        assert_eq!(windowed, global);
    }

    #[test]
    fn test_ahe_adapts_locally() {
        // Dark left half, bright right half with mild texture. Small
        // windows equalize each half against its own statistics, so both
        // halves spread out; the borders of the two halves must differ.
        let mut img = Array2::<u8>::zeros((48, 48));
        for y in 0..48 {
            for x in 0..48 {
                let base = if x < 24 { 40 } else { 180 };
                img[[y, x]] = (base + ((x + y) % 8)) as u8;
            }
        }

        let out = equalize_ahe(img.view(), Some(12), Some(4)).unwrap();

        // Each half stretches its own 8 level texture across the range
        assert!(out[[24, 2]] > img[[24, 2]] || out[[24, 5]] > img[[24, 5]]);
        assert_eq!(out.dim(), (48, 48));
    }

    #[test]
    fn test_ahe_over_ceiling_keeps_dimensions_and_flatness() {
        // 1.1M pixels exceeds the ceiling and takes the resampling path;
        // a flat image must still come back flat and full size
        let img = Array2::from_elem((1100, 1000), 77u8);

        let out = equalize_ahe(img.view(), Some(32), Some(16)).unwrap();

        assert_eq!(out.dim(), (1100, 1000));
        assert!(out.iter().all(|&px| px == 77));
    }

    #[test]
    fn test_ahe_advisor_fills_missing_parameters() {
        let img = Array2::from_elem((40, 40), 50u8);
        let out = equalize_ahe(img.view(), None, None).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_ahe_rejects_zero_window() {
        let img = Array2::from_elem((16, 16), 1u8);
        let err = equalize_ahe(img.view(), Some(0), Some(4)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn test_ahe_rejects_zero_step() {
        let img = Array2::from_elem((16, 16), 1u8);
        let err = equalize_ahe(img.view(), Some(16), Some(0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn test_ahe_rejects_empty() {
        let img = Array2::<u8>::zeros((0, 0));
        let err = equalize_ahe(img.view(), Some(16), Some(4)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }
}
