//! Tile partitioned, contrast limited equalization.
//!
//! The image is cut into a `grid_size x grid_size` lattice of tiles. Each
//! tile gets its own clipped histogram and remaps only its own pixels, so
//! the same input value can land on different outputs across a tile border.
//! Tiles are not blended; visible seams are part of this operation's
//! contract and callers who need smooth transitions use the windowed
//! equalizer instead.

use ndarray::{s, Array2, ArrayView2};
use rayon::prelude::*;

use crate::equalize::check_nonempty;
use crate::equalize::histogram::{clip_limit_for, region_lut};
use crate::error::{EngineError, EngineResult};

/// Span of tile `index` along one axis.
///
/// The first `grid - 1` tiles are exactly `tile_len` long; the last one
/// absorbs the division remainder and runs to `dim`.
fn tile_span(index: usize, tile_len: usize, grid: usize, dim: usize) -> (usize, usize) {
    let start = index * tile_len;
    let end = if index + 1 == grid { dim } else { start + tile_len };
    (start, end)
}

/// Contrast limited adaptive equalization over a tile grid.
///
/// Each tile clips its histogram at `floor(clip_factor * tile_pixels / 256)`
/// before normalization, which caps how much any single intensity can be
/// stretched and keeps noise in near flat tiles from being amplified.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `clip_factor` - Histogram ceiling as a multiple of the mean bin count
/// * `grid_size` - Number of tiles along each axis
///
/// # Returns
/// Remapped image of the same dimensions
pub fn equalize_clahe(
    image: ArrayView2<u8>,
    clip_factor: f32,
    grid_size: usize,
) -> EngineResult<Array2<u8>> {
    check_nonempty(&image)?;
    let (height, width) = image.dim();

    if grid_size == 0 {
        return Err(EngineError::parameter("grid_size must be at least 1"));
    }
    let tile_h = height / grid_size;
    let tile_w = width / grid_size;
    if tile_h == 0 || tile_w == 0 {
        return Err(EngineError::parameter(format!(
            "grid_size {} produces empty tiles for a {}x{} image",
            grid_size, height, width
        )));
    }

    // One clipped table per tile, built in parallel
    let luts: Vec<[u8; 256]> = (0..grid_size * grid_size)
        .into_par_iter()
        .map(|tile| {
            let (y0, y1) = tile_span(tile / grid_size, tile_h, grid_size, height);
            let (x0, x1) = tile_span(tile % grid_size, tile_w, grid_size, width);
            let region = image.slice(s![y0..y1, x0..x1]);
            let limit = clip_limit_for(clip_factor, region.len());
            region_lut(region, Some(limit))
        })
        .collect();

    let mut output = Array2::<u8>::zeros((height, width));
    for ti in 0..grid_size {
        let (y0, y1) = tile_span(ti, tile_h, grid_size, height);
        for tj in 0..grid_size {
            let (x0, x1) = tile_span(tj, tile_w, grid_size, width);
            let lut = &luts[ti * grid_size + tj];
            for y in y0..y1 {
                for x in x0..x1 {
                    output[[y, x]] = lut[image[[y, x]] as usize];
                }
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equalize::histogram::apply_lut;
    use ndarray::Array2;

    #[test]
    fn test_clahe_flat_image_unchanged() {
        // Clip limit floors to 0 here; the fully clipped histogram must
        // still pass flat tiles through untouched
        let img = Array2::from_elem((64, 64), 128u8);
        let out = equalize_clahe(img.view(), 2.0, 8).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_clahe_preserves_shape_with_remainder() {
        // 70 and 50 do not divide by 8; the last row/column of tiles
        // absorbs the leftovers
        let mut img = Array2::<u8>::zeros((70, 50));
        for y in 0..70 {
            for x in 0..50 {
                img[[y, x]] = ((x * 5 + y * 3) % 256) as u8;
            }
        }

        let out = equalize_clahe(img.view(), 2.5, 8).unwrap();

        assert_eq!(out.dim(), (70, 50));
    }

    #[test]
    fn test_clahe_remainder_tiles_are_covered() {
        // Flat input over a non-dividing shape: any pixel the tile loop
        // missed would still hold the zero it was allocated with
        let img = Array2::from_elem((70, 50), 60u8);
        let out = equalize_clahe(img.view(), 2.5, 8).unwrap();
        assert!(out.iter().all(|&px| px == 60));
    }

    #[test]
    fn test_clahe_grid_one_matches_clipped_global() {
        let mut img = Array2::<u8>::zeros((32, 32));
        for y in 0..32 {
            for x in 0..32 {
                img[[y, x]] = ((y * 32 + x) % 200) as u8;
            }
        }

        let out = equalize_clahe(img.view(), 8.0, 1).unwrap();

        let limit = clip_limit_for(8.0, img.len());
        let lut = region_lut(img.view(), Some(limit));
        let expected = apply_lut(img.view(), &lut);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_clahe_same_value_differs_across_seam() {
        // Top left tile holds {0, 100}, top right {100, 255}. The shared
        // value 100 is the brightest on one side of the seam and the
        // darkest on the other.
        let mut img = Array2::<u8>::zeros((8, 8));
        for y in 0..8 {
            for x in 0..8 {
                let (low, high) = if x < 4 { (0, 100) } else { (100, 255) };
                img[[y, x]] = if (x + y) % 2 == 0 { low } else { high };
            }
        }

        let out = equalize_clahe(img.view(), 32.0, 2).unwrap();

        assert_eq!(img[[0, 3]], 100);
        assert_eq!(img[[0, 4]], 100);
        assert_eq!(out[[0, 3]], 255);
        assert_eq!(out[[0, 4]], 0);
    }

    #[test]
    fn test_clahe_clipping_limits_stretch() {
        // Dominant dark level with a few bright outliers; a tight clip
        // keeps the dominant level from being pushed to the top
        let mut img = Array2::from_elem((64, 64), 20u8);
        img[[0, 0]] = 200;
        img[[0, 1]] = 220;
        img[[0, 2]] = 240;

        let gentle = equalize_clahe(img.view(), 200.0, 1).unwrap();
        let tight = equalize_clahe(img.view(), 4.0, 1).unwrap();

        assert!(tight[[32, 32]] < gentle[[32, 32]]);
    }

    #[test]
    fn test_clahe_rejects_zero_grid() {
        let img = Array2::from_elem((16, 16), 1u8);
        let err = equalize_clahe(img.view(), 2.0, 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn test_clahe_rejects_grid_larger_than_image() {
        let img = Array2::from_elem((4, 4), 1u8);
        let err = equalize_clahe(img.view(), 2.0, 8).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn test_clahe_rejects_empty() {
        let img = Array2::<u8>::zeros((0, 0));
        let err = equalize_clahe(img.view(), 2.0, 8).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }
}
