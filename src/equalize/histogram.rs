//! Histogram statistics and remapping table construction.
//!
//! The building block every equalizer in this crate shares: count a 256 bin
//! histogram over a region, optionally clip and redistribute it, then
//! normalize its CDF into a 256 entry remapping table. The equalizers only
//! differ in which regions they feed through this sequence.

use ndarray::{Array2, ArrayView2};

// ============================================================================
// Histogram
// ============================================================================

/// Count the 256 bin intensity histogram of a region.
pub fn region_histogram(region: ArrayView2<u8>) -> [u32; 256] {
    let (height, width) = region.dim();
    let mut hist = [0u32; 256];

    for y in 0..height {
        for x in 0..width {
            hist[region[[y, x]] as usize] += 1;
        }
    }
    hist
}

// ============================================================================
// Clipping
// ============================================================================

/// Clip limit for a region: `floor(clip_factor * pixels / 256)`.
pub fn clip_limit_for(clip_factor: f32, pixels: usize) -> u32 {
    (clip_factor as f64 * pixels as f64 / 256.0).floor() as u32
}

/// Clip each bin to `limit` and redistribute the truncated mass.
///
/// The total excess is divided evenly across all 256 bins; the integer
/// remainder of that division is dropped. A limit of 0 zeroes the histogram
/// apart from the redistributed share.
pub fn clip_histogram(hist: &mut [u32; 256], limit: u32) {
    let mut excess = 0u64;
    for count in hist.iter_mut() {
        if *count > limit {
            excess += (*count - limit) as u64;
            *count = limit;
        }
    }

    let share = (excess / 256) as u32;
    if share > 0 {
        for count in hist.iter_mut() {
            *count += share;
        }
    }
}

// ============================================================================
// CDF normalization
// ============================================================================

/// Normalize a histogram's CDF into a remapping table.
///
/// Levels with a positive cumulative count map to
/// `round((cdf - cdf_min) * 255 / (cdf_max - cdf_min))`, where `cdf_min` is
/// the smallest positive cumulative value; levels below the first occupied
/// one map to 0. When the histogram has at most one occupied level the
/// normalization has no range to stretch (`cdf_max == cdf_min`) and the
/// table is the identity, so flat regions pass through unchanged.
pub fn equalization_lut(hist: &[u32; 256]) -> [u8; 256] {
    let mut cdf = [0u64; 256];
    let mut running = 0u64;
    for i in 0..256 {
        running += hist[i] as u64;
        cdf[i] = running;
    }

    let cdf_max = cdf[255];
    let cdf_min = cdf.iter().copied().find(|&v| v > 0).unwrap_or(0);

    let mut lut = [0u8; 256];
    if cdf_max == cdf_min {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }

    let range = (cdf_max - cdf_min) as f64;
    for i in 0..256 {
        if cdf[i] == 0 {
            continue;
        }
        let scaled = (cdf[i] - cdf_min) as f64 * 255.0 / range;
        lut[i] = scaled.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Build the remapping table for one region: histogram, optional clip and
/// redistribute, CDF normalization.
pub fn region_lut(region: ArrayView2<u8>, clip_limit: Option<u32>) -> [u8; 256] {
    let mut hist = region_histogram(region);
    if let Some(limit) = clip_limit {
        clip_histogram(&mut hist, limit);
    }
    equalization_lut(&hist)
}

/// Remap every pixel through a 256 entry table.
pub fn apply_lut(image: ArrayView2<u8>, lut: &[u8; 256]) -> Array2<u8> {
    image.map(|&px| lut[px as usize])
}
