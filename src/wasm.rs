//! WebAssembly exports for the contrast engine.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images
//! cross the boundary as flat row major byte arrays with explicit
//! dimensions; invalid inputs abort with a descriptive panic message,
//! which wasm-bindgen surfaces as a JavaScript exception.

use ndarray::Array2;
use wasm_bindgen::prelude::*;

use crate::equalize;
use crate::pointwise;

fn to_array(data: &[u8], width: usize, height: usize) -> Array2<u8> {
    Array2::from_shape_vec((height, width), data.to_vec()).expect("Invalid dimensions")
}

// ============================================================================
// Equalizers
// ============================================================================

/// Global histogram equalization.
///
/// # Arguments
/// * `data` - Flat intensity bytes (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat intensity bytes of the remapped image
#[wasm_bindgen]
pub fn equalize_global_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_array(data, width, height);
    let result = equalize::equalize_global(input.view()).expect("Equalization failed");
    result.into_raw_vec_and_offset().0
}

/// Contrast limited adaptive equalization over a tile grid.
///
/// # Arguments
/// * `data` - Flat intensity bytes (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `clip_factor` - Histogram ceiling as a multiple of the mean bin count
/// * `grid_size` - Number of tiles along each axis
#[wasm_bindgen]
pub fn equalize_clahe_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    clip_factor: f32,
    grid_size: usize,
) -> Vec<u8> {
    let input = to_array(data, width, height);
    let result =
        equalize::equalize_clahe(input.view(), clip_factor, grid_size).expect("Equalization failed");
    result.into_raw_vec_and_offset().0
}

/// Adaptive equalization over a lattice of sample windows.
///
/// Pass 0 for `window_size` or `step_size` to let the advisor pick that
/// value from the image.
#[wasm_bindgen]
pub fn equalize_ahe_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    window_size: usize,
    step_size: usize,
) -> Vec<u8> {
    let input = to_array(data, width, height);
    let window = if window_size == 0 { None } else { Some(window_size) };
    let step = if step_size == 0 { None } else { Some(step_size) };
    let result = equalize::equalize_ahe(input.view(), window, step).expect("Equalization failed");
    result.into_raw_vec_and_offset().0
}

/// Advise [window_size, step_size] for the windowed equalizer.
#[wasm_bindgen]
pub fn advise_ahe_params_wasm(data: &[u8], width: usize, height: usize) -> Vec<u32> {
    let input = to_array(data, width, height);
    let advice = equalize::advise_ahe_params(input.view()).expect("Advice failed");
    vec![advice.window_size as u32, advice.step_size as u32]
}

// ============================================================================
// Pointwise Transforms
// ============================================================================

/// Photographic negative.
#[wasm_bindgen]
pub fn negative_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_array(data, width, height);
    pointwise::negative(input.view()).into_raw_vec_and_offset().0
}

/// Logarithmic transform scaled so the brightest level maps to 255.
#[wasm_bindgen]
pub fn log_transform_wasm(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let input = to_array(data, width, height);
    pointwise::log_transform(input.view()).into_raw_vec_and_offset().0
}

/// Power law transform; gamma below 1.0 brightens midtones.
#[wasm_bindgen]
pub fn gamma_correction_wasm(data: &[u8], width: usize, height: usize, gamma: f32) -> Vec<u8> {
    let input = to_array(data, width, height);
    pointwise::gamma_correction(input.view(), gamma)
        .into_raw_vec_and_offset()
        .0
}

/// Three segment piecewise linear stretch through (r1, s1) and (r2, s2).
#[wasm_bindgen]
pub fn piecewise_linear_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    r1: u8,
    s1: u8,
    r2: u8,
    s2: u8,
) -> Vec<u8> {
    let input = to_array(data, width, height);
    pointwise::piecewise_linear(input.view(), r1, s1, r2, s2)
        .into_raw_vec_and_offset()
        .0
}
