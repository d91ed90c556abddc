//! Pointwise intensity transforms.
//!
//! Per pixel remappings that complement the histogram equalizers: negative,
//! log, gamma and piecewise linear stretching. Each transform precomputes
//! its 256 entry table once and remaps through it.

use ndarray::{Array2, ArrayView2};

use crate::equalize::histogram::apply_lut;

/// Photographic negative.
pub fn negative(image: ArrayView2<u8>) -> Array2<u8> {
    image.map(|&px| 255 - px)
}

/// Logarithmic transform `s = c * ln(1 + r)`.
///
/// `c` is chosen so the brightest input level maps to the top of the
/// range, which lifts dark detail the most. A completely black image is
/// returned unchanged.
pub fn log_transform(image: ArrayView2<u8>) -> Array2<u8> {
    let max = image.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return image.to_owned();
    }

    let c = 255.0 / (1.0 + max as f64).ln();
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (c * (1.0 + i as f64).ln()).clamp(0.0, 255.0) as u8;
    }
    apply_lut(image, &lut)
}

/// Power law transform `s = 255 * (r / 255) ^ gamma`.
///
/// Gamma below 1.0 brightens midtones, above 1.0 darkens them.
///
/// # Arguments
/// * `image` - Single channel intensity image
/// * `gamma` - Exponent of the power law
pub fn gamma_correction(image: ArrayView2<u8>, gamma: f32) -> Array2<u8> {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let normalized = i as f64 / 255.0;
        *entry = (255.0 * normalized.powf(gamma as f64)).clamp(0.0, 255.0) as u8;
    }
    apply_lut(image, &lut)
}

/// Table for a three segment piecewise linear stretch.
///
/// The control points `(r1, s1)` and `(r2, s2)` split the range into three
/// linear pieces; `r2` is nudged one level above `r1` when the two
/// coincide. The segment endpoints themselves map exactly: `r1` to `s1`
/// and `r2` to `s2`.
pub fn piecewise_lut(r1: u8, s1: u8, r2: u8, s2: u8) -> [u8; 256] {
    let r1 = r1 as usize;
    let (s1, s2) = (s1 as f64, s2 as f64);
    let r2 = if (r2 as usize) <= r1 {
        (r1 + 1).min(255)
    } else {
        r2 as usize
    };

    let mut curve = [0.0f64; 256];
    if r1 > 0 {
        for i in 0..=r1 {
            curve[i] = s1 * i as f64 / r1 as f64;
        }
    } else {
        curve[0] = s1;
    }
    if r2 > r1 {
        for i in r1..=r2 {
            curve[i] = s1 + (s2 - s1) * (i - r1) as f64 / (r2 - r1) as f64;
        }
    }
    if r2 < 255 {
        for i in r2..256 {
            curve[i] = s2 + (255.0 - s2) * (i - r2) as f64 / (255 - r2) as f64;
        }
    } else {
        curve[255] = s2;
    }

    let mut lut = [0u8; 256];
    for i in 0..256 {
        lut[i] = curve[i].clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Piecewise linear contrast stretch through [`piecewise_lut`].
pub fn piecewise_linear(image: ArrayView2<u8>, r1: u8, s1: u8, r2: u8, s2: u8) -> Array2<u8> {
    apply_lut(image, &piecewise_lut(r1, s1, r2, s2))
}
