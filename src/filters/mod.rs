//! Support filters for the enhancement pipelines.
//!
//! Single channel building blocks the pipelines compose around the
//! equalizers: Gaussian blur, sharpening, adaptive thresholding, bilateral
//! denoise and basic pixel arithmetic.
//!
//! ## Conventions
//!
//! All filters take `(height, width)` arrays of `u8`, return a new array
//! of the same dimensions and clamp convolution borders to the edge pixel.
//! Kernel sizes are odd; passing 0 where a size is expected derives it
//! from sigma.

pub mod basic;
pub mod blur;
pub mod denoise;
pub mod sharpen;
pub mod threshold;

pub use basic::{absdiff, normalize_minmax};
pub use blur::gaussian_blur;
pub use denoise::bilateral_denoise;
pub use sharpen::{sharpen3x3, unsharp_mask};
pub use threshold::adaptive_threshold;
