//! Histogram based contrast remapping.
//!
//! Three equalizers built on one primitive: region histogram to clipped
//! CDF to remapping table. They differ only in region choice. The global
//! equalizer uses the whole image, the tiled one a fixed grid with
//! contrast limiting, and the windowed one a dense lattice of overlapping
//! sample windows with automatic parameter advice.

pub mod advisor;
pub mod global;
pub mod histogram;
pub mod tiled;
pub mod windowed;

pub use advisor::{advise_ahe_params, AheParams};
pub use global::equalize_global;
pub use tiled::equalize_clahe;
pub use windowed::{equalize_ahe, AHE_PIXEL_CEILING};

use ndarray::ArrayView2;

use crate::error::{EngineError, EngineResult};

/// Reject images with a zero sized axis before any output is allocated.
pub(crate) fn check_nonempty(image: &ArrayView2<u8>) -> EngineResult<()> {
    let (height, width) = image.dim();
    if height == 0 || width == 0 {
        return Err(EngineError::input(format!(
            "expected a non-empty image, got {}x{}",
            height, width
        )));
    }
    Ok(())
}
