//! Automatic parameter selection for the windowed equalizer.
//!
//! Picks a window and step size from three cheap probes: the pixel count,
//! the entropy of the global histogram, and the mean variance of a few
//! sampled patches. The patch sampler runs on a fixed seed generator, so
//! the advice for a given image never changes between runs.

use ndarray::ArrayView2;
use tracing::debug;

use crate::equalize::check_nonempty;
use crate::equalize::histogram::region_histogram;
use crate::error::EngineResult;

const PATCH_SIZE: usize = 32;
const PATCH_COUNT: usize = 5;
const PATCH_SEED: u64 = 7;

// ============================================================================
// Deterministic RNG
// ============================================================================

/// Linear congruential generator with MINSTD parameters.
struct PatchRng {
    state: u64,
}

impl PatchRng {
    fn new(seed: u64) -> Self {
        PatchRng {
            state: seed.wrapping_add(1), // Avoid zero
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(48271).wrapping_add(1) % 2147483647;
        self.state as u32
    }
}

// ============================================================================
// Advice
// ============================================================================

/// Advised parameters for the windowed equalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AheParams {
    pub window_size: usize,
    pub step_size: usize,
}

/// Pick window and step sizes for `equalize_ahe`.
///
/// Larger images start from larger windows and coarser steps. Low entropy
/// images (under 6 bits) halve both so local structure still resolves;
/// high entropy images (over 7.5 bits) grow them since fine adaptation
/// adds little there. High variance in the sampled patches coarsens the
/// step once more. Bounds: window stays within `[32, 128]`, step within
/// `[4, 16]`.
///
/// # Arguments
/// * `image` - Single channel intensity image
///
/// # Returns
/// Deterministic advice; the same image always yields the same values
pub fn advise_ahe_params(image: ArrayView2<u8>) -> EngineResult<AheParams> {
    check_nonempty(&image)?;
    let (height, width) = image.dim();
    let pixels = height * width;

    let (mut window, mut step) = if pixels < 100_000 {
        (32usize, 4usize)
    } else if pixels < 500_000 {
        (64, 6)
    } else if pixels < 1_000_000 {
        (96, 8)
    } else {
        (128, 12)
    };

    let entropy = histogram_entropy(&region_histogram(image), pixels);
    if entropy < 6.0 {
        window = (window / 2).max(32);
        step = (step / 2).max(4);
        debug!(entropy, window, step, "low entropy, shrinking advice");
    } else if entropy > 7.5 {
        window = ((window as f64 * 1.2) as usize).min(128);
        step = ((step as f64 * 1.5) as usize).min(16);
        debug!(entropy, window, step, "high entropy, growing advice");
    }

    if let Some(variance) = mean_patch_variance(image) {
        if variance > 1000.0 {
            step = ((step as f64 * 1.3) as usize).min(16);
            debug!(variance, step, "high detail, coarsening step");
        }
    }

    Ok(AheParams {
        window_size: window,
        step_size: step,
    })
}

/// Shannon entropy of an intensity histogram, in bits.
fn histogram_entropy(hist: &[u32; 256], total: usize) -> f64 {
    let total = total as f64;
    let mut entropy = 0.0;
    for &count in hist.iter() {
        if count == 0 {
            continue;
        }
        let p = count as f64 / total;
        entropy -= p * p.log2();
    }
    entropy
}

/// Mean variance over a handful of randomly placed patches.
///
/// Returns `None` when the image cannot hold a full patch.
fn mean_patch_variance(image: ArrayView2<u8>) -> Option<f64> {
    let (height, width) = image.dim();
    if height < PATCH_SIZE || width < PATCH_SIZE {
        return None;
    }

    let mut rng = PatchRng::new(PATCH_SEED);
    let mut total = 0.0;
    for _ in 0..PATCH_COUNT {
        let y0 = rng.next_u32() as usize % (height - PATCH_SIZE + 1);
        let x0 = rng.next_u32() as usize % (width - PATCH_SIZE + 1);
        total += patch_variance(&image, y0, x0);
    }
    Some(total / PATCH_COUNT as f64)
}

fn patch_variance(image: &ArrayView2<u8>, y0: usize, x0: usize) -> f64 {
    let n = (PATCH_SIZE * PATCH_SIZE) as f64;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for y in y0..y0 + PATCH_SIZE {
        for x in x0..x0 + PATCH_SIZE {
            let v = image[[y, x]] as f64;
            sum += v;
            sum_sq += v * v;
        }
    }
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}
