//! Lumeq contrast engine
//!
//! Histogram based contrast remapping for single channel 8 bit images,
//! with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Every operation works on `(height, width)` arrays of `u8`. Color
//! callers split their image into planes, process each as an intensity
//! channel and merge the results themselves.
//!
//! ## Engine Architecture
//! The three equalizers share one primitive: region histogram to clipped
//! CDF to 256 entry remapping table. They differ only in where the
//! regions come from:
//! - **global**: one region, the whole image
//! - **clahe**: a tile grid with contrast limiting, seams allowed
//! - **ahe**: overlapping windows on a sample lattice, with automatic
//!   parameter advice and a pixel ceiling guarding the cost
//!
//! Calls are pure functions; the engine keeps no state between them.

pub mod equalize;
pub mod error;
pub mod filters;
pub mod metrics;
pub mod pipelines;
pub mod pointwise;
pub mod resample;

#[cfg(feature = "wasm")]
pub mod wasm;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::EngineError;
    use crate::{equalize, filters, metrics, pipelines, pointwise, resample};

    fn to_py_err(err: EngineError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Equalizers
    // ========================================================================

    /// Equalize the whole image through a single histogram.
    ///
    /// # Arguments
    /// * `image` - Grayscale image (height, width) as u8
    #[pyfunction]
    pub fn equalize_global<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = equalize::equalize_global(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Contrast limited adaptive equalization over a tile grid.
    ///
    /// # Arguments
    /// * `image` - Grayscale image (height, width) as u8
    /// * `clip_factor` - Histogram ceiling as a multiple of the mean bin count
    /// * `grid_size` - Number of tiles along each axis
    #[pyfunction]
    #[pyo3(signature = (image, clip_factor=2.0, grid_size=8))]
    pub fn equalize_clahe<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        clip_factor: f32,
        grid_size: usize,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result =
            equalize::equalize_clahe(image.as_array(), clip_factor, grid_size).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Adaptive equalization over a lattice of sample windows.
    ///
    /// Parameters left as None are chosen automatically from the image.
    ///
    /// # Arguments
    /// * `image` - Grayscale image (height, width) as u8
    /// * `window_size` - Side length of each sampling window
    /// * `step_size` - Lattice spacing between sample points
    #[pyfunction]
    #[pyo3(signature = (image, window_size=None, step_size=None))]
    pub fn equalize_ahe<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        window_size: Option<usize>,
        step_size: Option<usize>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result =
            equalize::equalize_ahe(image.as_array(), window_size, step_size).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Advise (window_size, step_size) for equalize_ahe.
    ///
    /// Deterministic: the same image always yields the same advice.
    #[pyfunction]
    pub fn advise_ahe_params(image: PyReadonlyArray2<u8>) -> PyResult<(usize, usize)> {
        let advice = equalize::advise_ahe_params(image.as_array()).map_err(to_py_err)?;
        Ok((advice.window_size, advice.step_size))
    }

    // ========================================================================
    // Pointwise Transforms
    // ========================================================================

    /// Photographic negative.
    #[pyfunction]
    pub fn negative<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
    ) -> Bound<'py, PyArray2<u8>> {
        pointwise::negative(image.as_array()).into_pyarray(py)
    }

    /// Logarithmic transform scaled so the brightest level maps to 255.
    #[pyfunction]
    pub fn log_transform<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
    ) -> Bound<'py, PyArray2<u8>> {
        pointwise::log_transform(image.as_array()).into_pyarray(py)
    }

    /// Power law transform; gamma below 1.0 brightens midtones.
    #[pyfunction]
    #[pyo3(signature = (image, gamma=1.0))]
    pub fn gamma_correction<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        gamma: f32,
    ) -> Bound<'py, PyArray2<u8>> {
        pointwise::gamma_correction(image.as_array(), gamma).into_pyarray(py)
    }

    /// Three segment piecewise linear stretch through (r1, s1) and (r2, s2).
    #[pyfunction]
    pub fn piecewise_linear<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        r1: u8,
        s1: u8,
        r2: u8,
        s2: u8,
    ) -> Bound<'py, PyArray2<u8>> {
        pointwise::piecewise_linear(image.as_array(), r1, s1, r2, s2).into_pyarray(py)
    }

    // ========================================================================
    // Support Filters
    // ========================================================================

    /// Separable Gaussian blur; ksize 0 derives the size from sigma.
    #[pyfunction]
    #[pyo3(signature = (image, ksize, sigma=0.0))]
    pub fn gaussian_blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        ksize: usize,
        sigma: f32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = filters::blur::gaussian_blur(image.as_array(), ksize, sigma).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// 3x3 kernel sharpen; amount 1.0 is the classic kernel.
    #[pyfunction]
    #[pyo3(signature = (image, amount=1.0))]
    pub fn sharpen<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        amount: f32,
    ) -> Bound<'py, PyArray2<u8>> {
        filters::sharpen::sharpen3x3(image.as_array(), amount).into_pyarray(py)
    }

    /// Unsharp mask: (1 + amount) * image - amount * blurred.
    #[pyfunction]
    #[pyo3(signature = (image, ksize=5, sigma=0.0, amount=0.3))]
    pub fn unsharp_mask<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        ksize: usize,
        sigma: f32,
        amount: f32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result =
            filters::sharpen::unsharp_mask(image.as_array(), ksize, sigma, amount).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Gaussian weighted adaptive threshold to a binary image.
    #[pyfunction]
    pub fn adaptive_threshold<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        block_size: usize,
        delta: f32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = filters::threshold::adaptive_threshold(image.as_array(), block_size, delta)
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Edge preserving bilateral denoise.
    #[pyfunction]
    #[pyo3(signature = (image, radius=3, sigma_space=40.0, sigma_color=40.0))]
    pub fn bilateral_denoise<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        radius: usize,
        sigma_space: f32,
        sigma_color: f32,
    ) -> Bound<'py, PyArray2<u8>> {
        filters::denoise::bilateral_denoise(image.as_array(), radius, sigma_space, sigma_color)
            .into_pyarray(py)
    }

    /// Stretch the intensity range linearly onto [lo, hi].
    #[pyfunction]
    #[pyo3(signature = (image, lo=0, hi=255))]
    pub fn normalize_minmax<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        lo: u8,
        hi: u8,
    ) -> Bound<'py, PyArray2<u8>> {
        filters::basic::normalize_minmax(image.as_array(), lo, hi).into_pyarray(py)
    }

    /// Absolute per pixel difference of two equally sized images.
    #[pyfunction]
    pub fn absdiff<'py>(
        py: Python<'py>,
        a: PyReadonlyArray2<'py, u8>,
        b: PyReadonlyArray2<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = filters::basic::absdiff(a.as_array(), b.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Resampling
    // ========================================================================

    /// Resize with bilinear interpolation.
    #[pyfunction]
    pub fn resize_bilinear<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        new_height: usize,
        new_width: usize,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = resample::resize_bilinear(image.as_array(), new_height, new_width)
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Resize with nearest neighbor sampling.
    #[pyfunction]
    pub fn resize_nearest<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        new_height: usize,
        new_width: usize,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result =
            resample::resize_nearest(image.as_array(), new_height, new_width).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Mean squared error over the common top left region.
    #[pyfunction]
    pub fn mse(a: PyReadonlyArray2<u8>, b: PyReadonlyArray2<u8>) -> PyResult<f64> {
        metrics::mse(a.as_array(), b.as_array()).map_err(to_py_err)
    }

    /// Peak signal to noise ratio in decibels; inf for identical images.
    #[pyfunction]
    pub fn psnr(a: PyReadonlyArray2<u8>, b: PyReadonlyArray2<u8>) -> PyResult<f64> {
        metrics::psnr(a.as_array(), b.as_array()).map_err(to_py_err)
    }

    // ========================================================================
    // Pipelines
    // ========================================================================

    /// Preprocess a license plate crop for OCR.
    #[pyfunction]
    #[pyo3(signature = (image, binary=false))]
    pub fn enhance_license_plate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        binary: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = pipelines::enhance_license_plate(image.as_array(), binary).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Enhance a satellite image band.
    #[pyfunction]
    pub fn enhance_satellite<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = pipelines::enhance_satellite(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Brighten and rebalance a low light capture.
    #[pyfunction]
    pub fn enhance_low_light<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = pipelines::enhance_low_light(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Restore a degraded document scan.
    #[pyfunction]
    #[pyo3(signature = (image, binary=false))]
    pub fn restore_document<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        binary: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = pipelines::restore_document(image.as_array(), binary).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Lumeq Rust engine module
    #[pymodule]
    pub fn lumeq_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Equalizers
        m.add_function(wrap_pyfunction!(equalize_global, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_clahe, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_ahe, m)?)?;
        m.add_function(wrap_pyfunction!(advise_ahe_params, m)?)?;

        // Pointwise transforms
        m.add_function(wrap_pyfunction!(negative, m)?)?;
        m.add_function(wrap_pyfunction!(log_transform, m)?)?;
        m.add_function(wrap_pyfunction!(gamma_correction, m)?)?;
        m.add_function(wrap_pyfunction!(piecewise_linear, m)?)?;

        // Support filters
        m.add_function(wrap_pyfunction!(gaussian_blur, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen, m)?)?;
        m.add_function(wrap_pyfunction!(unsharp_mask, m)?)?;
        m.add_function(wrap_pyfunction!(adaptive_threshold, m)?)?;
        m.add_function(wrap_pyfunction!(bilateral_denoise, m)?)?;
        m.add_function(wrap_pyfunction!(normalize_minmax, m)?)?;
        m.add_function(wrap_pyfunction!(absdiff, m)?)?;

        // Resampling
        m.add_function(wrap_pyfunction!(resize_bilinear, m)?)?;
        m.add_function(wrap_pyfunction!(resize_nearest, m)?)?;

        // Metrics
        m.add_function(wrap_pyfunction!(mse, m)?)?;
        m.add_function(wrap_pyfunction!(psnr, m)?)?;

        // Pipelines
        m.add_function(wrap_pyfunction!(enhance_license_plate, m)?)?;
        m.add_function(wrap_pyfunction!(enhance_satellite, m)?)?;
        m.add_function(wrap_pyfunction!(enhance_low_light, m)?)?;
        m.add_function(wrap_pyfunction!(restore_document, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::lumeq_rust;
