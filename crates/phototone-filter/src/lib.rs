//! phototone-filter - Image filtering and tone mapping
//!
//! This crate provides the windowed and table-driven operations built on
//! `phototone-core`:
//!
//! - Convolution with arbitrary square kernels (Gaussian, box, Sobel)
//! - Edge detection (Sobel magnitude, full Canny pipeline)
//! - Rank filtering (median, min, max)
//! - Tone enhancement (gamma, histogram equalization)
//! - Tone curves built from freehand paths
//!
//! Every operation takes an input image and returns a new one.

pub mod canny;
pub mod convolve;
pub mod curve;
pub mod edge;
pub mod enhance;
mod error;
pub mod kernel;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use canny::{CannyOptions, Connectivity, GradientDirection, canny};
pub use convolve::{box_blur, convolve, convolve_float, gaussian_blur, gaussian_blur_auto};
pub use curve::{CurveSample, ToneCurveBuilder, TonePoint, build_tone_lut, densify};
pub use edge::{
    EdgeOrientation, gradient_magnitude, sobel_edge, sobel_edge_with_policy, sobel_gradients,
};
pub use enhance::{equalize, equalize_trc, gamma_correct, gamma_trc};
pub use rank::{max_filter, median_filter, min_filter, rank_filter};
