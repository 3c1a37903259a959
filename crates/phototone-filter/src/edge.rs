//! Sobel edge detection
//!
//! The horizontal kernel `Gx` responds to intensity change along x and the
//! vertical kernel `Gy` to change along y. Edge strength is the gradient
//! magnitude `sqrt(Gx² + Gy²)`.

use crate::convolve::convolve_float;
use crate::{FilterResult, Kernel};
use phototone_core::{BorderPolicy, FPix, NegativeHandling, Pix};

/// Edge detection orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeOrientation {
    /// Detect horizontal edges (`|Gy|`)
    Horizontal,
    /// Detect vertical edges (`|Gx|`)
    Vertical,
    /// Detect all edges (full gradient magnitude)
    #[default]
    All,
}

/// Signed Sobel gradients `(Gx, Gy)`.
pub fn sobel_gradients(pix: &Pix, policy: BorderPolicy) -> FilterResult<(FPix, FPix)> {
    let gx = convolve_float(pix, &Kernel::sobel_horizontal(), policy)?;
    let gy = convolve_float(pix, &Kernel::sobel_vertical(), policy)?;
    Ok((gx, gy))
}

/// Per-pixel gradient magnitude `sqrt(gx² + gy²)`.
///
/// `gx` and `gy` must come from the same image.
pub fn gradient_magnitude(gx: &FPix, gy: &FPix) -> FPix {
    let mut out = FPix::new(gx.width(), gx.height());
    for ((m, &a), &b) in out.data_mut().iter_mut().zip(gx.data()).zip(gy.data()) {
        *m = a.hypot(b);
    }
    out
}

/// Apply Sobel edge detection with reflected borders.
///
/// A uniform image yields an all-zero result.
pub fn sobel_edge(pix: &Pix, orientation: EdgeOrientation) -> FilterResult<Pix> {
    sobel_edge_with_policy(pix, orientation, BorderPolicy::Reflect)
}

/// Apply Sobel edge detection with an explicit border policy.
///
/// With [`BorderPolicy::Zero`] the image boundary itself reads as an edge.
pub fn sobel_edge_with_policy(
    pix: &Pix,
    orientation: EdgeOrientation,
    policy: BorderPolicy,
) -> FilterResult<Pix> {
    let (gx, gy) = sobel_gradients(pix, policy)?;
    let response = match orientation {
        EdgeOrientation::Horizontal => gy,
        EdgeOrientation::Vertical => gx,
        EdgeOrientation::All => gradient_magnitude(&gx, &gy),
    };
    Ok(response.to_pix(NegativeHandling::TakeAbsValue))
}
