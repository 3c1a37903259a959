//! Convolution operations
//!
//! Every output pixel is the weighted sum of the window centered on the
//! same input pixel. The input is border-extended once per call by the
//! kernel's half-width, so the output always has the input's dimensions.
//!
//! The kernel is applied as a correlation: weight `(dx, dy)` multiplies the
//! sample at `(x + dx, y + dy)`. Pass [`Kernel::flipped`] for a true
//! convolution; for symmetric kernels the two are identical.
//!
//! Rows are computed in parallel with rayon.

use crate::{FilterResult, Kernel};
use phototone_core::{BorderPolicy, FPix, Pix};
use rayon::prelude::*;

/// Correlate `pix` with `kernel`, writing `store(sum)` for every pixel into
/// the row-major buffer `out`.
fn correlate_into<T, F>(
    pix: &Pix,
    kernel: &Kernel,
    policy: BorderPolicy,
    out: &mut [T],
    store: F,
) -> FilterResult<()>
where
    T: Send,
    F: Fn(f64) -> T + Sync,
{
    let w = pix.width() as usize;
    let size = kernel.size();
    let ext = pix.extend_border(kernel.half_width(), policy)?;
    let weights = kernel.data();

    out.par_chunks_mut(w)
        .enumerate()
        .try_for_each(|(y, row)| -> FilterResult<()> {
            for (x, dst) in row.iter_mut().enumerate() {
                let window = ext.window(size, x as u32, y as u32)?;
                let sum: f64 = window
                    .iter()
                    .zip(weights)
                    .map(|(v, &k)| v as f64 * k)
                    .sum();
                *dst = store(sum);
            }
            Ok(())
        })
}

/// Convolve an 8-bit image with a kernel.
///
/// Sums are rounded to the nearest integer and clamped to `[0, 255]`.
/// A zero-area input returns a zero-area output.
pub fn convolve(pix: &Pix, kernel: &Kernel, policy: BorderPolicy) -> FilterResult<Pix> {
    if pix.is_empty() {
        return Ok(pix.create_template());
    }
    log::debug!(
        "convolve {}x{} with {}x{} kernel ({:?})",
        pix.width(),
        pix.height(),
        kernel.size(),
        kernel.size(),
        policy
    );

    let mut out = pix.create_template().to_mut();
    correlate_into(pix, kernel, policy, out.data_mut(), |sum| {
        sum.round().clamp(0.0, 255.0) as u8
    })?;
    Ok(out.into())
}

/// Convolve an 8-bit image with a kernel, keeping the raw sums.
///
/// Unlike [`convolve`] the result is neither rounded nor clamped, so signed
/// responses such as Sobel gradients survive.
pub fn convolve_float(pix: &Pix, kernel: &Kernel, policy: BorderPolicy) -> FilterResult<FPix> {
    let mut out = FPix::new(pix.width(), pix.height());
    if pix.is_empty() {
        return Ok(out);
    }
    correlate_into(pix, kernel, policy, out.data_mut(), |sum| sum as f32)?;
    Ok(out)
}

/// Apply box (average) blur with a `size x size` window.
pub fn box_blur(pix: &Pix, size: u32, policy: BorderPolicy) -> FilterResult<Pix> {
    let kernel = Kernel::box_kernel(size)?;
    convolve(pix, &kernel, policy)
}

/// Apply Gaussian blur with an explicit kernel size and sigma.
pub fn gaussian_blur(pix: &Pix, size: u32, sigma: f64, policy: BorderPolicy) -> FilterResult<Pix> {
    let kernel = Kernel::gaussian(size, sigma)?;
    convolve(pix, &kernel, policy)
}

/// Apply Gaussian blur with the conventional `sigma = size / 6` and
/// reflected borders.
pub fn gaussian_blur_auto(pix: &Pix, size: u32) -> FilterResult<Pix> {
    gaussian_blur(pix, size, size as f64 / 6.0, BorderPolicy::Reflect)
}
