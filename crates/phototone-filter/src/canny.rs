//! Canny edge detection
//!
//! Four stages, each completed over the whole image before the next starts:
//!
//! 1. Gaussian smoothing to suppress noise
//! 2. Sobel gradients, magnitude, and direction quantized to 0/45/90/135°
//! 3. Non-maximum suppression along the quantized direction
//! 4. Hysteresis: strong pixels seed a work queue that grows into
//!    connected weak pixels until no more pixels change
//!
//! The result is a binary image: 255 on edges, 0 elsewhere.

use crate::convolve::convolve;
use crate::edge::{gradient_magnitude, sobel_gradients};
use crate::{FilterError, FilterResult, Kernel};
use phototone_core::{BorderPolicy, FPix, Pix};
use rayon::prelude::*;
use std::collections::VecDeque;

/// Default Gaussian kernel size for the smoothing stage.
pub const DEFAULT_CANNY_KERNEL_SIZE: u32 = 5;

/// Default Gaussian sigma, `size / 6` for the default size.
pub const DEFAULT_CANNY_SIGMA: f64 = DEFAULT_CANNY_KERNEL_SIZE as f64 / 6.0;

/// Default low hysteresis threshold (gradient magnitude).
pub const DEFAULT_LOW_THRESHOLD: f32 = 50.0;

/// Default high hysteresis threshold (gradient magnitude).
pub const DEFAULT_HIGH_THRESHOLD: f32 = 100.0;

/// Pixel adjacency used when growing edges from strong pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Edge-sharing neighbors only
    Four,
    /// Edge- and corner-sharing neighbors
    #[default]
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i64, i64)] {
        const FOUR: [(i64, i64); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
        const EIGHT: [(i64, i64); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// Options for Canny edge detection
#[derive(Debug, Clone, PartialEq)]
pub struct CannyOptions {
    /// Gaussian kernel size (odd, >= 1)
    pub kernel_size: u32,
    /// Gaussian sigma (> 0)
    pub sigma: f64,
    /// Magnitudes below this are never edges
    pub low_threshold: f32,
    /// Magnitudes above this are always edges
    pub high_threshold: f32,
    /// Adjacency for hysteresis growth
    pub connectivity: Connectivity,
    /// Border policy for smoothing and gradients
    pub policy: BorderPolicy,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_CANNY_KERNEL_SIZE,
            sigma: DEFAULT_CANNY_SIGMA,
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            connectivity: Connectivity::default(),
            policy: BorderPolicy::default(),
        }
    }
}

impl CannyOptions {
    /// Options with the given thresholds and defaults elsewhere.
    pub fn with_thresholds(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
            ..Self::default()
        }
    }

    /// Check every parameter before any work is done.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidKernel`] for an even or zero kernel size
    /// - [`FilterError::InvalidArgument`] for a non-positive sigma, a
    ///   negative or NaN threshold, or `low > high`
    pub fn validate(&self) -> FilterResult<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel size must be odd and positive, got {}",
                self.kernel_size
            )));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(FilterError::InvalidArgument(format!(
                "sigma must be finite and > 0, got {}",
                self.sigma
            )));
        }
        let (low, high) = (self.low_threshold, self.high_threshold);
        if low.is_nan() || high.is_nan() || low < 0.0 || high < 0.0 {
            return Err(FilterError::InvalidArgument(format!(
                "thresholds must be non-negative, got low={low} high={high}"
            )));
        }
        if low > high {
            return Err(FilterError::InvalidArgument(format!(
                "low threshold {low} exceeds high threshold {high}"
            )));
        }
        Ok(())
    }
}

/// Gradient direction quantized to one of four principal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    /// Along x
    Deg0,
    /// Along the `(+x, +y)` diagonal
    Deg45,
    /// Along y
    Deg90,
    /// Along the `(-x, +y)` diagonal
    Deg135,
}

impl GradientDirection {
    /// Quantize `atan2(gy, gx)`, folded into `[0, 180)` degrees.
    ///
    /// Bands are 45° wide and centered on each principal direction.
    pub fn from_gradient(gx: f32, gy: f32) -> Self {
        let mut angle = gy.atan2(gx).to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }
        if angle >= 180.0 {
            angle -= 180.0;
        }
        if !(22.5..157.5).contains(&angle) {
            GradientDirection::Deg0
        } else if angle < 67.5 {
            GradientDirection::Deg45
        } else if angle < 112.5 {
            GradientDirection::Deg90
        } else {
            GradientDirection::Deg135
        }
    }

    /// The two neighbor offsets compared during suppression.
    pub fn neighbor_offsets(self) -> [(i64, i64); 2] {
        match self {
            GradientDirection::Deg0 => [(-1, 0), (1, 0)],
            GradientDirection::Deg45 => [(1, 1), (-1, -1)],
            GradientDirection::Deg90 => [(0, -1), (0, 1)],
            GradientDirection::Deg135 => [(-1, 1), (1, -1)],
        }
    }
}

/// Magnitude at `(x, y)`, or 0 outside the image.
#[inline]
fn magnitude_or_zero(mag: &FPix, x: i64, y: i64) -> f32 {
    if x < 0 || y < 0 || x >= mag.width() as i64 || y >= mag.height() as i64 {
        return 0.0;
    }
    mag.get_pixel_unchecked(x as u32, y as u32)
}

/// Thin edges to one-pixel ridges.
///
/// A pixel keeps its magnitude only if it is at least as large as both
/// neighbors along its quantized gradient direction; otherwise it becomes 0.
/// Neighbors outside the image count as 0.
pub fn non_maximum_suppression(magnitude: &FPix, gx: &FPix, gy: &FPix) -> FPix {
    let (w, h) = magnitude.dimensions();
    let mut out = FPix::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    out.data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for (x, dst) in row.iter_mut().enumerate() {
                let x = x as u32;
                let m = magnitude.get_pixel_unchecked(x, y);
                if m <= 0.0 {
                    continue;
                }
                let dir = GradientDirection::from_gradient(
                    gx.get_pixel_unchecked(x, y),
                    gy.get_pixel_unchecked(x, y),
                );
                let keep = dir.neighbor_offsets().iter().all(|&(dx, dy)| {
                    m >= magnitude_or_zero(magnitude, x as i64 + dx, y as i64 + dy)
                });
                if keep {
                    *dst = m;
                }
            }
        });

    out
}

/// Double-threshold hysteresis over suppressed magnitudes.
///
/// Pixels above `high` are edges. Pixels in `[low, high]` with non-zero
/// magnitude are edges only if connected to a strong pixel through other
/// edge pixels. Growth uses an explicit work queue.
pub fn hysteresis(
    suppressed: &FPix,
    low: f32,
    high: f32,
    connectivity: Connectivity,
) -> FilterResult<Pix> {
    if low.is_nan() || high.is_nan() || low < 0.0 || high < 0.0 || low > high {
        return Err(FilterError::InvalidArgument(format!(
            "invalid thresholds low={low} high={high}"
        )));
    }
    let (w, h) = suppressed.dimensions();
    let mut out = Pix::new(w, h).to_mut();
    let data = suppressed.data();
    let is_weak = |m: f32| m > 0.0 && m >= low && m <= high;

    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    let mut strong = 0usize;
    let mut weak = 0usize;
    for y in 0..h {
        for x in 0..w {
            let m = data[(y * w + x) as usize];
            if m > high {
                out.set_pixel_unchecked(x, y, 255);
                queue.push_back((x, y));
                strong += 1;
            } else if is_weak(m) {
                weak += 1;
            }
        }
    }

    let mut visits = 0usize;
    let mut promoted = 0usize;
    while let Some((x, y)) = queue.pop_front() {
        visits += 1;
        for &(dx, dy) in connectivity.offsets() {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if out.get_pixel_unchecked(nx, ny) != 0 {
                continue;
            }
            if is_weak(data[(ny * w + nx) as usize]) {
                out.set_pixel_unchecked(nx, ny, 255);
                queue.push_back((nx, ny));
                promoted += 1;
            }
        }
    }

    log::debug!(
        "hysteresis: {strong} strong, {weak} weak, {promoted} promoted after {visits} visits"
    );
    Ok(out.into())
}

/// Run the full Canny pipeline.
///
/// # Errors
///
/// Any parameter error from [`CannyOptions::validate`], reported before
/// any stage runs.
pub fn canny(pix: &Pix, options: &CannyOptions) -> FilterResult<Pix> {
    options.validate()?;
    if pix.is_empty() {
        return Ok(pix.create_template());
    }

    let kernel = Kernel::gaussian(options.kernel_size, options.sigma)?;
    let smoothed = convolve(pix, &kernel, options.policy)?;

    let (gx, gy) = sobel_gradients(&smoothed, options.policy)?;
    let magnitude = gradient_magnitude(&gx, &gy);

    let suppressed = non_maximum_suppression(&magnitude, &gx, &gy);

    let edges = hysteresis(
        &suppressed,
        options.low_threshold,
        options.high_threshold,
        options.connectivity,
    )?;
    log::debug!(
        "canny {}x{}: {} edge pixels",
        pix.width(),
        pix.height(),
        edges.count_nonzero()
    );
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phototone_core::ErrorKind;

    #[test]
    fn test_direction_quantization() {
        assert_eq!(GradientDirection::from_gradient(1.0, 0.0), GradientDirection::Deg0);
        assert_eq!(GradientDirection::from_gradient(-1.0, 0.0), GradientDirection::Deg0);
        assert_eq!(GradientDirection::from_gradient(1.0, 1.0), GradientDirection::Deg45);
        assert_eq!(GradientDirection::from_gradient(-1.0, -1.0), GradientDirection::Deg45);
        assert_eq!(GradientDirection::from_gradient(0.0, 1.0), GradientDirection::Deg90);
        assert_eq!(GradientDirection::from_gradient(0.0, -3.0), GradientDirection::Deg90);
        assert_eq!(GradientDirection::from_gradient(-1.0, 1.0), GradientDirection::Deg135);
        assert_eq!(GradientDirection::from_gradient(1.0, 0.3), GradientDirection::Deg0);
    }

    #[test]
    fn test_validate() {
        assert!(CannyOptions::default().validate().is_ok());
        let err = CannyOptions::with_thresholds(80.0, 20.0).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(CannyOptions::with_thresholds(-1.0, 20.0).validate().is_err());
        assert!(CannyOptions::with_thresholds(f32::NAN, 20.0).validate().is_err());
        assert!(CannyOptions::with_thresholds(30.0, 30.0).validate().is_ok());
        let opts = CannyOptions {
            kernel_size: 4,
            ..CannyOptions::default()
        };
        assert!(matches!(opts.validate(), Err(FilterError::InvalidKernel(_))));
    }

    #[test]
    fn test_uniform_has_no_edges() {
        let pix = Pix::new_with_value(16, 12, 77);
        let out = canny(&pix, &CannyOptions::default()).unwrap();
        assert_eq!(out.count_nonzero(), 0);
    }

    #[test]
    fn test_nms_keeps_ridge() {
        let mag = FPix::from_data(5, 1, vec![1.0, 3.0, 5.0, 3.0, 1.0]).unwrap();
        let gx = FPix::new_with_value(5, 1, 1.0);
        let gy = FPix::new(5, 1);
        let out = non_maximum_suppression(&mag, &gx, &gy);
        assert_eq!(out.data(), &[0.0, 0.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hysteresis_connectivity() {
        // strong at (0,0); weak at (1,1) touches it only diagonally
        let data = vec![200.0, 0.0, 0.0, 0.0, 60.0, 0.0, 0.0, 0.0, 60.0];
        let sup = FPix::from_data(3, 3, data).unwrap();
        let four = hysteresis(&sup, 50.0, 100.0, Connectivity::Four).unwrap();
        assert_eq!(four.data(), &[255, 0, 0, 0, 0, 0, 0, 0, 0]);
        let eight = hysteresis(&sup, 50.0, 100.0, Connectivity::Eight).unwrap();
        assert_eq!(eight.data(), &[255, 0, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_hysteresis_drops_isolated_weak() {
        let sup = FPix::from_data(4, 1, vec![0.0, 70.0, 0.0, 30.0]).unwrap();
        let out = hysteresis(&sup, 50.0, 100.0, Connectivity::Eight).unwrap();
        assert_eq!(out.count_nonzero(), 0);
    }
}
