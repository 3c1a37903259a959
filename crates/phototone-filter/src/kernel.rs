//! Convolution kernels
//!
//! A [`Kernel`] is a square grid of `f64` weights with odd side length, so
//! that it has a well-defined center pixel. Weights are addressed either by
//! grid position `(col, row)` or by offset `(dx, dy)` from the center.

use crate::{FilterError, FilterResult};

/// A square convolution kernel with odd side length
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Side length
    size: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

/// Validate `size` and return the number of weights.
fn check_size(size: u32) -> FilterResult<usize> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel size must be odd and positive, got {size}"
        )));
    }
    (size as usize)
        .checked_mul(size as usize)
        .ok_or_else(|| FilterError::InvalidKernel(format!("kernel size {size} is too large")))
}

impl Kernel {
    /// Create a zero-filled kernel.
    pub fn new(size: u32) -> FilterResult<Self> {
        let n = check_size(size)?;
        Ok(Self {
            size,
            data: vec![0.0; n],
        })
    }

    /// Create a kernel from row-major weights.
    pub fn from_slice(size: u32, data: &[f64]) -> FilterResult<Self> {
        let n = check_size(size)?;
        if data.len() != n {
            return Err(FilterError::InvalidKernel(format!(
                "expected {n} weights for a {size}x{size} kernel, got {}",
                data.len()
            )));
        }
        Ok(Self {
            size,
            data: data.to_vec(),
        })
    }

    /// The 1x1 kernel with weight 1; convolution with it is a copy.
    pub fn identity() -> Self {
        Self {
            size: 1,
            data: vec![1.0],
        }
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let n = check_size(size)?;
        Ok(Self {
            size,
            data: vec![1.0 / n as f64; n],
        })
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// The weight at offset `(i, j)` is proportional to
    /// `exp(-(i² + j²) / (2σ²))`; the weights are then divided by their sum.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidKernel`] for an even or zero `size`, and
    /// [`FilterError::InvalidArgument`] unless `sigma` is finite and positive.
    pub fn gaussian(size: u32, sigma: f64) -> FilterResult<Self> {
        let n = check_size(size)?;
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidArgument(format!(
                "sigma must be finite and > 0, got {sigma}"
            )));
        }

        let half = (size / 2) as i64;
        let denom = 2.0 * sigma * sigma;
        let mut data = Vec::with_capacity(n);
        for j in -half..=half {
            for i in -half..=half {
                data.push((-((i * i + j * j) as f64) / denom).exp());
            }
        }

        let mut kernel = Self { size, data };
        kernel.normalize();
        Ok(kernel)
    }

    /// Sobel kernel responding to horizontal intensity change (`Gx`).
    pub fn sobel_horizontal() -> Self {
        Self {
            size: 3,
            data: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Sobel kernel responding to vertical intensity change (`Gy`).
    pub fn sobel_vertical() -> Self {
        Self {
            size: 3,
            data: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Distance from the center to the edge, `size / 2`.
    #[inline]
    pub fn half_width(&self) -> u32 {
        self.size / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get the weight at grid position `(col, row)`.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> Option<f64> {
        if col >= self.size || row >= self.size {
            return None;
        }
        Some(self.data[row as usize * self.size as usize + col as usize])
    }

    /// Set the weight at grid position `(col, row)`.
    pub fn set(&mut self, col: u32, row: u32, value: f64) -> FilterResult<()> {
        if col >= self.size || row >= self.size {
            return Err(FilterError::InvalidArgument(format!(
                "({col}, {row}) outside {0}x{0} kernel",
                self.size
            )));
        }
        self.data[row as usize * self.size as usize + col as usize] = value;
        Ok(())
    }

    /// Get the weight at offset `(dx, dy)` from the center.
    pub fn weight_at_offset(&self, dx: i32, dy: i32) -> Option<f64> {
        let h = self.half_width() as i32;
        if dx.abs() > h || dy.abs() > h {
            return None;
        }
        self.get((dx + h) as u32, (dy + h) as u32)
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel whose weights sum to zero (e.g. Sobel) is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() < f64::EPSILON {
            return;
        }
        for w in &mut self.data {
            *w /= sum;
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// The kernel rotated by 180 degrees.
    ///
    /// Correlating with the flipped kernel is a true convolution.
    pub fn flipped(&self) -> Self {
        Self {
            size: self.size,
            data: self.data.iter().rev().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_count_does_not_wrap() {
        assert_eq!(check_size(3).unwrap(), 9);
        // 65537² does not fit in u32
        #[cfg(target_pointer_width = "64")]
        {
            assert_eq!(check_size(65537).unwrap() as u64, 65537u64 * 65537);
            assert_eq!(check_size(u32::MAX).unwrap() as u64, u32::MAX as u64 * u32::MAX as u64);
        }
        #[cfg(target_pointer_width = "32")]
        assert!(matches!(check_size(65537), Err(FilterError::InvalidKernel(_))));
        assert!(matches!(check_size(65536), Err(FilterError::InvalidKernel(_))));
        assert!(matches!(
            Kernel::from_slice(65537, &[1.0]),
            Err(FilterError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_gaussian_sums_to_one_and_is_symmetric() {
        for size in [1, 3, 5, 9, 31] {
            for sigma in [0.3, 1.0, size as f64 / 6.0, 4.0] {
                let k = Kernel::gaussian(size, sigma).unwrap();
                assert!((k.sum() - 1.0).abs() < 1e-6);
                let h = k.half_width() as i32;
                for dy in -h..=h {
                    for dx in -h..=h {
                        assert_eq!(k.weight_at_offset(dx, dy), k.weight_at_offset(-dx, -dy));
                    }
                }
            }
        }
    }

    #[test]
    fn test_gaussian_peak_at_center() {
        let k = Kernel::gaussian(5, 1.0).unwrap();
        let center = k.weight_at_offset(0, 0).unwrap();
        assert!(k.data().iter().all(|&w| w <= center));
        assert!(k.weight_at_offset(1, 0).unwrap() > k.weight_at_offset(2, 0).unwrap());
    }

    #[test]
    fn test_gaussian_rejects_bad_parameters() {
        assert!(matches!(
            Kernel::gaussian(4, 1.0),
            Err(FilterError::InvalidKernel(_))
        ));
        assert!(matches!(
            Kernel::gaussian(0, 1.0),
            Err(FilterError::InvalidKernel(_))
        ));
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Kernel::gaussian(3, sigma),
                Err(FilterError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_sobel_layout() {
        let gx = Kernel::sobel_horizontal();
        assert_eq!(gx.weight_at_offset(1, 0), Some(2.0));
        assert_eq!(gx.weight_at_offset(-1, -1), Some(-1.0));
        let gy = Kernel::sobel_vertical();
        assert_eq!(gy.weight_at_offset(0, 1), Some(2.0));
        assert_eq!(gy.weight_at_offset(0, -1), Some(-2.0));
        assert_eq!(gx.sum(), 0.0);
    }

    #[test]
    fn test_flipped_and_box() {
        let gx = Kernel::sobel_horizontal();
        assert_eq!(gx.flipped().weight_at_offset(1, 0), Some(-2.0));
        let b = Kernel::box_kernel(3).unwrap();
        assert!((b.sum() - 1.0).abs() < 1e-12);
        assert!(Kernel::from_slice(3, &[1.0; 8]).is_err());
    }

    #[test]
    fn test_set_and_get() {
        let mut k = Kernel::new(3).unwrap();
        k.set(2, 0, 0.5).unwrap();
        assert_eq!(k.get(2, 0), Some(0.5));
        assert_eq!(k.weight_at_offset(1, -1), Some(0.5));
        assert!(k.set(3, 0, 1.0).is_err());
        assert_eq!(k.get(0, 3), None);
    }
}
