//! FPix - Floating-point image
//!
//! `FPix` is a 2D array of `f32` values for intermediate results that do not
//! fit in 8 bits: signed gradients, unclamped convolution sums, gradient
//! magnitudes.
//!
//! # Examples
//!
//! ```
//! use phototone_core::FPix;
//!
//! let mut fpix = FPix::new(100, 100);
//! fpix.set_pixel(10, 20, -0.5).unwrap();
//! assert_eq!(fpix.get_pixel(10, 20), Some(-0.5));
//! ```

use crate::error::{Error, Result};
use crate::pix::Pix;

/// How to handle negative values when converting FPix to Pix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeHandling {
    /// Clip negative values to zero
    #[default]
    ClipToZero,
    /// Take the absolute value
    TakeAbsValue,
}

/// Floating-point image
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FPix {
    /// Create a zero-filled image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create an image with every pixel set to `value`.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Create an image from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(Error::InvalidArgument(format!(
                "data length {} does not match {}x{} image",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert an 8-bit image to float.
    pub fn from_pix(pix: &Pix) -> Self {
        Self {
            width: pix.width(),
            height: pix.height(),
            data: pix.data().iter().map(|&v| v as f32).collect(),
        }
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the value at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the value at `(x, y)` without a bounds check.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set the value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Set the value at `(x, y)` without a bounds check.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = value;
    }

    /// Get raw access to the data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable raw access to the data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Maximum value, or `None` for an empty image.
    pub fn max_value(&self) -> Option<f32> {
        self.data.iter().copied().reduce(f32::max)
    }

    /// Convert to an 8-bit image, rounding to nearest and clamping to `[0, 255]`.
    pub fn to_pix(&self, neg_handling: NegativeHandling) -> Pix {
        Pix::from_fn(self.width, self.height, |x, y| {
            let v = self.get_pixel_unchecked(x, y);
            let v = match neg_handling {
                NegativeHandling::ClipToZero => v,
                NegativeHandling::TakeAbsValue => v.abs(),
            };
            v.round().clamp(0.0, 255.0) as u8
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pix_and_back() {
        let pix = Pix::from_fn(4, 3, |x, y| (x * 60 + y) as u8);
        let fpix = FPix::from_pix(&pix);
        assert_eq!(fpix.get_pixel(3, 2), Some(182.0));
        assert_eq!(fpix.to_pix(NegativeHandling::ClipToZero), pix);
    }

    #[test]
    fn test_to_pix_negative_handling() {
        let fpix = FPix::from_data(3, 1, vec![-12.4, 300.0, 7.5]).unwrap();
        assert_eq!(
            fpix.to_pix(NegativeHandling::ClipToZero).data(),
            &[0, 255, 8]
        );
        assert_eq!(
            fpix.to_pix(NegativeHandling::TakeAbsValue).data(),
            &[12, 255, 8]
        );
    }

    #[test]
    fn test_max_value() {
        assert_eq!(FPix::new(0, 0).max_value(), None);
        let fpix = FPix::from_data(2, 1, vec![-3.0, 2.5]).unwrap();
        assert_eq!(fpix.max_value(), Some(2.5));
    }

    #[test]
    fn test_set_pixel_bounds() {
        let mut fpix = FPix::new(2, 2);
        assert!(fpix.set_pixel(2, 0, 1.0).is_err());
        fpix.set_pixel(1, 1, 4.0).unwrap();
        assert_eq!(fpix.get_pixel_unchecked(1, 1), 4.0);
    }
}
