//! Pixel access functions
//!
//! Bounds-checked and unchecked getters/setters. "Unchecked" here means the
//! caller guarantees the coordinate is inside the image; an out-of-range
//! coordinate panics on the slice index rather than returning an error.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// Get the pixel value at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the pixel value at `(x, y)` without a bounds check.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }
}

impl PixMut {
    /// Get the pixel value at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the pixel value at `(x, y)` without a bounds check.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }

    /// Set the pixel value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        let (width, height) = self.dimensions();
        if x >= width || y >= height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set the pixel value at `(x, y)` without a bounds check.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let idx = y as usize * self.width() as usize + x as usize;
        self.data_mut()[idx] = val;
    }
}
