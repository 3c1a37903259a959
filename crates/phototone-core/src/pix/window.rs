//! Neighborhood windows
//!
//! A [`Window`] is a read-only `size x size` view into an [`ExtendedPix`],
//! centered on a pixel of the original image. No samples are copied.

use super::ExtendedPix;
use crate::error::{Error, Result};

/// Square neighborhood centered on a source pixel.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    ext: &'a ExtendedPix,
    /// Top-left corner in source coordinates (may be negative)
    x0: i64,
    y0: i64,
    size: u32,
}

impl<'a> Window<'a> {
    /// Side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Sample at column `i`, row `j` of the window, or `None` past its edge.
    #[inline]
    pub fn get(&self, i: u32, j: u32) -> Option<u8> {
        if i >= self.size || j >= self.size {
            return None;
        }
        Some(self.ext.sample(self.x0 + i as i64, self.y0 + j as i64))
    }

    /// The center sample.
    #[inline]
    pub fn center(&self) -> u8 {
        let h = (self.size / 2) as i64;
        self.ext.sample(self.x0 + h, self.y0 + h)
    }

    /// Iterate over samples in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + 'a {
        let Window { ext, x0, y0, size } = *self;
        (0..size as i64)
            .flat_map(move |j| (0..size as i64).map(move |i| ext.sample(x0 + i, y0 + j)))
    }

    /// Copy the samples out, row-major.
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }
}

impl ExtendedPix {
    /// Extract the `size x size` window centered on source pixel `(cx, cy)`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `size` is zero or even, or if the
    ///   border is narrower than `size / 2`.
    /// - [`Error::IndexOutOfBounds`] if `(cx, cy)` is outside the source image.
    pub fn window(&self, size: u32, cx: u32, cy: u32) -> Result<Window<'_>> {
        if size == 0 || size % 2 == 0 {
            return Err(Error::InvalidArgument(format!(
                "window size must be odd and positive, got {size}"
            )));
        }
        let half = size / 2;
        if half > self.half_width() {
            return Err(Error::InvalidArgument(format!(
                "window of size {size} needs a border of {half}, have {}",
                self.half_width()
            )));
        }
        let (width, height) = self.source_dimensions();
        if cx >= width || cy >= height {
            return Err(Error::IndexOutOfBounds {
                x: cx,
                y: cy,
                width,
                height,
            });
        }
        Ok(Window {
            ext: self,
            x0: cx as i64 - half as i64,
            y0: cy as i64 - half as i64,
            size,
        })
    }
}
