//! Pix - The grayscale image container
//!
//! `Pix` is a row-major grid of 8-bit intensity samples. It is the
//! substrate every filter in the workspace reads from and writes to.
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership) and is never
//! mutated through a shared handle. Operations return a new `Pix`. To
//! modify pixel data in place, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.
//!
//! # Empty images
//!
//! Zero width or height is allowed. Such an image has no pixels, and every
//! per-pixel operation on it produces another empty image of the same shape.

mod access;
pub mod arith;
mod border;
mod histogram;
mod window;

pub use border::{BorderPolicy, ExtendedPix};
pub use histogram::{DEFAULT_HISTOGRAM_BINS, Histogram};
pub use window::Window;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal pixel storage
#[derive(Debug, Clone, PartialEq, Eq)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples, `width * height` bytes in row-major order
    data: Vec<u8>,
}

/// Pix - 8-bit grayscale image
///
/// # Examples
///
/// ```
/// use phototone_core::Pix;
///
/// let pix = Pix::new(640, 480);
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.get_pixel(10, 10), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new image with every pixel set to 0.
    pub fn new(width: u32, height: u32) -> Self {
        Self::new_with_value(width, height, 0)
    }

    /// Create a new image with every pixel set to `value`.
    pub fn new_with_value(width: u32, height: u32, value: u8) -> Self {
        let size = (width as usize) * (height as usize);
        Pix {
            inner: Arc::new(PixData {
                width,
                height,
                data: vec![value; size],
            }),
        }
    }

    /// Create an image from row-major sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "data length {} does not match {}x{} image",
                data.len(),
                width,
                height
            )));
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image by evaluating `f(x, y)` at every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> u8,
    {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Pix {
            inner: Arc::new(PixData {
                width,
                height,
                data,
            }),
        }
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.data.len()
    }

    /// True if the image has zero width or zero height.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get one row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get the number of strong references to this image.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Fail with [`Error::DimensionMismatch`] unless `other` has our size.
    pub fn check_same_size(&self, other: &Pix) -> Result<()> {
        if self.sizes_equal(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            })
        }
    }

    /// Create a zero-filled image with the same dimensions.
    pub fn create_template(&self) -> Self {
        Self::new(self.inner.width, self.inner.height)
    }

    /// Copy the pixel data into a new, unshared image.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(PixData::clone(&self.inner)),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only when this is the sole handle to the data; otherwise
    /// the original handle is returned unchanged.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData::clone(&self.inner),
        }
    }

    /// Consume the image and return its samples, copying only if shared.
    pub fn into_data(self) -> Vec<u8> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => data.data,
            Err(arc) => arc.data.clone(),
        }
    }
}

impl PartialEq for Pix {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for Pix {}

/// Mutable Pix
///
/// Exclusive owner of image data. Convert back to an immutable [`Pix`]
/// with `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable raw access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get one mutable row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set every pixel to `value`.
    pub fn set_all(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200);
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.pixel_count(), 20_000);
        assert!(pix.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pix_empty_allowed() {
        let pix = Pix::new(0, 5);
        assert!(pix.is_empty());
        assert_eq!(pix.dimensions(), (0, 5));
    }

    #[test]
    fn test_from_data_length_check() {
        assert!(Pix::from_data(2, 2, vec![1, 2, 3, 4]).is_ok());
        let err = Pix::from_data(2, 2, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_from_fn_row_major() {
        let pix = Pix::from_fn(3, 2, |x, y| (x + 10 * y) as u8);
        assert_eq!(pix.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(pix.row(1), &[10, 11, 12]);
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix = Pix::new(4, 4);
        let shared = pix.clone();
        assert_eq!(pix.ref_count(), 2);
        let pix = pix.try_into_mut().unwrap_err();
        drop(shared);
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_all(9);
        let pix: Pix = pm.into();
        assert!(pix.data().iter().all(|&v| v == 9));
    }

    #[test]
    fn test_to_mut_does_not_alias() {
        let pix = Pix::new_with_value(3, 3, 5);
        let mut pm = pix.to_mut();
        pm.set_all(7);
        assert_eq!(pix.get_pixel(0, 0), Some(5));
        let changed: Pix = pm.into();
        assert_ne!(pix, changed);
    }

    #[test]
    fn test_check_same_size() {
        let a = Pix::new(4, 3);
        let b = Pix::new(3, 4);
        let err = a.check_same_size(&b).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: (4, 3),
                actual: (3, 4)
            }
        ));
    }
}
