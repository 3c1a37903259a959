//! Pixel-wise point operations
//!
//! Inversion, two-image averaging and masking. These are the restoration
//! primitives the editor applies between filtering steps; each returns a
//! new image.

use super::Pix;
use crate::error::Result;

impl Pix {
    /// Invert intensities: `v -> 255 - v`.
    pub fn invert(&self) -> Pix {
        let mut out = self.to_mut();
        for v in out.data_mut() {
            *v = 255 - *v;
        }
        out.into()
    }

    /// Per-pixel mean of two images, rounded half up: `(a + b + 1) / 2`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// if the sizes differ.
    pub fn average(&self, other: &Pix) -> Result<Pix> {
        self.check_same_size(other)?;
        let data = self
            .data()
            .iter()
            .zip(other.data())
            .map(|(&a, &b)| ((a as u16 + b as u16 + 1) / 2) as u8)
            .collect();
        Pix::from_data(self.width(), self.height(), data)
    }

    /// Keep pixels where `mask` is non-zero; zero everything else.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// if the sizes differ.
    pub fn apply_mask(&self, mask: &Pix) -> Result<Pix> {
        self.check_same_size(mask)?;
        let data = self
            .data()
            .iter()
            .zip(mask.data())
            .map(|(&v, &m)| if m != 0 { v } else { 0 })
            .collect();
        Pix::from_data(self.width(), self.height(), data)
    }

    /// Number of non-zero pixels.
    pub fn count_nonzero(&self) -> usize {
        self.data().iter().filter(|&&v| v != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_invert_twice_is_identity() {
        let pix = Pix::from_fn(8, 8, |x, y| (x * 31 + y) as u8);
        let inv = pix.invert();
        assert_eq!(inv.get_pixel(0, 0), Some(255));
        assert_eq!(inv.invert(), pix);
    }

    #[test]
    fn test_average_rounds_half_up() {
        let a = Pix::from_data(3, 1, vec![0, 1, 255]).unwrap();
        let b = Pix::from_data(3, 1, vec![0, 2, 255]).unwrap();
        assert_eq!(a.average(&b).unwrap().data(), &[0, 2, 255]);
    }

    #[test]
    fn test_average_size_mismatch() {
        let err = Pix::new(2, 2).average(&Pix::new(2, 3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_apply_mask() {
        let pix = Pix::new_with_value(2, 2, 50);
        let mask = Pix::from_data(2, 2, vec![0, 1, 255, 0]).unwrap();
        let out = pix.apply_mask(&mask).unwrap();
        assert_eq!(out.data(), &[0, 50, 50, 0]);
        assert_eq!(out.count_nonzero(), 2);
    }
}
