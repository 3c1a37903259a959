//! Tone lookup tables
//!
//! A [`ToneLut`] is a total function from intensity to intensity, stored as
//! 256 entries. Histogram equalization, gamma correction and user-drawn
//! tone curves all produce one, and every pixel of an image is remapped
//! through it independent of position.

use crate::error::{Error, Result};
use crate::{Pix, PixMut};
use std::ops::Index;

/// Number of entries in a [`ToneLut`].
pub const LUT_SIZE: usize = 256;

/// A 256-entry intensity mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToneLut([u8; LUT_SIZE]);

impl ToneLut {
    /// The mapping `v -> v`.
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Build a table by evaluating `f` on every intensity.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(u8) -> u8,
    {
        let mut table = [0u8; LUT_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Self(table)
    }

    /// Build a table from a slice that must hold exactly 256 entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for any other length.
    pub fn from_slice(values: &[u8]) -> Result<Self> {
        let table: [u8; LUT_SIZE] = values.try_into().map_err(|_| {
            Error::InvalidArgument(format!(
                "lookup table must have {LUT_SIZE} entries, got {}",
                values.len()
            ))
        })?;
        Ok(Self(table))
    }

    /// Mapped value for intensity `v`.
    #[inline]
    pub fn get(&self, v: u8) -> u8 {
        self.0[v as usize]
    }

    /// Borrow the raw table.
    #[inline]
    pub fn as_array(&self) -> &[u8; LUT_SIZE] {
        &self.0
    }

    /// True if `lut[i] <= lut[i + 1]` everywhere.
    pub fn is_non_decreasing(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }

    /// The composition `other(self(v))`.
    pub fn then(&self, other: &ToneLut) -> ToneLut {
        Self::from_fn(|v| other.get(self.get(v)))
    }
}

impl Default for ToneLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[u8; LUT_SIZE]> for ToneLut {
    fn from(table: [u8; LUT_SIZE]) -> Self {
        Self(table)
    }
}

impl Index<usize> for ToneLut {
    type Output = u8;

    #[inline]
    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl Pix {
    /// Remap every pixel through `lut`, returning a new image.
    pub fn apply_lut(&self, lut: &ToneLut) -> Pix {
        let mut out = self.to_mut();
        out.apply_lut_in_place(lut);
        out.into()
    }

    /// Remap every pixel through a table given as a raw slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless `lut.len() == 256`. The
    /// source is left untouched.
    pub fn apply_lut_slice(&self, lut: &[u8]) -> Result<Pix> {
        let lut = ToneLut::from_slice(lut)?;
        Ok(self.apply_lut(&lut))
    }
}

impl PixMut {
    /// Remap every pixel through `lut` in place.
    pub fn apply_lut_in_place(&mut self, lut: &ToneLut) {
        for v in self.data_mut() {
            *v = lut.get(*v);
        }
    }
}
