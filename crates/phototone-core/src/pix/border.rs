//! Border extension
//!
//! Windowed operations near the image edge need samples that lie outside
//! the image. [`Pix::extend_border`] synthesizes them once, producing an
//! [`ExtendedPix`] of size `(w + 2r, h + 2r)` whose interior
//! `[r, r + w) x [r, r + h)` is an exact copy of the source.

use super::Pix;
use crate::error::{Error, Result};

/// How samples outside the image are synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderPolicy {
    /// Mirror across the edge without repeating the edge pixel
    /// (`-1 -> 1`, `-2 -> 2`, `w -> w - 2`).
    #[default]
    Reflect,
    /// Out-of-range samples read as 0
    Zero,
}

/// Map a possibly out-of-range index into `[0, n)` by mirror reflection.
///
/// Reflection is periodic with period `2 * (n - 1)`, so any half-width is
/// accepted even when it exceeds the image size. A single-pixel axis
/// reflects onto itself.
#[inline]
pub(crate) fn reflect_index(i: i64, n: i64) -> i64 {
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let m = i.rem_euclid(period);
    if m < n { m } else { period - m }
}

/// An image enlarged by a border of `half_width` pixels on every side.
///
/// Scoped to a single filtering call; it carries the geometry needed to
/// translate source coordinates into its own.
#[derive(Debug, Clone)]
pub struct ExtendedPix {
    pix: Pix,
    half_width: u32,
    policy: BorderPolicy,
    src_width: u32,
    src_height: u32,
}

impl ExtendedPix {
    /// Border width added on each side.
    #[inline]
    pub fn half_width(&self) -> u32 {
        self.half_width
    }

    /// Policy the border was generated with.
    #[inline]
    pub fn policy(&self) -> BorderPolicy {
        self.policy
    }

    /// Dimensions of the image this was extended from.
    #[inline]
    pub fn source_dimensions(&self) -> (u32, u32) {
        (self.src_width, self.src_height)
    }

    /// Width of the extended image.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pix.width()
    }

    /// Height of the extended image.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pix.height()
    }

    /// Borrow the extended image.
    #[inline]
    pub fn as_pix(&self) -> &Pix {
        &self.pix
    }

    /// Take the extended image.
    pub fn into_pix(self) -> Pix {
        self.pix
    }

    /// Read a sample addressed in *source* coordinates.
    ///
    /// Valid for `-r <= x < w + r` and `-r <= y < h + r`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the extended image.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> u8 {
        let r = self.half_width as i64;
        self.pix.get_pixel_unchecked((x + r) as u32, (y + r) as u32)
    }
}

impl Pix {
    /// Extend the image by `half_width` pixels on every side.
    ///
    /// `half_width == 0` shares the source data unchanged. A zero-area
    /// source yields a zero-area result with the source's dimensions,
    /// since there is nothing to sample from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the extended size overflows `u32`.
    ///
    /// # Example
    ///
    /// ```
    /// use phototone_core::{BorderPolicy, Pix};
    ///
    /// let pix = Pix::from_data(3, 1, vec![10, 20, 30]).unwrap();
    /// let ext = pix.extend_border(1, BorderPolicy::Reflect).unwrap();
    /// assert_eq!(ext.as_pix().row(1), &[20, 10, 20, 30, 20]);
    /// ```
    pub fn extend_border(&self, half_width: u32, policy: BorderPolicy) -> Result<ExtendedPix> {
        let (w, h) = self.dimensions();
        if half_width == 0 || self.is_empty() {
            return Ok(ExtendedPix {
                pix: self.clone(),
                half_width: if self.is_empty() { 0 } else { half_width },
                policy,
                src_width: w,
                src_height: h,
            });
        }

        let grow = half_width
            .checked_mul(2)
            .ok_or_else(|| Error::InvalidArgument(format!("half width {half_width} too large")))?;
        let (ew, eh) = match (w.checked_add(grow), h.checked_add(grow)) {
            (Some(ew), Some(eh)) => (ew, eh),
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "extending {w}x{h} by {half_width} overflows"
                )));
            }
        };

        let r = half_width as i64;
        let (wi, hi) = (w as i64, h as i64);
        let pix = match policy {
            BorderPolicy::Reflect => Pix::from_fn(ew, eh, |x, y| {
                let sx = reflect_index(x as i64 - r, wi);
                let sy = reflect_index(y as i64 - r, hi);
                self.get_pixel_unchecked(sx as u32, sy as u32)
            }),
            BorderPolicy::Zero => {
                let mut out = Pix::new(ew, eh).to_mut();
                for y in 0..h {
                    let dst = out.row_mut(y + half_width);
                    dst[half_width as usize..(half_width + w) as usize]
                        .copy_from_slice(self.row(y));
                }
                out.into()
            }
        };

        log::trace!("extended {w}x{h} by {half_width} ({policy:?}) -> {ew}x{eh}");

        Ok(ExtendedPix {
            pix,
            half_width,
            policy,
            src_width: w,
            src_height: h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32) -> Pix {
        Pix::from_fn(w, h, |x, y| (x * 10 + y * 50) as u8)
    }

    #[test]
    fn test_reflect_index() {
        assert_eq!(reflect_index(-1, 5), 1);
        assert_eq!(reflect_index(-2, 5), 2);
        assert_eq!(reflect_index(5, 5), 3);
        assert_eq!(reflect_index(6, 5), 2);
        assert_eq!(reflect_index(2, 5), 2);
        // Wider than the image: keeps bouncing
        assert_eq!(reflect_index(-5, 3), 1);
        assert_eq!(reflect_index(-7, 1), 0);
    }

    #[test]
    fn test_interior_is_exact_copy() {
        let pix = ramp(4, 3);
        for policy in [BorderPolicy::Reflect, BorderPolicy::Zero] {
            for r in 0..4u32 {
                let ext = pix.extend_border(r, policy).unwrap();
                assert_eq!(ext.width(), 4 + 2 * r);
                assert_eq!(ext.height(), 3 + 2 * r);
                for y in 0..3 {
                    for x in 0..4 {
                        assert_eq!(
                            ext.as_pix().get_pixel(x + r, y + r),
                            pix.get_pixel(x, y)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_reflect_does_not_repeat_edge() {
        let pix = Pix::from_data(4, 1, vec![1, 2, 3, 4]).unwrap();
        let ext = pix.extend_border(2, BorderPolicy::Reflect).unwrap();
        assert_eq!(ext.as_pix().row(2), &[3, 2, 1, 2, 3, 4, 3, 2]);
        assert_eq!(ext.sample(-1, 0), 2);
        assert_eq!(ext.sample(4, 0), 3);
    }

    #[test]
    fn test_zero_border() {
        let pix = Pix::new_with_value(2, 2, 9);
        let ext = pix.extend_border(1, BorderPolicy::Zero).unwrap();
        let expected = [0, 0, 0, 0, 0, 9, 9, 0, 0, 9, 9, 0, 0, 0, 0, 0];
        assert_eq!(ext.as_pix().data(), &expected);
    }

    #[test]
    fn test_zero_half_width_shares_source() {
        let pix = ramp(3, 3);
        let ext = pix.extend_border(0, BorderPolicy::Reflect).unwrap();
        assert_eq!(ext.as_pix(), &pix);
        assert_eq!(pix.ref_count(), 2);
    }

    #[test]
    fn test_empty_source() {
        let pix = Pix::new(0, 4);
        let ext = pix.extend_border(3, BorderPolicy::Reflect).unwrap();
        assert_eq!(ext.source_dimensions(), (0, 4));
        assert_eq!(ext.as_pix().dimensions(), (0, 4));
    }
}
