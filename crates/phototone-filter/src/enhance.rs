//! Tone enhancement through lookup tables
//!
//! Each enhancement is split into a table generator (`*_trc`, a tone
//! reproduction curve) and an applier, so the same table can be reused or
//! composed with other tables before touching pixels.

use crate::{FilterError, FilterResult};
use phototone_core::{DEFAULT_HISTOGRAM_BINS, Pix, ToneLut};

/// Generate a gamma TRC lookup table.
///
/// Values at or below `minval` map to 0, values at or above `maxval` map to
/// 255, and values in between follow `255 * ((v - minval) / (maxval - minval))^(1/gamma)`.
/// `gamma > 1` brightens midtones, `gamma < 1` darkens them.
///
/// # Errors
///
/// [`FilterError::InvalidArgument`] if `gamma` is not finite and positive
/// or if `minval >= maxval`.
pub fn gamma_trc(gamma: f32, minval: i32, maxval: i32) -> FilterResult<ToneLut> {
    if minval >= maxval {
        return Err(FilterError::InvalidArgument(
            "minval must be less than maxval".into(),
        ));
    }
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(FilterError::InvalidArgument("gamma must be > 0.0".into()));
    }

    let inv_gamma = 1.0_f64 / gamma as f64;
    let range = (maxval - minval) as f64;

    Ok(ToneLut::from_fn(|v| {
        let i = v as i32;
        if i <= minval {
            0
        } else if i >= maxval {
            255
        } else {
            let x = (i - minval) as f64 / range;
            (255.0 * x.powf(inv_gamma)).round().clamp(0.0, 255.0) as u8
        }
    }))
}

/// Apply gamma correction over the full `[0, 255]` range.
pub fn gamma_correct(pix: &Pix, gamma: f32) -> FilterResult<Pix> {
    let lut = gamma_trc(gamma, 0, 255)?;
    Ok(pix.apply_lut(&lut))
}

/// Histogram-equalization table for `pix`, one bin per level.
pub fn equalize_trc(pix: &Pix) -> FilterResult<ToneLut> {
    let hist = pix.histogram(DEFAULT_HISTOGRAM_BINS)?;
    Ok(hist.equalization_lut())
}

/// Equalize the histogram of `pix`.
pub fn equalize(pix: &Pix) -> FilterResult<Pix> {
    let lut = equalize_trc(pix)?;
    Ok(pix.apply_lut(&lut))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_one_is_identity() {
        let lut = gamma_trc(1.0, 0, 255).unwrap();
        assert_eq!(lut, ToneLut::identity());
    }

    #[test]
    fn test_gamma_direction() {
        let bright = gamma_trc(2.0, 0, 255).unwrap();
        let dark = gamma_trc(0.5, 0, 255).unwrap();
        assert!(bright[64] > 64);
        assert!(dark[64] < 64);
        assert!(bright.is_non_decreasing() && dark.is_non_decreasing());
        assert_eq!(bright[0], 0);
        assert_eq!(bright[255], 255);
    }

    #[test]
    fn test_gamma_window() {
        let lut = gamma_trc(1.0, 50, 150).unwrap();
        assert_eq!(lut[40], 0);
        assert_eq!(lut[100], 128);
        assert_eq!(lut[200], 255);
    }

    #[test]
    fn test_gamma_invalid() {
        assert!(gamma_trc(0.0, 0, 255).is_err());
        assert!(gamma_trc(-1.0, 0, 255).is_err());
        assert!(gamma_trc(1.0, 100, 100).is_err());
    }

    #[test]
    fn test_equalize_spreads_narrow_range() {
        let pix = Pix::from_fn(64, 4, |x, _| 100 + (x % 16) as u8);
        let out = equalize(&pix).unwrap();
        let max = out.data().iter().copied().max().unwrap_or(0);
        let min = out.data().iter().copied().min().unwrap_or(0);
        assert_eq!(max, 255);
        assert!(max - min > 200);
    }
}
