//! Histogram generation for Pix images
//!
//! The intensity range `[0, 255]` is split into `nbins` equal-width bins;
//! the last bin is closed so that 255 is counted. The cumulative
//! distribution of a histogram drives histogram equalization.

use super::Pix;
use crate::ToneLut;
use crate::error::{Error, Result};

/// Default number of bins: one per intensity level.
pub const DEFAULT_HISTOGRAM_BINS: u32 = 256;

/// Intensity histogram with explicit bin edges.
///
/// Invariants: `edges.len() == counts.len() + 1`, edges strictly
/// increasing from 0 to 255.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: Vec<u64>,
    edges: Vec<f64>,
}

impl Histogram {
    /// Build a histogram from precomputed bin counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `counts` is empty.
    pub fn from_counts(counts: Vec<u64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(Error::InvalidArgument(
                "histogram needs at least one bin".into(),
            ));
        }
        let n = counts.len();
        let edges = (0..=n).map(|i| i as f64 * 255.0 / n as f64).collect();
        Ok(Self { counts, edges })
    }

    /// Number of bins.
    #[inline]
    pub fn nbins(&self) -> usize {
        self.counts.len()
    }

    /// Bin counts.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Bin edges, `nbins + 1` values.
    #[inline]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Total number of counted samples.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Index of the bin that intensity `value` falls into.
    #[inline]
    pub fn bin_index(&self, value: u8) -> usize {
        bin_index(value, self.counts.len())
    }

    /// Running sums of the bin counts.
    pub fn cumulative(&self) -> Vec<u64> {
        self.counts
            .iter()
            .scan(0u64, |acc, &c| {
                *acc += c;
                Some(*acc)
            })
            .collect()
    }

    /// Histogram-equalization lookup table.
    ///
    /// `lut[v] = round(cdf[bin(v)] * 255 / total)`, which is non-decreasing
    /// in `v`. An empty histogram maps every value to itself.
    pub fn equalization_lut(&self) -> ToneLut {
        let total = self.total();
        if total == 0 {
            return ToneLut::identity();
        }
        let cdf = self.cumulative();
        log::debug!(
            "equalization over {} samples in {} bins",
            total,
            self.nbins()
        );
        ToneLut::from_fn(|v| {
            let c = cdf[self.bin_index(v)] as f64;
            (c * 255.0 / total as f64).round().clamp(0.0, 255.0) as u8
        })
    }
}

#[inline]
fn bin_index(value: u8, nbins: usize) -> usize {
    ((value as usize * nbins) / 255).min(nbins - 1)
}

impl Pix {
    /// Compute an `nbins`-bin intensity histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `nbins` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use phototone_core::Pix;
    ///
    /// let pix = Pix::new_with_value(10, 10, 200);
    /// let hist = pix.histogram(256).unwrap();
    /// assert_eq!(hist.counts()[200], 100);
    /// assert_eq!(hist.total(), 100);
    /// ```
    pub fn histogram(&self, nbins: u32) -> Result<Histogram> {
        if nbins == 0 {
            return Err(Error::InvalidArgument("nbins must be >= 1".into()));
        }
        let nbins = nbins as usize;

        let mut per_value = [0u64; 256];
        for &v in self.data() {
            per_value[v as usize] += 1;
        }

        let mut counts = vec![0u64; nbins];
        for (v, &c) in per_value.iter().enumerate() {
            counts[bin_index(v as u8, nbins)] += c;
        }
        Histogram::from_counts(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_sums_to_pixel_count() {
        let pix = Pix::from_fn(17, 9, |x, y| (x * 13 + y * 7) as u8);
        for nbins in [1, 2, 7, 64, 255, 256, 1000] {
            let hist = pix.histogram(nbins).unwrap();
            assert_eq!(hist.total(), 17 * 9);
            assert_eq!(hist.nbins(), nbins as usize);
            assert_eq!(hist.edges().len(), nbins as usize + 1);
        }
    }

    #[test]
    fn test_edges_strictly_increasing() {
        let hist = Pix::new(1, 1).histogram(10).unwrap();
        assert_eq!(hist.edges()[0], 0.0);
        assert_eq!(hist.edges()[10], 255.0);
        assert!(hist.edges().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_last_bin_includes_255() {
        let pix = Pix::from_data(3, 1, vec![0, 254, 255]).unwrap();
        let hist = pix.histogram(2).unwrap();
        assert_eq!(hist.counts(), &[1, 2]);
        let hist = pix.histogram(256).unwrap();
        assert_eq!(hist.counts()[255], 1);
        assert_eq!(hist.counts()[254], 1);
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(Pix::new(2, 2).histogram(0).is_err());
        assert!(Histogram::from_counts(Vec::new()).is_err());
    }

    #[test]
    fn test_equalization_lut_non_decreasing() {
        let pix = Pix::from_fn(32, 32, |x, y| ((x * y) % 97) as u8);
        let lut = pix.histogram(256).unwrap().equalization_lut();
        assert!(lut.is_non_decreasing());
        assert_eq!(lut[96], 255);
    }

    #[test]
    fn test_equalization_two_levels() {
        let pix = Pix::from_fn(4, 1, |x, _| if x < 2 { 10 } else { 20 });
        let lut = pix.histogram(256).unwrap().equalization_lut();
        assert_eq!(lut[9], 0);
        assert_eq!(lut[10], 128);
        assert_eq!(lut[20], 255);
    }

    #[test]
    fn test_equalization_empty_is_identity() {
        let lut = Pix::new(0, 0).histogram(256).unwrap().equalization_lut();
        assert_eq!(lut, ToneLut::identity());
    }
}
