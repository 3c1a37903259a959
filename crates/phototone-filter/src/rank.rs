//! Rank filtering operations
//!
//! Order-statistic filters over a square `size x size` window: each output
//! pixel is the sample of the given rank among its neighborhood. Rank 0.0
//! is the minimum, 0.5 the median, 1.0 the maximum.

use crate::{FilterError, FilterResult};
use phototone_core::{BorderPolicy, Pix};
use rayon::prelude::*;

/// Apply a rank filter.
///
/// The selected element is `round(rank * (size² - 1))` of the sorted window.
///
/// # Errors
///
/// - [`FilterError::InvalidKernel`] unless `size` is odd and positive
/// - [`FilterError::InvalidArgument`] unless `rank` is in `[0.0, 1.0]`
pub fn rank_filter(pix: &Pix, size: u32, rank: f32, policy: BorderPolicy) -> FilterResult<Pix> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "window size must be odd and positive, got {size}"
        )));
    }
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidArgument(format!(
            "rank must be in [0, 1], got {rank}"
        )));
    }
    if pix.is_empty() || size == 1 {
        return Ok(pix.clone());
    }

    let n = (size as usize)
        .checked_mul(size as usize)
        .ok_or_else(|| FilterError::InvalidKernel(format!("window size {size} is too large")))?;
    let target = (rank as f64 * (n - 1) as f64).round() as usize;
    let ext = pix.extend_border(size / 2, policy)?;

    let mut out = pix.create_template().to_mut();
    out.data_mut()
        .par_chunks_mut(pix.width() as usize)
        .enumerate()
        .try_for_each(|(y, row)| -> FilterResult<()> {
            let mut buf = Vec::with_capacity(n);
            for (x, dst) in row.iter_mut().enumerate() {
                buf.clear();
                buf.extend(ext.window(size, x as u32, y as u32)?.iter());
                let (_, v, _) = buf.select_nth_unstable(target);
                *dst = *v;
            }
            Ok(())
        })?;

    Ok(out.into())
}

/// Apply median filter (rank = 0.5).
pub fn median_filter(pix: &Pix, size: u32, policy: BorderPolicy) -> FilterResult<Pix> {
    rank_filter(pix, size, 0.5, policy)
}

/// Apply minimum filter (rank = 0.0).
pub fn min_filter(pix: &Pix, size: u32, policy: BorderPolicy) -> FilterResult<Pix> {
    rank_filter(pix, size, 0.0, policy)
}

/// Apply maximum filter (rank = 1.0).
pub fn max_filter(pix: &Pix, size: u32, policy: BorderPolicy) -> FilterResult<Pix> {
    rank_filter(pix, size, 1.0, policy)
}
