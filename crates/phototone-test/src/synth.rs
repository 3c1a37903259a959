//! Synthetic test images
//!
//! Deterministic inputs with known structure, so regression tests do not
//! depend on binary fixtures.

use phototone_core::Pix;

/// Every pixel set to `value`.
pub fn uniform(width: u32, height: u32, value: u8) -> Pix {
    Pix::new_with_value(width, height, value)
}

/// Horizontal ramp from 0 at the left edge to 255 at the right edge.
pub fn ramp(width: u32, height: u32) -> Pix {
    let denom = width.saturating_sub(1).max(1) as f64;
    Pix::from_fn(width, height, |x, _| (x as f64 * 255.0 / denom).round() as u8)
}

/// Vertical step edge: `low` for `x < edge_x`, `high` elsewhere.
pub fn step_edge(width: u32, height: u32, edge_x: u32, low: u8, high: u8) -> Pix {
    Pix::from_fn(width, height, |x, _| if x < edge_x { low } else { high })
}

/// A filled square of `fg` on `bg`, with top-left corner `(x0, y0)`.
pub fn square(width: u32, height: u32, x0: u32, y0: u32, side: u32, bg: u8, fg: u8) -> Pix {
    Pix::from_fn(width, height, |x, y| {
        let inside = x >= x0 && x < x0 + side && y >= y0 && y < y0 + side;
        if inside { fg } else { bg }
    })
}

/// Checkerboard of `cell x cell` tiles alternating between `a` and `b`.
pub fn checkerboard(width: u32, height: u32, cell: u32, a: u8, b: u8) -> Pix {
    let cell = cell.max(1);
    Pix::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b }
    })
}

/// Pseudo-random texture from a fixed linear congruential sequence.
pub fn noise(width: u32, height: u32, seed: u32) -> Pix {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    Pix::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 24) as u8
    })
}
