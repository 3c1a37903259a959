//! Canny edge regression test
//!
//! Threshold validation, uniform input, thin single-pixel edges on a step,
//! closed outlines around a square, and connectivity-dependent hysteresis.

use phototone_core::{ErrorKind, Pix};
use phototone_filter::{CannyOptions, Connectivity, canny};
use phototone_test::{RegParams, synth};

#[test]
fn canny_reg() {
    let mut rp = RegParams::new("canny");

    // --- Threshold ordering is enforced before any work ---
    let pix = synth::noise(16, 16, 2);
    let err = canny(&pix, &CannyOptions::with_thresholds(120.0, 60.0)).unwrap_err();
    rp.check(err.kind() == ErrorKind::InvalidArgument, "low > high");
    let err = canny(&pix, &CannyOptions::with_thresholds(-5.0, 60.0)).unwrap_err();
    rp.check(err.kind() == ErrorKind::InvalidArgument, "negative low");

    // --- Uniform input: no edges ---
    for value in [0, 99, 255] {
        let out = canny(&synth::uniform(24, 18, value), &CannyOptions::default()).expect("canny");
        rp.compare_values(0.0, out.count_nonzero() as f64, 0.0);
    }

    // --- Output is binary ---
    let noisy = synth::noise(40, 40, 17);
    let out = canny(&noisy, &CannyOptions::with_thresholds(20.0, 60.0)).expect("canny");
    rp.check(out.data().iter().all(|&v| v == 0 || v == 255), "binary output");

    // --- Vertical step: one thin edge per row, beside the step ---
    let step = synth::step_edge(30, 20, 15, 20, 220);
    let out = canny(&step, &CannyOptions::default()).expect("canny");
    for y in 0..20 {
        let row: Vec<u32> = (0..30).filter(|&x| out.get_pixel(x, y) == Some(255)).collect();
        rp.check(row.len() <= 2, &format!("row {y} is thin"));
        rp.check(
            row.iter().all(|&x| (13..=16).contains(&x)),
            &format!("row {y} edge at step"),
        );
        rp.check(!row.is_empty(), &format!("row {y} has an edge"));
    }
    rp.write_pix_for_display(&out, "step_canny").expect("display");

    // --- Square: edge pixels surround the interior ---
    let sq = synth::square(40, 40, 10, 10, 20, 10, 240);
    let out = canny(&sq, &CannyOptions::default()).expect("canny");
    rp.compare_values(0.0, out.get_pixel(20, 20).unwrap_or(255) as f64, 0.0);
    rp.check(out.count_nonzero() >= 4 * 13, "outline present");
    // Rows away from the corners see a pure horizontal step
    let left = (14..27)
        .filter(|&y| (8..=11).any(|x| out.get_pixel(x, y) == Some(255)))
        .count();
    rp.compare_values(13.0, left as f64, 0.0);
    let right = (14..27)
        .filter(|&y| (28..=31).any(|x| out.get_pixel(x, y) == Some(255)))
        .count();
    rp.compare_values(13.0, right as f64, 0.0);
    rp.write_pix_for_display(&out, "square_canny").expect("display");

    // --- Thresholds above every response leave nothing ---
    let strict = canny(&sq, &CannyOptions::with_thresholds(10_000.0, 10_000.0)).expect("canny");
    rp.compare_values(0.0, strict.count_nonzero() as f64, 0.0);

    // --- Four-connectivity never finds more than eight ---
    let four = CannyOptions {
        connectivity: Connectivity::Four,
        ..CannyOptions::with_thresholds(10.0, 200.0)
    };
    let eight = CannyOptions {
        connectivity: Connectivity::Eight,
        ..CannyOptions::with_thresholds(10.0, 200.0)
    };
    let n4 = canny(&noisy, &four).expect("canny").count_nonzero();
    let n8 = canny(&noisy, &eight).expect("canny").count_nonzero();
    rp.check(n4 <= n8, "four-connected subset of eight-connected");

    // --- Zero-area input ---
    let empty = canny(&Pix::new(0, 0), &CannyOptions::default()).expect("canny");
    rp.check(empty.is_empty(), "empty in, empty out");

    assert!(rp.cleanup(), "canny regression test failed");
}
