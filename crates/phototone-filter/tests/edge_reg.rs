//! Sobel edge regression test
//!
//! Uniform images give no response; a square gives responses only on its
//! outline; orientation selects the matching gradient component.

use phototone_core::BorderPolicy;
use phototone_filter::{EdgeOrientation, sobel_edge, sobel_edge_with_policy, sobel_gradients};
use phototone_test::{RegParams, synth};

#[test]
fn edge_reg() {
    let mut rp = RegParams::new("edge");

    // --- Uniform input: all-zero magnitude ---
    for value in [0, 1, 128, 255] {
        let flat = synth::uniform(23, 11, value);
        let out = sobel_edge(&flat, EdgeOrientation::All).expect("sobel");
        rp.compare_values(0.0, out.count_nonzero() as f64, 0.0);
    }

    // --- Square: response hugs the outline ---
    let sq = synth::square(32, 32, 8, 8, 16, 0, 200);
    let out = sobel_edge(&sq, EdgeOrientation::All).expect("sobel");
    rp.compare_values(0.0, out.get_pixel(16, 16).unwrap_or(255) as f64, 0.0);
    rp.compare_values(0.0, out.get_pixel(2, 2).unwrap_or(255) as f64, 0.0);
    rp.compare_values(255.0, out.get_pixel(8, 16).unwrap_or(0) as f64, 0.0);
    rp.compare_values(255.0, out.get_pixel(16, 7).unwrap_or(0) as f64, 0.0);
    rp.write_pix_for_display(&out, "square_sobel").expect("display");

    // --- Orientation: a vertical step only has an x gradient ---
    let step = synth::step_edge(20, 10, 10, 30, 90);
    let (gx, gy) = sobel_gradients(&step, BorderPolicy::Reflect).expect("gradients");
    rp.compare_values(240.0, gx.get_pixel(9, 5).unwrap_or(0.0) as f64, 1e-4);
    rp.check(gy.data().iter().all(|&v| v == 0.0), "no y gradient");
    let horiz = sobel_edge(&step, EdgeOrientation::Horizontal).expect("sobel");
    rp.compare_values(0.0, horiz.count_nonzero() as f64, 0.0);
    let vert = sobel_edge(&step, EdgeOrientation::Vertical).expect("sobel");
    rp.compare_values(240.0, vert.get_pixel(10, 0).unwrap_or(0) as f64, 0.0);

    // --- Zero borders turn the frame into an edge ---
    let flat = synth::uniform(10, 10, 100);
    let framed = sobel_edge_with_policy(&flat, EdgeOrientation::All, BorderPolicy::Zero)
        .expect("sobel");
    rp.check(framed.get_pixel(0, 5) == Some(255), "frame edge");
    rp.check(framed.get_pixel(5, 5) == Some(0), "interior flat");

    assert!(rp.cleanup(), "edge regression test failed");
}
