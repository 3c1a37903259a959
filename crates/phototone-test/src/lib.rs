//! phototone-test - Regression test framework for phototone
//!
//! Supports two modes, selected with the `REGTEST_MODE` environment variable:
//!
//! - **Compare** (default): run every check in memory
//! - **Display**: additionally write intermediate images to `tests/regout/`
//!   for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use phototone_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("convolve");
//! let pix = synth::ramp(64, 32);
//! rp.compare_values(64.0, pix.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // phototone-test is at crates/phototone-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
