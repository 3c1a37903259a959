//! phototone-core - Basic data structures for grayscale image processing
//!
//! This crate provides the substrate shared by every phototone crate:
//!
//! - [`Pix`] / [`PixMut`] - 8-bit grayscale image (immutable / mutable)
//! - [`FPix`] - Floating-point image for intermediate results
//! - [`ExtendedPix`] / [`BorderPolicy`] - Border extension for windowed filters
//! - [`Window`] - Square neighborhood view into an extended image
//! - [`Histogram`] - Binned intensity counts and equalization
//! - [`ToneLut`] - 256-entry intensity mapping applied to every pixel
//!
//! All operations are synchronous and pure: they take an input image and
//! return a new one. The only in-place operation is
//! [`PixMut::apply_lut_in_place`], which requires exclusive ownership.

pub mod error;
pub mod fpix;
pub mod lut;
pub mod pix;

pub use error::{Error, ErrorKind, Result};
pub use fpix::{FPix, NegativeHandling};
pub use lut::{LUT_SIZE, ToneLut};
pub use pix::{
    BorderPolicy, DEFAULT_HISTOGRAM_BINS, ExtendedPix, Histogram, Pix, PixMut, Window,
};
