//! phototone - Raster filtering and tone-mapping core for grayscale images
//!
//! Re-exports the workspace crates behind one dependency:
//!
//! - core types ([`Pix`], [`FPix`], [`ToneLut`], [`Histogram`], border
//!   extension and windows) at the top level
//! - [`filter`]: convolution, Sobel/Canny edges, rank filters, gamma and
//!   equalization, tone curves
//! - [`io`]: PNG/PGM/JPEG decode and encode
//!
//! # Example
//!
//! ```
//! use phototone::filter::{CannyOptions, canny, gaussian_blur_auto};
//! use phototone::Pix;
//!
//! let pix = Pix::from_fn(32, 32, |x, _| if x < 16 { 20 } else { 220 });
//! let smooth = gaussian_blur_auto(&pix, 5).unwrap();
//! assert_eq!(smooth.dimensions(), (32, 32));
//!
//! let edges = canny(&pix, &CannyOptions::default()).unwrap();
//! assert!(edges.count_nonzero() > 0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use phototone_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use phototone_filter as filter;
pub use phototone_io as io;
