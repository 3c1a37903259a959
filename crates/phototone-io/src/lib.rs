//! phototone-io - Grayscale image I/O
//!
//! Moves [`Pix`] buffers to and from files or memory. Every decoded image is
//! reduced to 8-bit grayscale; color sources are converted with the Rec. 601
//! luma weights.
//!
//! Supported formats (each behind a cargo feature, all on by default):
//!
//! | Format | Read | Write | Feature      |
//! |--------|------|-------|--------------|
//! | PNG    | yes  | yes   | `png-format` |
//! | PGM    | P2/P5| P5    | `pnm`        |
//! | JPEG   | yes  | yes   | `jpeg`       |

mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use phototone_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

/// Rec. 601 luma of an RGB triple, rounded to nearest.
#[allow(dead_code)]
pub(crate) fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Read an image from a file, detecting the format from its magic bytes.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
    let pix = read_image_mem(&bytes)?;
    log::debug!(
        "read {} ({}x{})",
        path.display(),
        pix.width(),
        pix.height()
    );
    Ok(pix)
}

/// Decode an image held in memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(data),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Encode an image to a file in the given format.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let bytes = write_image_mem(pix, format)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    log::debug!(
        "wrote {} as {:?} ({}x{}, {} bytes)",
        path.display(),
        format,
        pix.width(),
        pix.height(),
        bytes.len()
    );
    Ok(())
}

/// Encode an image into memory in the given format.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, &mut buffer)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, &mut buffer)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, &mut buffer, jpeg::DEFAULT_JPEG_QUALITY)?,
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} support is not enabled",
                other
            )));
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn test_mem_roundtrip_lossless_formats() {
        let pix = Pix::from_fn(9, 4, |x, y| (x * 28 + y) as u8);
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let bytes = write_image_mem(&pix, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            assert_eq!(read_image_mem(&bytes).unwrap(), pix);
        }
    }
}
