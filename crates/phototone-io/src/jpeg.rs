//! JPEG image format support
//!
//! Reads 8-bit grayscale and RGB baseline/progressive JPEG with the
//! `jpeg-decoder` crate (RGB is reduced to luma) and writes grayscale JPEG
//! with `jpeg-encoder`.

use crate::{IoError, IoResult, luma};
use phototone_core::Pix;
use std::io::{Read, Write};

/// Default encoder quality, in `[1, 100]`
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Read a JPEG image from a reader.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let samples = match info.pixel_format {
        jpeg_decoder::PixelFormat::L8 => 1,
        jpeg_decoder::PixelFormat::RGB24 => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    if data.len() < width as usize * height as usize * samples {
        return Err(IoError::InvalidData("JPEG frame is truncated".to_string()));
    }

    Ok(Pix::from_fn(width, height, |x, y| {
        let idx = (y as usize * width as usize + x as usize) * samples;
        if samples == 1 {
            data[idx]
        } else {
            luma(data[idx], data[idx + 1], data[idx + 2])
        }
    }))
}

/// Write a `Pix` as a grayscale JPEG.
///
/// `quality` is clamped to `[1, 100]`.
pub fn write_jpeg<W: Write>(pix: &Pix, mut writer: W, quality: u8) -> IoResult<()> {
    if pix.is_empty() {
        return Err(IoError::EncodeError(
            "cannot encode a zero-area image as JPEG".to_string(),
        ));
    }
    let width = u16::try_from(pix.width())
        .map_err(|_| IoError::EncodeError(format!("JPEG width {} too large", pix.width())))?;
    let height = u16::try_from(pix.height())
        .map_err(|_| IoError::EncodeError(format!("JPEG height {} too large", pix.height())))?;

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, quality.clamp(1, 100));
    encoder
        .encode(pix.data(), width, height, jpeg_encoder::ColorType::Luma)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    writer.write_all(&jpeg_buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_roundtrip_is_close() {
        let pix = Pix::from_fn(32, 24, |x, _| (x * 8) as u8);
        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer, 95).unwrap();
        assert!(buffer.starts_with(&[0xFF, 0xD8, 0xFF]));

        let decoded = read_jpeg(buffer.as_slice()).unwrap();
        assert_eq!(decoded.dimensions(), (32, 24));
        let max_diff = pix
            .data()
            .iter()
            .zip(decoded.data())
            .map(|(&a, &b)| (a as i32 - b as i32).abs())
            .max()
            .unwrap_or(0);
        assert!(max_diff <= 12, "max diff {}", max_diff);
    }

    #[test]
    fn test_jpeg_rejects_garbage() {
        assert!(matches!(
            read_jpeg(&b"not a jpeg"[..]),
            Err(IoError::DecodeError(_))
        ));
    }
}
