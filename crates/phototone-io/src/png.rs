//! PNG image format support
//!
//! Decoding expands palettes and low bit depths and strips 16-bit samples to
//! 8 bits; color and alpha channels are then reduced to luma. Encoding always
//! writes 8-bit grayscale.

use crate::{IoError, IoResult, luma};
use phototone_core::Pix;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG bit depth after expansion: {:?}",
            output_info.bit_depth
        )));
    }

    let samples = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG color type after expansion: {:?}",
                other
            )));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    if data.len() < bytes_per_row * height as usize || bytes_per_row < samples * width as usize {
        return Err(IoError::InvalidData("PNG frame is truncated".to_string()));
    }

    // Alpha is dropped; only the color channels contribute to intensity
    let pix = Pix::from_fn(width, height, |x, y| {
        let idx = y as usize * bytes_per_row + x as usize * samples;
        match samples {
            1 | 2 => data[idx],
            _ => luma(data[idx], data[idx + 1], data[idx + 2]),
        }
    });

    Ok(pix)
}

/// Write a PNG image as 8-bit grayscale
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    if pix.is_empty() {
        return Err(IoError::EncodeError(
            "cannot encode a zero-area image as PNG".to_string(),
        ));
    }

    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(pix.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let pix = Pix::from_fn(10, 7, |x, y| ((x + y) * 10) as u8);

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.dimensions(), (10, 7));
        assert_eq!(pix2, pix);
    }

    #[test]
    fn test_png_rgb_reduces_to_luma() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 3, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&[255, 0, 0, 0, 255, 0, 10, 10, 10])
                .unwrap();
        }

        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.data(), &[76, 150, 10]);
    }

    #[test]
    fn test_png_empty_rejected() {
        let mut buffer = Vec::new();
        assert!(matches!(
            write_png(&Pix::new(0, 4), &mut buffer),
            Err(IoError::EncodeError(_))
        ));
    }
}
