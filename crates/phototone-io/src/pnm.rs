//! PGM (portable graymap) format support
//!
//! Reads binary (`P5`) and ASCII (`P2`) graymaps with any `maxval` up to
//! 65535, rescaling samples to `[0, 255]`. Writes binary `P5` with
//! `maxval` 255.

use crate::{IoError, IoResult};
use phototone_core::Pix;
use std::io::{Read, Write};

/// Header fields of a graymap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PgmHeader {
    binary: bool,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Byte cursor over the header, skipping whitespace and `#` comments.
struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl HeaderCursor<'_> {
    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.data.len() {
            let c = self.data[self.pos];
            if c == b'#' {
                while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData(format!("PGM: missing {}", what)));
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PGM: {} out of range", what)))
    }
}

fn parse_header(cursor: &mut HeaderCursor<'_>) -> IoResult<PgmHeader> {
    let binary = match cursor.data.get(..2) {
        Some(b"P5") => true,
        Some(b"P2") => false,
        _ => {
            return Err(IoError::UnsupportedFormat(
                "only P2 and P5 graymaps are supported".to_string(),
            ));
        }
    };
    cursor.pos = 2;

    let width = cursor.next_u32("width")?;
    let height = cursor.next_u32("height")?;
    let maxval = cursor.next_u32("maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!(
            "PGM: maxval {} not in [1, 65535]",
            maxval
        )));
    }

    // Exactly one whitespace byte separates the header from binary samples
    if binary {
        match cursor.data.get(cursor.pos) {
            Some(c) if c.is_ascii_whitespace() => cursor.pos += 1,
            _ => {
                return Err(IoError::InvalidData(
                    "PGM: missing separator after header".to_string(),
                ));
            }
        }
    }

    Ok(PgmHeader {
        binary,
        width,
        height,
        maxval,
    })
}

#[inline]
fn rescale(sample: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        sample.min(255) as u8
    } else {
        ((sample.min(maxval) as f64 * 255.0 / maxval as f64).round()) as u8
    }
}

/// Read a PGM image (`P2`/`P5`) from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut cursor = HeaderCursor {
        data: &bytes,
        pos: 0,
    };
    let header = parse_header(&mut cursor)?;
    let count = (header.width as usize)
        .checked_mul(header.height as usize)
        .ok_or_else(|| IoError::InvalidData("PGM: image too large".to_string()))?;

    let samples = if header.binary {
        let body = &bytes[cursor.pos..];
        let wide = header.maxval > 255;
        let needed = if wide { count.checked_mul(2) } else { Some(count) };
        let needed = match needed {
            Some(n) if n <= body.len() => n,
            _ => {
                return Err(IoError::InvalidData(format!(
                    "PGM: {}x{} image needs more than the {} bytes of samples present",
                    header.width,
                    header.height,
                    body.len()
                )));
            }
        };
        if wide {
            body[..needed]
                .chunks_exact(2)
                .map(|pair| rescale((u32::from(pair[0]) << 8) | u32::from(pair[1]), header.maxval))
                .collect()
        } else {
            body[..needed]
                .iter()
                .map(|&v| rescale(v as u32, header.maxval))
                .collect()
        }
    } else {
        // Every ASCII sample takes at least one byte
        let mut samples = Vec::with_capacity(count.min(bytes.len().saturating_sub(cursor.pos)));
        for _ in 0..count {
            let v = cursor.next_u32("sample")?;
            samples.push(rescale(v, header.maxval));
        }
        samples
    };

    Ok(Pix::from_data(header.width, header.height, samples)?)
}

/// Write a `Pix` as binary PGM (`P5`, maxval 255).
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    if pix.is_empty() {
        return Err(IoError::EncodeError(
            "cannot encode a zero-area image as PGM".to_string(),
        ));
    }
    write!(writer, "P5\n{} {}\n255\n", pix.width(), pix.height())?;
    writer.write_all(pix.data())?;
    writer.flush()?;
    Ok(())
}
