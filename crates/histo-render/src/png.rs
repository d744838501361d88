//! PNG encoding for straight (non-premultiplied) RGBA pixel data.
//!
//! Two encoding modes:
//! - **Indexed (color type 3)** when the image has at most 256 unique
//!   colors, with a tRNS chunk when any entry is translucent. Typical for
//!   flat styles; smaller files.
//! - **RGBA (color type 6)** fallback for everything else.
//!
//! `encode` picks the mode automatically.

use std::collections::HashMap;
use std::io::Write;

use histo_common::{HistoError, HistoResult};

const MAX_PALETTE_SIZE: usize = 256;

/// Encode RGBA pixels (4 bytes each) into a PNG byte stream.
pub fn encode(pixels: &[u8], width: u32, height: u32) -> HistoResult<Vec<u8>> {
    debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);

    match extract_palette(pixels) {
        Some((palette, indices)) => encode_indexed(width, height, &palette, &indices),
        None => encode_rgba(pixels, width, height),
    }
}

/// Pack RGBA bytes into a u32 key for palette hashing.
#[inline(always)]
fn pack_color(p: &[u8]) -> u32 {
    (p[0] as u32) | ((p[1] as u32) << 8) | ((p[2] as u32) << 16) | ((p[3] as u32) << 24)
}

/// Build a palette and index map, or None when over 256 unique colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk);
        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push([chunk[0], chunk[1], chunk[2], chunk[3]]);
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }
    Some((palette, indices))
}

fn encode_indexed(
    width: u32,
    height: u32,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> HistoResult<Vec<u8>> {
    let mut png = png_signature();

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let mut plte = Vec::with_capacity(palette.len() * 3);
    for [r, g, b, _] in palette {
        plte.extend_from_slice(&[*r, *g, *b]);
    }
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|[_, _, _, a]| *a < 255) {
        let trns: Vec<u8> = palette.iter().map(|[_, _, _, a]| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width as usize, height as usize, 1)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn encode_rgba(pixels: &[u8], width: u32, height: u32) -> HistoResult<Vec<u8>> {
    let mut png = png_signature();
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));
    let idat = deflate_scanlines(pixels, width as usize, height as usize, 4)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn png_signature() -> Vec<u8> {
    vec![137, 80, 78, 71, 13, 10, 26, 10]
}

fn ihdr(width: u32, height: u32, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Prefix each scanline with filter type 0 and zlib-compress.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> HistoResult<Vec<u8>> {
    let row = width * bytes_per_pixel;
    let mut uncompressed = Vec::with_capacity(height * (1 + row));
    for y in 0..height {
        uncompressed.push(0); // filter: none
        uncompressed.extend_from_slice(&data[y * row..(y + 1) * row]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&uncompressed)
        .map_err(|e| HistoError::RenderError(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| HistoError::RenderError(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);
    let crc_data = [chunk_type.as_slice(), data].concat();
    png.extend_from_slice(&crc32fast::hash(&crc_data).to_be_bytes());
}
