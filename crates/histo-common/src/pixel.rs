//! Read-only pixel buffer supplied by the caller.

use crate::error::{HistoError, HistoResult};
use crate::Rgb;

/// Decoded RGB image data, 8 bits per sample, row-major.
///
/// Container decoding, color-space conversion, and bit-depth normalization
/// are the caller's responsibility; the pipeline only ever reads from this.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap decoded RGB samples. `data` must hold `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> HistoResult<Self> {
        if width == 0 || height == 0 {
            return Err(HistoError::InvalidInput(
                "pixel buffer must not be empty".to_string(),
            ));
        }
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(HistoError::InvalidInput(format!(
                "pixel buffer length {} does not match {}x{}x3 = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A `width` x `height` buffer filled with a single color, for tests
    /// and calibration renders.
    pub fn solid(width: u32, height: u32, color: Rgb) -> HistoResult<Self> {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved RGB samples.
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Iterate pixels in scan order (left to right, top to bottom).
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(3)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_mismatched() {
        assert!(PixelBuffer::new(0, 4, vec![]).is_err());
        assert!(PixelBuffer::new(4, 0, vec![]).is_err());
        assert!(PixelBuffer::new(2, 2, vec![0; 11]).is_err());
        assert!(PixelBuffer::new(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn test_scan_order() {
        let buf = PixelBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let pixels: Vec<Rgb> = buf.pixels().collect();
        assert_eq!(pixels, vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
    }
}
