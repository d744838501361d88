//! Tests for dominant-color extraction: determinism, ranking, tie-breaking.

use histo_common::{PixelBuffer, Rgb};
use histo_engine::extract_dominant_colors;

fn buffer_from_colors(colors: &[Rgb]) -> PixelBuffer {
    let mut data = Vec::with_capacity(colors.len() * 3);
    for c in colors {
        data.extend_from_slice(&[c.r, c.g, c.b]);
    }
    PixelBuffer::new(colors.len() as u32, 1, data).unwrap()
}

#[test]
fn test_solid_red_single_color() {
    let buf = PixelBuffer::solid(20, 20, Rgb::new(255, 0, 0)).unwrap();
    let colors = extract_dominant_colors(&buf, 5).unwrap();
    assert_eq!(colors, vec![Rgb::new(255, 0, 0)]);
}

#[test]
fn test_ranked_by_frequency() {
    let mut pixels = Vec::new();
    pixels.extend(std::iter::repeat(Rgb::new(0, 0, 255)).take(50));
    pixels.extend(std::iter::repeat(Rgb::new(0, 255, 0)).take(30));
    pixels.extend(std::iter::repeat(Rgb::new(255, 0, 0)).take(20));
    let buf = buffer_from_colors(&pixels);

    let colors = extract_dominant_colors(&buf, 5).unwrap();
    assert_eq!(
        colors,
        vec![
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 0),
            Rgb::new(255, 0, 0)
        ]
    );
}

#[test]
fn test_tie_broken_by_scan_order() {
    // Two colors with equal counts; the one seen first must rank first.
    let mut pixels = Vec::new();
    pixels.extend(std::iter::repeat(Rgb::new(10, 200, 10)).take(25));
    pixels.extend(std::iter::repeat(Rgb::new(200, 10, 10)).take(25));
    let buf = buffer_from_colors(&pixels);

    let colors = extract_dominant_colors(&buf, 2).unwrap();
    assert_eq!(colors[0], Rgb::new(10, 200, 10));
    assert_eq!(colors[1], Rgb::new(200, 10, 10));
}

#[test]
fn test_deterministic_across_calls() {
    let mut pixels = Vec::new();
    for i in 0u32..400 {
        let v = (i * 37 % 256) as u8;
        pixels.push(Rgb::new(v, v.wrapping_mul(3), 255 - v));
    }
    let buf = buffer_from_colors(&pixels);

    let first = extract_dominant_colors(&buf, 5).unwrap();
    for _ in 0..5 {
        assert_eq!(extract_dominant_colors(&buf, 5).unwrap(), first);
    }
}

#[test]
fn test_at_most_k_colors() {
    let mut pixels = Vec::new();
    for i in 0u8..=255 {
        pixels.push(Rgb::new(i, 255 - i, i.wrapping_mul(7)));
    }
    let buf = buffer_from_colors(&pixels);

    let colors = extract_dominant_colors(&buf, 5).unwrap();
    assert!(colors.len() <= 5);
    assert!(!colors.is_empty());
}

#[test]
fn test_zero_k_rejected() {
    let buf = PixelBuffer::solid(2, 2, Rgb::new(1, 2, 3)).unwrap();
    assert!(extract_dominant_colors(&buf, 0).is_err());
}
