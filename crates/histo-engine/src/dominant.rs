//! Dominant-color extraction via color-space bucket quantization.

use std::collections::HashMap;

use histo_common::{HistoError, HistoResult, PixelBuffer, Rgb};

/// Quantization depth: 5 bits per channel, 32 levels.
const BUCKET_SHIFT: u8 = 3;

#[derive(Debug)]
struct Bucket {
    count: u64,
    /// Scan-order index of the first pixel that landed in this bucket.
    /// Used for deterministic tie-breaking.
    first_seen: usize,
    /// The first actual color seen in the bucket; reported instead of the
    /// bucket corner so flat images round-trip their exact color.
    representative: Rgb,
}

/// Extract up to `k` dominant colors, most prevalent first.
///
/// Pixels are grouped into 32x32x32 color buckets and ranked by count;
/// equal counts are broken by first-encountered scan order, so identical
/// input always yields the identical ordered list.
pub fn extract_dominant_colors(pixels: &PixelBuffer, k: usize) -> HistoResult<Vec<Rgb>> {
    if k == 0 {
        return Err(HistoError::InvalidInput(
            "dominant color count must be at least 1".to_string(),
        ));
    }
    if pixels.pixel_count() == 0 {
        return Err(HistoError::InvalidInput(
            "pixel buffer must not be empty".to_string(),
        ));
    }

    let mut buckets: HashMap<u32, Bucket> = HashMap::new();
    for (index, color) in pixels.pixels().enumerate() {
        let key = bucket_key(color);
        buckets
            .entry(key)
            .and_modify(|b| b.count += 1)
            .or_insert(Bucket {
                count: 1,
                first_seen: index,
                representative: color,
            });
    }

    let mut ranked: Vec<Bucket> = buckets.into_values().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen)));
    ranked.truncate(k);

    tracing::debug!(
        buckets = ranked.len(),
        pixels = pixels.pixel_count(),
        "extracted dominant colors"
    );
    Ok(ranked.into_iter().map(|b| b.representative).collect())
}

#[inline]
fn bucket_key(color: Rgb) -> u32 {
    let r = (color.r >> BUCKET_SHIFT) as u32;
    let g = (color.g >> BUCKET_SHIFT) as u32;
    let b = (color.b >> BUCKET_SHIFT) as u32;
    (r << 10) | (g << 5) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_key_groups_nearby_colors() {
        assert_eq!(
            bucket_key(Rgb::new(255, 0, 0)),
            bucket_key(Rgb::new(248, 7, 5))
        );
        assert_ne!(
            bucket_key(Rgb::new(255, 0, 0)),
            bucket_key(Rgb::new(0, 255, 0))
        );
    }
}
