//! Per-channel intensity histogram: tally, smoothing, renormalization.

use histo_common::config::{MAX_BINS, MIN_BINS};
use histo_common::{HistoError, HistoResult, PixelBuffer};
use rayon::prelude::*;

use crate::CHANNELS;

/// Minimum pixels before the tally is worth parallelizing.
const PARALLEL_THRESHOLD: usize = 65_536;

/// Pixels per rayon work unit.
const CHUNK_PIXELS: usize = 16_384;

/// Count raw per-channel intensities into `bins` buckets.
///
/// Buckets span the full 0..=255 intensity range, so the per-channel sum of
/// counts always equals the pixel count.
pub fn tally_channels(pixels: &PixelBuffer, bins: usize) -> HistoResult<[Vec<u64>; CHANNELS]> {
    validate_bins(bins)?;

    let samples = pixels.samples();
    let counts = if pixels.pixel_count() >= PARALLEL_THRESHOLD {
        samples
            .par_chunks(CHUNK_PIXELS * 3)
            .fold(
                || empty_counts(bins),
                |mut acc, chunk| {
                    tally_into(&mut acc, chunk, bins);
                    acc
                },
            )
            .reduce(|| empty_counts(bins), merge_counts)
    } else {
        let mut acc = empty_counts(bins);
        tally_into(&mut acc, samples, bins);
        acc
    };

    tracing::debug!(
        bins,
        pixels = pixels.pixel_count(),
        "tallied channel histograms"
    );
    Ok(counts)
}

/// Compute normalized per-channel histograms.
///
/// Pipeline: raw tally, Gaussian smoothing with spread scaling monotonically
/// in `smoothing`, then renormalization of each channel by its own
/// post-smoothing maximum so the tallest bar reaches exactly 1.0.
pub fn compute_histogram(
    pixels: &PixelBuffer,
    bins: usize,
    smoothing: f32,
) -> HistoResult<[Vec<f32>; CHANNELS]> {
    if !(0.0..=1.0).contains(&smoothing) {
        return Err(HistoError::InvalidInput(format!(
            "smoothing {} out of range 0..=1",
            smoothing
        )));
    }

    let raw = tally_channels(pixels, bins)?;
    let sigma = smoothing_sigma(smoothing, bins);

    let mut channels: [Vec<f32>; CHANNELS] = raw.map(|counts| {
        let curve: Vec<f32> = counts.iter().map(|&c| c as f32).collect();
        gaussian_smooth(&curve, sigma)
    });

    for channel in channels.iter_mut() {
        normalize_to_unit_max(channel);
    }

    Ok(channels)
}

/// Kernel spread for a smoothing factor.
///
/// Linear in the factor and in the bin count: `sigma = s * 10 * (bins/256)`,
/// matching a 0..=10 sigma sweep at the default 256 bins. Monotonic and
/// continuous, zero disables smoothing entirely.
pub fn smoothing_sigma(smoothing: f32, bins: usize) -> f32 {
    smoothing * 10.0 * (bins as f32 / 256.0)
}

fn validate_bins(bins: usize) -> HistoResult<()> {
    if !(MIN_BINS..=MAX_BINS).contains(&bins) {
        return Err(HistoError::InvalidInput(format!(
            "bins {} out of range {}..={}",
            bins, MIN_BINS, MAX_BINS
        )));
    }
    Ok(())
}

fn empty_counts(bins: usize) -> [Vec<u64>; CHANNELS] {
    [vec![0u64; bins], vec![0u64; bins], vec![0u64; bins]]
}

#[inline]
fn bin_index(value: u8, bins: usize) -> usize {
    value as usize * bins / 256
}

fn tally_into(acc: &mut [Vec<u64>; CHANNELS], samples: &[u8], bins: usize) {
    for pixel in samples.chunks_exact(3) {
        acc[0][bin_index(pixel[0], bins)] += 1;
        acc[1][bin_index(pixel[1], bins)] += 1;
        acc[2][bin_index(pixel[2], bins)] += 1;
    }
}

fn merge_counts(
    mut a: [Vec<u64>; CHANNELS],
    b: [Vec<u64>; CHANNELS],
) -> [Vec<u64>; CHANNELS] {
    for (dst, src) in a.iter_mut().zip(b.iter()) {
        for (d, s) in dst.iter_mut().zip(src.iter()) {
            *d += s;
        }
    }
    a
}

/// Convolve with a truncated Gaussian kernel, renormalizing at the edges so
/// mass clipped by the boundary does not darken the outermost bins.
fn gaussian_smooth(curve: &[f32], sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return curve.to_vec();
    }

    let radius = (sigma * 3.0).ceil() as usize;
    let radius = radius.min(curve.len().saturating_sub(1)).max(1);

    let mut kernel = Vec::with_capacity(2 * radius + 1);
    let denom = 2.0 * sigma * sigma;
    for offset in -(radius as isize)..=(radius as isize) {
        let d = offset as f32;
        kernel.push((-d * d / denom).exp());
    }

    let mut out = vec![0.0f32; curve.len()];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        let mut weight = 0.0f32;
        for (k, &w) in kernel.iter().enumerate() {
            let j = i as isize + k as isize - radius as isize;
            if j >= 0 && (j as usize) < curve.len() {
                acc += curve[j as usize] * w;
                weight += w;
            }
        }
        *slot = if weight > 0.0 { acc / weight } else { 0.0 };
    }
    out
}

/// Scale so the channel's maximum is exactly 1.0. Smoothing must never
/// flatten the visible range.
fn normalize_to_unit_max(channel: &mut [f32]) {
    let max = channel.iter().cloned().fold(0.0f32, f32::max);
    if max > 0.0 {
        for v in channel.iter_mut() {
            *v /= max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_index_spans_range() {
        assert_eq!(bin_index(0, 256), 0);
        assert_eq!(bin_index(255, 256), 255);
        assert_eq!(bin_index(0, 2), 0);
        assert_eq!(bin_index(127, 2), 0);
        assert_eq!(bin_index(128, 2), 1);
        assert_eq!(bin_index(255, 2), 1);
    }

    #[test]
    fn test_gaussian_smooth_preserves_flat_curve() {
        let flat = vec![1.0f32; 32];
        let smoothed = gaussian_smooth(&flat, 2.0);
        for v in smoothed {
            assert!((v - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sigma_monotonic() {
        let mut prev = -1.0;
        for i in 0..=10 {
            let s = smoothing_sigma(i as f32 / 10.0, 256);
            assert!(s > prev);
            prev = s;
        }
        assert_eq!(smoothing_sigma(0.0, 256), 0.0);
    }
}
