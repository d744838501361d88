//! Curve interpolation and deterministic noise shared by styles.

use crate::plan::Point;

/// Map normalized bin values to plan points at bin midpoints.
pub fn bin_points(values: &[f32]) -> Vec<Point> {
    let n = values.len().max(1) as f32;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Point::new((i as f32 + 0.5) / n, v.clamp(0.0, 1.0)))
        .collect()
}

/// Resample a polyline through a centripetal Catmull-Rom spline, producing
/// the smooth bezier-like curves of the flowing styles.
///
/// `samples` points are emitted per input segment; endpoints are preserved.
pub fn catmull_rom(points: &[Point], samples: usize) -> Vec<Point> {
    if points.len() < 3 || samples < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len() * samples);
    let n = points.len();
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        for s in 0..samples {
            let t = s as f32 / samples as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let x = 0.5
                * ((2.0 * p1.x)
                    + (-p0.x + p2.x) * t
                    + (2.0 * p0.x - 5.0 * p1.x + 4.0 * p2.x - p3.x) * t2
                    + (-p0.x + 3.0 * p1.x - 3.0 * p2.x + p3.x) * t3);
            let y = 0.5
                * ((2.0 * p1.y)
                    + (-p0.y + p2.y) * t
                    + (2.0 * p0.y - 5.0 * p1.y + 4.0 * p2.y - p3.y) * t2
                    + (-p0.y + 3.0 * p1.y - 3.0 * p2.y + p3.y) * t3);
            out.push(Point::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)));
        }
    }
    out.push(points[n - 1]);
    out
}

/// Small deterministic PRNG (xorshift) for texture jitter and stipple
/// placement. Seeded per use so identical input renders identically.
#[derive(Debug, Clone)]
pub struct Noise {
    state: u64,
}

impl Noise {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1,
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x >> 32) as u32
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in [-1, 1).
    pub fn next_signed(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }
}
