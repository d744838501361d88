//! Canvas layout: golden-ratio sizing and unit-square mapping.

use histo_common::config::derive_height;

use crate::plan::Point;

/// Reference output width; stroke widths in plans are expressed in pixels
/// at this width and scaled proportionally for other sizes.
pub const REFERENCE_WIDTH: f32 = 1200.0;

/// Fraction of each dimension reserved as padding around the plot.
const PADDING_FRACTION: f32 = 0.04;

/// Pixel-space layout for one render.
///
/// Maps plan coordinates (unit square, y up) into the padded drawing area.
/// The vertical flip for raster backends happens here; vector backends with
/// a native bottom-left origin use [`Layout::map_y_up`].
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pad_x: f32,
    pad_y: f32,
}

impl Layout {
    /// Layout for an explicit pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pad_x: width as f32 * PADDING_FRACTION,
            pad_y: height as f32 * PADDING_FRACTION,
        }
    }

    /// Layout with golden-ratio-derived height.
    pub fn golden(width: u32) -> Self {
        Self::new(width, derive_height(width))
    }

    /// Scale factor for stroke widths and dot radii.
    pub fn stroke_scale(&self) -> f32 {
        (self.width as f32 / REFERENCE_WIDTH).max(0.25)
    }

    /// Map a plan point to pixel space with y pointing down (raster, SVG).
    pub fn map(&self, p: Point) -> (f32, f32) {
        let (x, y) = self.map_y_up(p);
        (x, self.height as f32 - y)
    }

    /// Map a plan point to pixel space with y pointing up (PDF).
    pub fn map_y_up(&self, p: Point) -> (f32, f32) {
        let inner_w = self.width as f32 - 2.0 * self.pad_x;
        let inner_h = self.height as f32 - 2.0 * self.pad_y;
        (self.pad_x + p.x * inner_w, self.pad_y + p.y * inner_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_layout_heights() {
        assert_eq!(Layout::golden(1200).height, 742);
        assert_eq!(Layout::golden(1618).height, 1000);
        assert_eq!(Layout::golden(1).height, 1);
    }

    #[test]
    fn test_map_flips_y() {
        let layout = Layout::new(100, 100);
        let (_, y_bottom) = layout.map(Point::new(0.0, 0.0));
        let (_, y_top) = layout.map(Point::new(0.0, 1.0));
        assert!(y_bottom > y_top, "raster y grows downward");

        let (_, up_bottom) = layout.map_y_up(Point::new(0.0, 0.0));
        let (_, up_top) = layout.map_y_up(Point::new(0.0, 1.0));
        assert!(up_top > up_bottom, "pdf y grows upward");
    }

    #[test]
    fn test_map_stays_inside_canvas() {
        let layout = Layout::golden(640);
        for p in [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.5, 0.25),
        ] {
            let (x, y) = layout.map(p);
            assert!(x >= 0.0 && x <= layout.width as f32);
            assert!(y >= 0.0 && y <= layout.height as f32);
        }
    }
}
