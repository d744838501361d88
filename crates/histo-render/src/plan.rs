//! Backend-agnostic drawing plan produced by styles.
//!
//! Coordinates live in the unit square with the origin at the bottom left
//! and y pointing up; the compositor maps them onto the padded canvas for
//! whichever backend serializes the plan. Primitive order is semantically
//! significant: later primitives composite over earlier ones.

use histo_common::Rgba;

/// Source channel a primitive visualizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Rule for combining a primitive with what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Plain alpha compositing.
    SourceOver,
    /// Additive; overlapping channels sum toward white.
    Additive,
}

/// A point in plan space (unit square, y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Drawable geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Open polyline stroked at `width` (reference pixels at 1200px output).
    Curve {
        points: Vec<Point>,
        width: f32,
        dashed: bool,
    },
    /// Closed filled polygon.
    Area { points: Vec<Point> },
    /// Axis-aligned bar rising from the baseline.
    Bar { x: f32, width: f32, height: f32 },
    /// Field of filled dots.
    Stipple { dots: Vec<Point>, radius: f32 },
    /// Full-span grid line at a normalized position.
    GridLine {
        horizontal: bool,
        position: f32,
        dashed: bool,
    },
}

impl Shape {
    /// Stable name used in render error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Curve { .. } => "curve",
            Shape::Area { .. } => "area",
            Shape::Bar { .. } => "bar",
            Shape::Stipple { .. } => "stipple",
            Shape::GridLine { .. } => "grid",
        }
    }
}

/// One drawable primitive with its compositing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    /// Channel tag; decorations (grid, frames) carry none.
    pub channel: Option<Channel>,
    pub color: Rgba,
    /// Multiplied into the color's alpha at draw time.
    pub opacity: f32,
    pub blend: BlendMode,
}

impl Primitive {
    pub fn new(shape: Shape, color: Rgba) -> Self {
        Self {
            shape,
            channel: None,
            color,
            opacity: 1.0,
            blend: BlendMode::SourceOver,
        }
    }

    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Effective alpha byte after applying the opacity multiplier.
    pub fn effective_alpha(&self) -> u8 {
        (self.color.a as f32 * self.opacity).round().clamp(0.0, 255.0) as u8
    }
}

/// Optional texture pass applied over the background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Texture {
    /// Subtle fiber noise for light backgrounds.
    Paper,
    /// Heavier luminance noise for dark or film looks.
    Grain,
}

/// Resolved background for one render: fill color (None = transparent),
/// optional texture, optional vignette pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundSpec {
    pub fill: Option<Rgba>,
    pub texture: Option<Texture>,
    pub vignette: bool,
}

impl BackgroundSpec {
    pub fn plain(fill: Rgba) -> Self {
        Self {
            fill: Some(fill),
            texture: None,
            vignette: false,
        }
    }

    pub fn transparent() -> Self {
        Self {
            fill: None,
            texture: None,
            vignette: false,
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_vignette(mut self) -> Self {
        self.vignette = true;
        self
    }
}

/// Ordered drawing description for one (HistogramData, RenderConfig) pair.
/// Consumed by the compositor and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub background: BackgroundSpec,
    pub primitives: Vec<Primitive>,
}

impl RenderPlan {
    pub fn new(background: BackgroundSpec) -> Self {
        Self {
            background,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }

    /// Number of grid primitives, used by tests and logging.
    pub fn grid_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p.shape, Shape::GridLine { .. }))
            .count()
    }
}
