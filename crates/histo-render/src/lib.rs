//! Style rendering and compositing for histogram art.
//!
//! Styles map [`HistogramData`] into a backend-agnostic [`RenderPlan`];
//! the [`compositor`] turns a plan into serialized bytes:
//! - PNG via a hand-rolled encoder (indexed when the palette fits)
//! - SVG and PDF sharing the same primitive walk as the raster path
//!
//! [`HistogramData`]: histo_engine::HistogramData
//! [`RenderPlan`]: plan::RenderPlan

pub mod canvas;
pub mod compositor;
pub mod pdf;
pub mod plan;
pub mod png;
pub mod registry;
pub mod styles;
pub mod svg;

pub use compositor::{composite, CompositeOutput};
pub use plan::{BackgroundSpec, BlendMode, Channel, Primitive, RenderPlan, Shape, Texture};
pub use registry::{StyleRegistry, STYLE_NAMES};
pub use styles::Style;
