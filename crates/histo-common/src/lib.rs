//! Common types and utilities shared across all histogram-art crates.

pub mod cancel;
pub mod color;
pub mod config;
pub mod error;
pub mod pixel;

pub use cancel::CancelToken;
pub use color::{Rgb, Rgba};
pub use config::{BackgroundMode, OutputFormat, RenderConfig};
pub use error::{HistoError, HistoResult};
pub use pixel::PixelBuffer;
