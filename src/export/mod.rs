//! Export module for saving rendered scenes.
//!
//! Canvases are upscaled by an integer block factor and written as 8-bit
//! RGB PNG.

mod png;

pub use png::{export_canvas_png, export_named_png, PngExportError, PngExportOptions};
