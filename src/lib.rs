//! Procedural pixel-art space scene generator.
//!
//! This crate draws gradient skies, starfields, nebulae and banded,
//! noise-textured planets with shadows, rings, craters and moons onto a
//! low-resolution canvas, then exports it upscaled with nearest-neighbour
//! blocks.

pub mod canvas;
pub mod color;
pub mod export;
pub mod noise;
pub mod pipeline;
pub mod planet;
pub mod scene;
pub mod span;

pub use canvas::Canvas;
pub use color::{Color, Palette, PaletteKind};
pub use noise::{FractalNoise, FractalNoiseConfig, NoiseField};
pub use pipeline::{render_scene, Pipeline, Scene, SceneStage};
pub use planet::{rasterize_disc, Disc, DiscPlacement, DiscStyle};
pub use scene::SceneConfig;
