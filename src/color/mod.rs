//! Colors and palettes.
//!
//! Every pass draws with `image::Rgb<u8>` directly so the canvas can be
//! handed to the PNG encoder without conversion.

mod ops;
mod palette;

pub use ops::{Color, BLACK, WHITE, darken, jitter, lerp, rgb};
pub use palette::{Palette, PaletteError, PaletteKind};
