//! Banded disc rasterization.
//!
//! A disc is shaded by blending its normalized radius with a noise sample,
//! quantizing the blend into palette bands and then applying optional
//! surface effects (terminator, crater and spot speckle, flecks).

use rand::Rng;

use super::config::{to_color, DiscStyle, SurfaceEffects};
use super::placement::DiscPlacement;
use crate::canvas::{disc_offsets, Canvas};
use crate::color::{lerp, Color, Palette, WHITE};
use crate::noise::NoiseField;

/// A disc ready for rasterization.
pub struct Disc<'a> {
    pub placement: DiscPlacement,
    pub palette: &'a Palette,
    /// Number of bands to quantize into; clamped to the palette length.
    pub bands: usize,
    pub noise: &'a dyn NoiseField,
    /// Multiplier applied to normalized canvas coordinates before sampling.
    pub noise_scale: f32,
}

impl<'a> Disc<'a> {
    /// A disc using every palette color as a band and unscaled noise.
    pub fn new(placement: DiscPlacement, palette: &'a Palette, noise: &'a dyn NoiseField) -> Self {
        Self {
            placement,
            palette,
            bands: palette.len(),
            noise,
            noise_scale: 1.0,
        }
    }

    pub fn with_bands(mut self, bands: usize) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_noise_scale(mut self, scale: f32) -> Self {
        self.noise_scale = scale;
        self
    }
}

/// Maps a blend value to a band index in `[0, bands - 1]`.
///
/// Values outside `[0, 1]` are clamped; NaN maps to band 0.
pub fn band_index(value: f32, bands: usize) -> usize {
    if bands <= 1 || value.is_nan() {
        return 0;
    }
    let scaled = (value.clamp(0.0, 1.0) * (bands - 1) as f32).floor();
    (scaled as usize).min(bands - 1)
}

impl SurfaceEffects {
    /// Applies the enabled overrides to a shaded pixel.
    ///
    /// The RNG is only consulted when flecks are enabled.
    pub fn apply<R: Rng + ?Sized>(&self, color: Color, radial: f32, noise: f32, rng: &mut R) -> Color {
        let mut color = color;
        if let Some(t) = &self.terminator {
            if (radial - 1.0).abs() < t.epsilon {
                color = lerp(color, WHITE, t.mix);
            }
        }
        if let Some(c) = &self.craters {
            if noise < c.threshold && radial < c.radial_cutoff {
                color = to_color(c.color);
            }
        }
        if let Some(s) = &self.spots {
            if noise > s.threshold && radial < s.radial_cutoff {
                color = to_color(s.color);
            }
        }
        if let Some(f) = &self.flecks {
            let p = if f.probability.is_nan() { 0.0 } else { f.probability.clamp(0.0, 1.0) };
            if rng.random_bool(p) && (radial - f.center).abs() < f.half_width {
                color = to_color(f.color);
            }
        }
        color
    }
}

/// Shades every canvas pixel covered by `disc`.
///
/// Pixels outside the canvas are skipped. Returns the number of pixels
/// written; a disc with a non-positive radius writes nothing.
pub fn rasterize_disc<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    disc: &Disc<'_>,
    style: &DiscStyle,
    rng: &mut R,
) -> usize {
    let DiscPlacement { cx, cy, radius } = disc.placement;
    if radius <= 0 || disc.palette.is_empty() {
        return 0;
    }

    let (width, height) = (canvas.width(), canvas.height());
    let bands = disc.bands.clamp(1, disc.palette.len());
    let r = radius as f32;
    let mut written = 0;

    for (x, y) in disc_offsets(cx, cy, radius, width, height) {
        let (px, py) = (cx + x, cy + y);
        let radial = (x as f32).hypot(y as f32) / r;
        let n = disc.noise.sample(
            px as f32 / width as f32 * disc.noise_scale,
            py as f32 / height as f32 * disc.noise_scale,
        );
        let value = style.weights.blend(radial, n);
        let color = disc.palette.color(band_index(value, bands));
        let color = style.effects.apply(color, radial, n, rng);
        if canvas.put(px, py, color) {
            written += 1;
        }
    }

    written
}
