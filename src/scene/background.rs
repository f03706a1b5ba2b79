//! Background fills and grain.

use rand::Rng;
use tracing::debug;

use super::config::{BackgroundConfig, BackgroundStyle};
use crate::canvas::Canvas;
use crate::color::{lerp, Color, Palette};
use crate::noise::{sample_grid, FractalNoise, FractalNoiseConfig};

/// Row position in `[0, 1]`; a single-row canvas sits at the top.
fn row_t(y: u32, height: u32) -> f32 {
    if height <= 1 {
        0.0
    } else {
        y as f32 / (height - 1) as f32
    }
}

/// Color at `t` along a multi-stop ramp through every palette color.
pub fn ramp_color(palette: &Palette, t: f32) -> Color {
    let segments = palette.len() - 1;
    if segments == 0 {
        return palette.first();
    }
    let pos = t.clamp(0.0, 1.0) * segments as f32;
    let i = (pos.floor() as usize).min(segments - 1);
    lerp(palette.color(i), palette.color(i + 1), pos - i as f32)
}

/// Paints the whole canvas with a vertical gradient.
pub fn paint_gradient(canvas: &mut Canvas, top: Color, bottom: Color) {
    let height = canvas.height();
    for y in 0..height {
        canvas.fill_row(y, lerp(top, bottom, row_t(y, height)));
    }
}

/// Paints the whole canvas with a vertical ramp through `palette`.
pub fn paint_palette_ramp(canvas: &mut Canvas, palette: &Palette) {
    let height = canvas.height();
    for y in 0..height {
        canvas.fill_row(y, ramp_color(palette, row_t(y, height)));
    }
}

/// Paints `bands` equal-height horizontal stripes cycling through `palette`.
pub fn paint_stripes(canvas: &mut Canvas, palette: &Palette, bands: u32) {
    let bands = bands.max(1);
    let height = canvas.height();
    for y in 0..height {
        let band = (y as u64 * bands as u64 / height.max(1) as u64) as usize;
        canvas.fill_row(y, palette.color(band % palette.len()));
    }
}

/// Adds up to `amount` brightness per channel following a noise field.
pub fn apply_grain<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R, amount: u8, octaves: u8) {
    if amount == 0 {
        return;
    }
    let (width, height) = (canvas.width(), canvas.height());
    let noise = FractalNoise::new(FractalNoiseConfig {
        octaves,
        ..FractalNoiseConfig::with_seed(rng.random())
    });
    let grid = sample_grid(&noise, width, height, 1.0);

    for (idx, n) in grid.iter().enumerate() {
        let (x, y) = ((idx as u32 % width) as i32, (idx as u32 / width) as i32);
        let bright = ((n + 1.0) * 0.5 * amount as f32) as u8;
        if let Some(current) = canvas.get(x, y) {
            let grained = image::Rgb(current.0.map(|c| c.saturating_add(bright)));
            canvas.put(x, y, grained);
        }
    }
}

/// Fills the canvas according to `config`.
pub fn paint_background<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R, config: &BackgroundConfig) {
    match &config.style {
        BackgroundStyle::Gradient { top, bottom } => {
            let top = top.resolve(rng).first();
            let bottom = bottom.resolve(rng).first();
            debug!(?top, ?bottom, "gradient background");
            paint_gradient(canvas, top, bottom);
        }
        BackgroundStyle::Preset { palette } => {
            debug!(%palette, "preset background");
            paint_palette_ramp(canvas, &palette.palette());
        }
        BackgroundStyle::Stripes { bands, palette } => {
            let palette = palette.resolve(rng);
            debug!(bands, colors = palette.len(), "striped background");
            paint_stripes(canvas, &palette, *bands);
        }
    }

    let grain = config.grain.sample(rng);
    apply_grain(canvas, rng, grain, config.grain_octaves);
}
