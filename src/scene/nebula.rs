//! Nebula clouds: a thresholded noise blend, speckle clouds and soft blobs.

use rand::Rng;
use tracing::debug;

use super::config::{BlobConfig, NebulaConfig, SpeckleCloudConfig};
use crate::canvas::{disc_offsets, Canvas};
use crate::color::Palette;
use crate::noise::{sample_grid, FractalNoise, FractalNoiseConfig};
use crate::planet::to_color;

/// Blends the palette over every pixel whose normalized noise exceeds
/// `config.threshold`. Returns the pixels tinted.
///
/// The noise grid is sampled in parallel up front; blending and sparkles
/// then run in row-major order so the RNG stream stays deterministic.
pub fn paint_noise_cloud<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rng: &mut R,
    palette: &Palette,
    config: &NebulaConfig,
) -> usize {
    let (width, height) = (canvas.width(), canvas.height());
    let octaves = config.octaves.sample(rng);
    let alpha = config.alpha.sample(rng);
    let noise = FractalNoise::new(FractalNoiseConfig::nebula(octaves, rng.random()));
    let grid = sample_grid(&noise, width, height, config.scale);
    let sparkle = to_color(config.sparkle_color);
    let sparkle_p = unit_probability(config.sparkle_probability);

    let mut tinted = 0;
    for (idx, n) in grid.iter().enumerate() {
        let value = (n + 1.0) * 0.5;
        if value <= config.threshold {
            continue;
        }
        let (x, y) = ((idx as u32 % width) as i32, (idx as u32 / width) as i32);
        let band = (value * (palette.len() - 1) as f32) as usize;
        if canvas.blend(x, y, palette.color(band), alpha) {
            tinted += 1;
        }
        if x % 3 == 0 && y % 3 == 0 && rng.random_bool(sparkle_p) {
            canvas.put(x, y, sparkle);
        }
    }
    tinted
}

fn unit_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Sprays clouds of single pixels whose density falls off from the centre.
pub fn paint_speckle_clouds<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rng: &mut R,
    config: &SpeckleCloudConfig,
) -> u32 {
    let (width, height) = (canvas.width(), canvas.height());
    if width == 0 || height == 0 {
        return 0;
    }
    let palette = config.palette.resolve(rng);
    let density = unit_probability(config.density);
    let count = config.count.sample(rng);

    for _ in 0..count {
        let cx = rng.random_range(0..width) as i32;
        let cy = rng.random_range(0..height) as i32;
        let size = config.size.sample(rng);
        if size <= 0 {
            continue;
        }
        let color = palette.choose(rng);
        for (x, y) in disc_offsets(cx, cy, size, width, height) {
            let d = (x as f64).hypot(y as f64) / size as f64;
            if d < 1.0 && rng.random_bool(density * (1.0 - d)) {
                canvas.put(cx + x, cy + y, color);
            }
        }
    }
    count
}

/// Blends translucent filled circles over the canvas.
pub fn paint_blobs<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rng: &mut R,
    palette: &Palette,
    config: &BlobConfig,
) -> u32 {
    let (width, height) = (canvas.width(), canvas.height());
    if width == 0 || height == 0 {
        return 0;
    }
    let count = config.count.sample(rng);
    for _ in 0..count {
        let cx = rng.random_range(0..width) as i32;
        let cy = rng.random_range(0..height) as i32;
        let radius = config.radius.sample(rng);
        let alpha = config.alpha.sample(rng);
        let color = palette.choose(rng);
        for (x, y) in disc_offsets(cx, cy, radius, width, height) {
            canvas.blend(cx + x, cy + y, color, alpha);
        }
    }
    count
}

/// Runs every enabled nebula pass.
pub fn paint_nebula<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R, config: &NebulaConfig) {
    let palette = config.palette.resolve(rng);
    let tinted = paint_noise_cloud(canvas, rng, &palette, config);
    let clouds = match &config.clouds {
        Some(clouds) => paint_speckle_clouds(canvas, rng, clouds),
        None => 0,
    };
    let blobs = match &config.blobs {
        Some(blobs) => paint_blobs(canvas, rng, &palette, blobs),
        None => 0,
    };
    debug!(tinted, clouds, blobs, "painted nebula");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{rgb, BLACK};
    use crate::scene::config::{PaletteSource, SceneConfig};
    use crate::span::Span;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn cloud(threshold: f32) -> NebulaConfig {
        NebulaConfig {
            octaves: Span::fixed(3),
            scale: 1.0,
            palette: PaletteSource::Range {
                bands: Span::fixed(4),
                low: 100,
                high: 200,
            },
            threshold,
            alpha: Span::fixed(0.5),
            sparkle_probability: 0.0,
            sparkle_color: [220, 130, 255],
            clouds: None,
            blobs: None,
        }
    }

    #[test]
    fn test_threshold_above_one_leaves_canvas_alone() {
        let mut canvas = Canvas::new(24, 16);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let palette = Palette::new(vec![rgb(200, 0, 200)]).unwrap();
        assert_eq!(paint_noise_cloud(&mut canvas, &mut rng, &palette, &cloud(1.0)), 0);
        assert_eq!(canvas, Canvas::new(24, 16));
    }

    #[test]
    fn test_negative_threshold_tints_everything() {
        let mut canvas = Canvas::new(24, 16);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let palette = Palette::new(vec![rgb(200, 0, 200)]).unwrap();
        assert_eq!(paint_noise_cloud(&mut canvas, &mut rng, &palette, &cloud(-0.1)), 24 * 16);
        assert!(canvas.image().pixels().all(|&p| p == rgb(100, 0, 100)));
    }

    #[test]
    fn test_wallpaper_nebula_tints_the_sky() {
        let config = SceneConfig::wallpaper();
        let nebula = config.nebula.as_ref().unwrap();
        let palette = Palette::new(vec![rgb(200, 0, 200)]).unwrap();
        let mut tinted = 0;
        for seed in 0..10 {
            let mut canvas = Canvas::new(config.width, config.height);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            tinted += paint_noise_cloud(&mut canvas, &mut rng, &palette, nebula);
        }
        assert!(tinted > 0);
        assert!(tinted < 10 * (config.width * config.height) as usize);
    }

    #[test]
    fn test_speckle_clouds_are_deterministic() {
        let config = SpeckleCloudConfig {
            count: Span::fixed(3),
            size: Span::new(4, 9),
            density: 0.77,
            palette: PaletteSource::Random {
                bands: Span::fixed(3),
                vibrance: 0.65,
            },
        };
        let render = |seed| {
            let mut canvas = Canvas::new(40, 30);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            paint_speckle_clouds(&mut canvas, &mut rng, &config);
            canvas
        };
        let a = render(9);
        assert_eq!(a, render(9));
        assert!(a.image().pixels().any(|&p| p != BLACK));
    }

    #[test]
    fn test_blobs_blend() {
        let mut canvas = Canvas::new(20, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let palette = Palette::new(vec![rgb(200, 200, 200)]).unwrap();
        let config = BlobConfig {
            count: Span::fixed(1),
            radius: Span::fixed(50),
            alpha: Span::fixed(0.5),
        };
        assert_eq!(paint_blobs(&mut canvas, &mut rng, &palette, &config), 1);
        assert!(canvas.image().pixels().all(|&p| p == rgb(100, 100, 100)));
    }
}
