//! Moons scattered around a planet.

use rand::Rng;
use tracing::debug;

use super::config::{to_color, DiscStyle, MoonConfig, ShadowSide};
use super::disc::{rasterize_disc, Disc};
use super::placement::DiscPlacement;
use super::ring::rim_light;
use super::shadow::apply_half_shadow;
use crate::canvas::{polar_point, Canvas};
use crate::color::{lerp, Palette, BLACK};
use crate::noise::{FractalNoise, FractalNoiseConfig};

/// Draws the moons of `parent` and returns where they landed.
///
/// Every moon gets its own small palette derived from `base_palette` and
/// its own noise field. Moons may overlap each other or other planets.
pub fn place_moons<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rng: &mut R,
    parent: &DiscPlacement,
    base_palette: &Palette,
    config: &MoonConfig,
    style: &DiscStyle,
) -> Vec<DiscPlacement> {
    let count = config.count.sample(rng);
    let mut moons = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let radius = config.radius.sample(rng);
        let degrees = config.angle.sample(rng);
        let gap = config.gap.sample(rng);
        let distance = (parent.radius + radius + gap) as f32;
        let (cx, cy) = polar_point(parent.center(), distance, degrees);
        let placement = DiscPlacement::new(cx, cy, radius);

        let bands = config.bands.sample(rng) as usize;
        let palette = base_palette.derive(rng, bands, config.jitter);
        let octaves = config.octaves.sample(rng);
        let noise = FractalNoise::new(FractalNoiseConfig::moon_surface(octaves, rng.random()));
        let disc = Disc::new(placement, &palette, &noise).with_noise_scale(config.noise_scale);
        let written = rasterize_disc(canvas, &disc, style, rng);

        if let Some(alpha) = config.shadow_alpha {
            apply_half_shadow(canvas, &placement, ShadowSide::East, BLACK, alpha.sample(rng));
        }
        if let Some(rim) = &config.rim {
            let color = lerp(palette.last(), to_color(rim.color), rim.tint);
            rim_light(canvas, &placement, color, rim.thickness);
        }

        debug!(cx, cy, radius, written, "placed moon");
        moons.push(placement);
    }
    moons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb;
    use crate::span::Span;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn base() -> Palette {
        Palette::new(vec![rgb(90, 60, 40), rgb(140, 110, 80), rgb(200, 170, 140)]).unwrap()
    }

    #[test]
    fn test_moons_orbit_at_expected_distance() {
        let mut canvas = Canvas::new(200, 200);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let parent = DiscPlacement::new(100, 100, 20);
        let config = MoonConfig {
            count: Span::fixed(4),
            ..MoonConfig::default()
        };
        let moons = place_moons(&mut canvas, &mut rng, &parent, &base(), &config, &DiscStyle::default());
        assert_eq!(moons.len(), 4);
        for moon in &moons {
            assert!(config.radius.contains(moon.radius));
            let d = moon.distance_to(&parent);
            let min = (parent.radius + moon.radius + config.gap.min) as f32 - 1.0;
            let max = (parent.radius + moon.radius + config.gap.max) as f32 + 1.0;
            assert!(d >= min && d <= max, "moon at distance {}", d);
        }
    }

    #[test]
    fn test_angle_span_limits_direction() {
        let mut canvas = Canvas::new(200, 200);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let parent = DiscPlacement::new(100, 100, 20);
        let config = MoonConfig {
            count: Span::fixed(6),
            angle: Span::new(-30.0, 30.0),
            ..MoonConfig::default()
        };
        let moons = place_moons(&mut canvas, &mut rng, &parent, &base(), &config, &DiscStyle::default());
        assert!(moons.iter().all(|m| m.cx > parent.cx));
    }

    #[test]
    fn test_same_seed_same_moons() {
        let parent = DiscPlacement::new(60, 60, 15);
        let run = |seed| {
            let mut canvas = Canvas::new(120, 120);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let moons = place_moons(
                &mut canvas,
                &mut rng,
                &parent,
                &base(),
                &MoonConfig::default(),
                &DiscStyle::default(),
            );
            (moons, canvas)
        };
        assert_eq!(run(21), run(21));
    }
}
