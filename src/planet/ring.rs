//! Rings, rim light and highlight arcs: circle-sweep passes around a disc.

use rand::Rng;
use tracing::debug;

use super::config::{HighlightConfig, RingConfig};
use super::placement::DiscPlacement;
use crate::canvas::{polar_point, Canvas};
use crate::color::{darken, Color};

/// Sweeps a full circle of `radius` around `center`, writing one pixel per
/// angular step. Returns the pixels written.
fn sweep_circle<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rng: &mut R,
    placement: &DiscPlacement,
    radius: f32,
    color: Color,
    config: &RingConfig,
) -> usize {
    let step = if config.angle_step.is_finite() && config.angle_step > 0.0 {
        config.angle_step
    } else {
        1.0
    };
    let steps = (360.0 / step).ceil() as usize;
    let thicken = if config.thicken_probability.is_nan() {
        0.0
    } else {
        config.thicken_probability.clamp(0.0, 1.0)
    };
    let center = placement.center();

    let mut written = 0;
    for i in 0..steps {
        let theta = i as f32 * step;
        let wave = config.wave_amplitude * (config.wave_frequency * theta.to_radians()).sin();
        let (x, y) = polar_point(center, radius + wave, theta);
        if canvas.put(x, y, color) {
            written += 1;
            if rng.random_bool(thicken) && canvas.put(x + 1, y + 1, color) {
                written += 1;
            }
        }
    }
    written
}

/// Draws `config.count` concentric rings outside the disc.
///
/// Each ring sits a freshly drawn `spacing` beyond the previous one, and ring
/// `k` (1-based) is `base` darkened by `fade * (k - 1)` per channel. Returns the number of rings drawn.
pub fn draw_rings<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rng: &mut R,
    placement: &DiscPlacement,
    base: Color,
    config: &RingConfig,
) -> u32 {
    if placement.radius <= 0 {
        return 0;
    }
    let count = config.count.sample(rng);
    let fade = config.fade.sample(rng);
    let mut offset = 0i32;

    for k in 1..=count {
        offset = offset.saturating_add(config.spacing.sample(rng));
        let radius = placement.radius.saturating_add(offset) as f32;
        let amount = (fade as u32).saturating_mul(k - 1).min(255) as u8;
        let written = sweep_circle(canvas, rng, placement, radius, darken(base, amount), config);
        debug!(ring = k, radius, written, "drew ring");
    }
    count
}

/// Outlines the disc with `thickness` one-pixel circles just outside it.
pub fn rim_light(canvas: &mut Canvas, placement: &DiscPlacement, color: Color, thickness: u32) -> usize {
    if placement.radius <= 0 {
        return 0;
    }
    let center = placement.center();
    let mut written = 0;
    for t in 0..thickness {
        let radius = placement.radius as f32 + t as f32;
        for deg in 0..360 {
            let (x, y) = polar_point(center, radius, deg as f32);
            if canvas.put(x, y, color) {
                written += 1;
            }
        }
    }
    written
}

/// Draws a short crescent by repeating an arc of the rim at `radius / t`
/// for every divisor `t`.
pub fn highlight_arc(
    canvas: &mut Canvas,
    placement: &DiscPlacement,
    color: Color,
    config: &HighlightConfig,
) -> usize {
    if placement.radius <= 0 {
        return 0;
    }
    let center = placement.center();
    let (lo, hi) = config.divisors.ordered();
    let (start, end) = (config.start_deg.floor() as i32, config.end_deg.ceil() as i32);

    let mut written = 0;
    for deg in start..end {
        for t in lo.max(1)..=hi.max(1) {
            let (x, y) = polar_point(center, placement.radius as f32 / t as f32, deg as f32);
            if canvas.put(x, y, color) {
                written += 1;
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{rgb, BLACK, WHITE};
    use crate::span::Span;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat_ring(count: u32) -> RingConfig {
        RingConfig {
            count: Span::fixed(count),
            spacing: Span::fixed(4),
            fade: Span::fixed(20),
            thicken_probability: 0.0,
            ..RingConfig::default()
        }
    }

    #[test]
    fn test_rings_fade_outward() {
        let mut canvas = Canvas::new(61, 61);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let disc = DiscPlacement::new(30, 30, 10);
        let drawn = draw_rings(&mut canvas, &mut rng, &disc, rgb(200, 200, 200), &flat_ring(3));
        assert_eq!(drawn, 3);
        assert_eq!(canvas.get(44, 30), Some(rgb(200, 200, 200)));
        assert_eq!(canvas.get(48, 30), Some(rgb(180, 180, 180)));
        assert_eq!(canvas.get(52, 30), Some(rgb(160, 160, 160)));
        // The disc itself is left alone.
        assert_eq!(canvas.get(30, 30), Some(BLACK));
    }

    #[test]
    fn test_zero_rings_draw_nothing() {
        let mut canvas = Canvas::new(31, 31);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let disc = DiscPlacement::new(15, 15, 5);
        assert_eq!(draw_rings(&mut canvas, &mut rng, &disc, WHITE, &flat_ring(0)), 0);
        assert_eq!(canvas, Canvas::new(31, 31));
    }

    #[test]
    fn test_rings_off_canvas_are_skipped() {
        let mut canvas = Canvas::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let disc = DiscPlacement::new(-100, -100, 20);
        draw_rings(&mut canvas, &mut rng, &disc, WHITE, &flat_ring(2));
        assert_eq!(canvas, Canvas::new(10, 10));
    }

    #[test]
    fn test_huge_radius_and_spacing_saturate() {
        let mut canvas = Canvas::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let disc = DiscPlacement::new(5, 5, i32::MAX - 3);
        let config = RingConfig {
            spacing: Span::fixed(i32::MAX),
            fade: Span::fixed(255),
            ..flat_ring(3)
        };
        assert_eq!(draw_rings(&mut canvas, &mut rng, &disc, WHITE, &config), 3);
        assert_eq!(canvas, Canvas::new(10, 10));
    }

    #[test]
    fn test_rim_light_hugs_the_disc() {
        let mut canvas = Canvas::new(31, 31);
        let disc = DiscPlacement::new(15, 15, 8);
        assert!(rim_light(&mut canvas, &disc, WHITE, 2) > 0);
        assert_eq!(canvas.get(23, 15), Some(WHITE));
        assert_eq!(canvas.get(24, 15), Some(WHITE));
        assert_eq!(canvas.get(15, 15), Some(BLACK));
    }

    #[test]
    fn test_highlight_arc_stays_inside() {
        let mut canvas = Canvas::new(41, 41);
        let disc = DiscPlacement::new(20, 20, 12);
        let written = highlight_arc(&mut canvas, &disc, WHITE, &HighlightConfig::default());
        assert!(written > 0);
        // 90 degrees points down the canvas: radius 12 / 2 = 6 below centre.
        assert_eq!(canvas.get(20, 26), Some(WHITE));
        for y in 0..41 {
            for x in 0..41 {
                if canvas.get(x, y) == Some(WHITE) {
                    assert!(disc.contains(x, y));
                }
            }
        }
    }
}
