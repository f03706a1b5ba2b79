//! Starfield: scattered stars, crosses, bursts, clusters and streaks.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use super::config::{StarClusterConfig, StarConfig, StreakConfig};
use crate::canvas::Canvas;
use crate::color::{Color, WHITE};
use crate::planet::to_color;

const CROSS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

fn pick<R: Rng + ?Sized>(rng: &mut R, colors: &[[u8; 3]]) -> Color {
    if colors.is_empty() {
        return WHITE;
    }
    to_color(colors[rng.random_range(0..colors.len())])
}

fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random_bool(if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) })
}

/// Uniform position in `[margin, len - margin)`, or anywhere on a short axis.
fn inset<R: Rng + ?Sized>(rng: &mut R, len: i32, margin: i32) -> i32 {
    if len > 2 * margin {
        rng.random_range(margin..len - margin)
    } else {
        rng.random_range(0..len)
    }
}

/// Scatters `density * width * height` single-pixel stars.
///
/// Some stars grow a plus-shaped cross of neighbours, a few become a white
/// square burst. Returns the number of stars placed.
pub fn scatter_stars<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R, config: &StarConfig) -> usize {
    let (width, height) = (canvas.width(), canvas.height());
    if width == 0 || height == 0 {
        return 0;
    }
    let count = (config.density.max(0.0) * width as f32 * height as f32) as usize;

    for _ in 0..count {
        let x = rng.random_range(0..width) as i32;
        let y = rng.random_range(0..height) as i32;
        canvas.put(x, y, pick(rng, &config.colors));

        if chance(rng, config.cross_probability) {
            for (dx, dy) in CROSS {
                let color = pick(rng, &config.colors);
                canvas.put(x + dx, y + dy, color);
            }
        }
        if chance(rng, config.burst_probability) {
            let r = config.burst_size.sample(rng).max(0);
            for yy in -r..=r {
                for xx in -r..=r {
                    canvas.put(x + xx, y + yy, WHITE);
                }
            }
        }
    }
    count
}

/// Draws tight groups of stars around random centres.
pub fn draw_star_clusters<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rng: &mut R,
    config: &StarClusterConfig,
) -> u32 {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);
    if width == 0 || height == 0 {
        return 0;
    }
    let spread = config.spread.max(0);

    let clusters = config.count.sample(rng);
    for _ in 0..clusters {
        let centre = Vec2::new(inset(rng, width, spread) as f32, inset(rng, height, spread) as f32);
        for _ in 0..config.stars_per {
            let angle = rng.random_range(0.0..TAU);
            let dist = rng.random_range(0..=spread) as f32;
            let p = centre + Vec2::from_angle(angle) * dist;
            let (x, y) = (p.x as i32, p.y as i32);
            let color = pick(rng, &config.colors);
            if canvas.put(x, y, color) && chance(rng, config.twin_probability) {
                canvas.put(x + 1, y, color);
            }
        }
    }
    clusters
}

/// Draws straight one-pixel streaks in random directions.
pub fn draw_streaks<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R, config: &StreakConfig) -> u32 {
    let (width, height) = (canvas.width(), canvas.height());
    if width == 0 || height == 0 {
        return 0;
    }
    let color = to_color(config.color);
    let count = config.count.sample(rng);
    for _ in 0..count {
        let start = Vec2::new(rng.random_range(0..width) as f32, rng.random_range(0..height) as f32);
        let dir = Vec2::from_angle(rng.random_range(0.0..TAU));
        let length = config.length.sample(rng).max(0);
        for i in 0..length {
            let p = start + dir * i as f32;
            canvas.put(p.x as i32, p.y as i32, color);
        }
    }
    count
}

/// Runs every enabled star pass.
pub fn paint_starfield<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R, config: &StarConfig) {
    let stars = scatter_stars(canvas, rng, config);
    let clusters = match &config.clusters {
        Some(clusters) => draw_star_clusters(canvas, rng, clusters),
        None => 0,
    };
    let streaks = match &config.streaks {
        Some(streaks) => draw_streaks(canvas, rng, streaks),
        None => 0,
    };
    debug!(stars, clusters, streaks, "painted starfield");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLACK;
    use crate::span::Span;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn plain_stars(density: f32) -> StarConfig {
        StarConfig {
            density,
            colors: vec![[255, 255, 255]],
            cross_probability: 0.0,
            burst_probability: 0.0,
            burst_size: Span::fixed(1),
            clusters: None,
            streaks: None,
        }
    }

    fn lit_pixels(canvas: &Canvas) -> usize {
        canvas.image().pixels().filter(|&&p| p != BLACK).count()
    }

    #[test]
    fn test_star_count_follows_density() {
        let mut canvas = Canvas::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(scatter_stars(&mut canvas, &mut rng, &plain_stars(0.5)), 50);
        let lit = lit_pixels(&canvas);
        assert!(lit > 0 && lit <= 50);
    }

    #[test]
    fn test_zero_density_draws_nothing() {
        let mut canvas = Canvas::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(scatter_stars(&mut canvas, &mut rng, &plain_stars(0.0)), 0);
        assert_eq!(lit_pixels(&canvas), 0);
    }

    #[test]
    fn test_bursts_near_edges_stay_in_bounds() {
        let mut canvas = Canvas::new(3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = StarConfig {
            cross_probability: 1.0,
            burst_probability: 1.0,
            burst_size: Span::fixed(3),
            ..plain_stars(1.0)
        };
        scatter_stars(&mut canvas, &mut rng, &config);
        assert_eq!(lit_pixels(&canvas), 9);
    }

    #[test]
    fn test_clusters_and_streaks() {
        let mut canvas = Canvas::new(60, 40);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let clusters = StarClusterConfig {
            count: Span::fixed(3),
            stars_per: 10,
            spread: 5,
            colors: vec![[255, 240, 180]],
            twin_probability: 0.5,
        };
        assert_eq!(draw_star_clusters(&mut canvas, &mut rng, &clusters), 3);
        assert!(lit_pixels(&canvas) > 0);

        let mut canvas = Canvas::new(60, 40);
        let streaks = StreakConfig {
            count: Span::fixed(2),
            length: Span::fixed(10),
            color: [200, 200, 255],
        };
        assert_eq!(draw_streaks(&mut canvas, &mut rng, &streaks), 2);
        assert!(lit_pixels(&canvas) > 0);
    }
}
