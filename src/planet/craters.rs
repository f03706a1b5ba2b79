//! Craters stamped onto a shaded planet.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::config::{to_color, CraterConfig};
use super::placement::DiscPlacement;
use crate::canvas::{disc_offsets, Canvas};

/// Stamps a random number of small discs inside the planet.
///
/// Each crater is clipped to the parent disc and blended toward the crater
/// color with `config.alpha`. Returns the number of craters placed.
pub fn draw_craters<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rng: &mut R,
    parent: &DiscPlacement,
    config: &CraterConfig,
) -> u32 {
    if parent.radius <= 0 {
        return 0;
    }
    let count = config.count.sample(rng);
    let color = to_color(config.color);
    let (width, height) = (canvas.width(), canvas.height());
    let r = parent.radius as f32;

    for _ in 0..count {
        let angle = rng.random_range(0.0..TAU);
        let dist = r * config.distance.sample(rng);
        let radius = config.radius.sample(rng);
        let centre = parent.center() + Vec2::from_angle(angle) * dist;
        let (ccx, ccy) = (centre.x as i32, centre.y as i32);

        for (x, y) in disc_offsets(ccx, ccy, radius, width, height) {
            let (px, py) = (ccx + x, ccy + y);
            if parent.contains(px, py) {
                canvas.blend(px, py, color, config.alpha);
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{rgb, BLACK};
    use crate::span::Span;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_craters_stay_inside_parent() {
        let mut canvas = Canvas::filled(60, 60, rgb(120, 120, 120));
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let parent = DiscPlacement::new(30, 30, 15);
        let config = CraterConfig {
            count: Span::fixed(20),
            radius: Span::new(3, 6),
            distance: Span::new(0.5, 1.0),
            color: [0, 0, 0],
            alpha: 1.0,
        };
        assert_eq!(draw_craters(&mut canvas, &mut rng, &parent, &config), 20);

        let mut marked = 0;
        for y in 0..60 {
            for x in 0..60 {
                if canvas.get(x, y) == Some(BLACK) {
                    assert!(parent.contains(x, y), "crater pixel outside at ({}, {})", x, y);
                    marked += 1;
                }
            }
        }
        assert!(marked > 0);
    }

    #[test]
    fn test_zero_radius_parent_is_skipped() {
        let mut canvas = Canvas::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let parent = DiscPlacement::new(5, 5, 0);
        assert_eq!(draw_craters(&mut canvas, &mut rng, &parent, &CraterConfig::default()), 0);
    }
}
