//! Non-overlapping placement of discs on the canvas.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::PlacementConfig;

/// Position and size of a disc, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscPlacement {
    pub cx: i32,
    pub cy: i32,
    pub radius: i32,
}

impl DiscPlacement {
    pub const fn new(cx: i32, cy: i32, radius: i32) -> Self {
        Self { cx, cy, radius }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.cx as f32, self.cy as f32)
    }

    pub fn distance_to(&self, other: &DiscPlacement) -> f32 {
        self.center().distance(other.center())
    }

    /// True if the two discs are closer than `spacing` edge to edge.
    pub fn crowds(&self, other: &DiscPlacement, spacing: i32) -> bool {
        self.distance_to(other) <= (self.radius + other.radius + spacing) as f32
    }

    /// True if the pixel at `(x, y)` lies inside the disc.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let dx = x as i64 - self.cx as i64;
        let dy = y as i64 - self.cy as i64;
        let r = self.radius.max(0) as i64;
        self.radius > 0 && dx * dx + dy * dy <= r * r
    }
}

/// Places up to `config.count` discs by rejection sampling.
///
/// Each disc gets `attempts_per_disc` candidates; a candidate is accepted
/// when it keeps `spacing` pixels from every disc already accepted. Discs
/// that exhaust their attempts are dropped, so fewer discs than requested
/// may come back on crowded canvases.
pub fn place_discs<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    config: &PlacementConfig,
) -> Vec<DiscPlacement> {
    let requested = config.count.sample(rng);
    let mut placed: Vec<DiscPlacement> = Vec::with_capacity(requested as usize);

    for _ in 0..requested {
        for _ in 0..config.attempts_per_disc {
            let radius = config.radius.sample(rng);
            if radius <= 0 {
                continue;
            }
            let lo = radius + config.edge_margin;
            let (hi_x, hi_y) = (
                width as i32 - radius - config.edge_margin,
                height as i32 - radius - config.edge_margin,
            );
            if lo > hi_x || lo > hi_y {
                continue;
            }

            let candidate = DiscPlacement::new(
                rng.random_range(lo..=hi_x),
                rng.random_range(lo..=hi_y),
                radius,
            );
            if placed.iter().all(|other| !candidate.crowds(other, config.spacing)) {
                placed.push(candidate);
                break;
            }
        }
    }

    debug!(requested, placed = placed.len(), "placed discs");
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_separated(discs: &[DiscPlacement], spacing: i32) {
        for (i, a) in discs.iter().enumerate() {
            for b in &discs[i + 1..] {
                assert!(!a.crowds(b, spacing), "{:?} and {:?} overlap", a, b);
            }
        }
    }

    #[test]
    fn test_discs_fit_inside_margins() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = PlacementConfig {
            count: Span::fixed(3),
            ..PlacementConfig::default()
        };
        let discs = place_discs(&mut rng, 240, 180, &config);
        assert!(!discs.is_empty());
        for d in &discs {
            assert!(d.cx - d.radius >= config.edge_margin);
            assert!(d.cy - d.radius >= config.edge_margin);
            assert!(d.cx + d.radius <= 240 - config.edge_margin);
            assert!(d.cy + d.radius <= 180 - config.edge_margin);
        }
        assert_separated(&discs, config.spacing);
    }

    #[test]
    fn test_crowded_canvas_returns_fewer_discs() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = PlacementConfig {
            count: Span::fixed(10),
            radius: Span::fixed(20),
            edge_margin: 0,
            spacing: 0,
            attempts_per_disc: 40,
        };
        let discs = place_discs(&mut rng, 100, 100, &config);
        assert!(discs.len() < 10);
        assert!(!discs.is_empty());
        assert_separated(&discs, 0);
    }

    #[test]
    fn test_impossible_placement_terminates_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let config = PlacementConfig {
            count: Span::fixed(4),
            radius: Span::fixed(80),
            ..PlacementConfig::default()
        };
        assert!(place_discs(&mut rng, 50, 50, &config).is_empty());
        assert!(place_discs(&mut rng, 0, 0, &config).is_empty());
    }

    #[test]
    fn test_contains() {
        let d = DiscPlacement::new(5, 5, 2);
        assert!(d.contains(5, 5));
        assert!(d.contains(7, 5));
        assert!(!d.contains(7, 7));
        assert!(!DiscPlacement::new(0, 0, 0).contains(0, 0));
    }
}
