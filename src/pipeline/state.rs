//! Mutable state threaded through the scene stages.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::canvas::Canvas;
use crate::color::Palette;
use crate::planet::DiscPlacement;
use crate::scene::SceneConfig;

/// A planet drawn by the planet stage, kept for the passes that decorate it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    pub placement: DiscPlacement,
    pub palette: Palette,
}

/// A scene under construction.
///
/// Every random decision draws from `rng`, so a scene built from the same
/// seed and stages is identical pixel for pixel.
#[derive(Debug, Clone)]
pub struct Scene {
    pub canvas: Canvas,
    pub rng: ChaCha8Rng,
    pub planets: Vec<PlanetRecord>,
    pub moons: Vec<DiscPlacement>,
    seed: u64,
}

impl Scene {
    /// Creates a black canvas of the given logical size.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            rng: ChaCha8Rng::seed_from_u64(seed),
            planets: Vec::new(),
            moons: Vec::new(),
            seed,
        }
    }

    /// Creates a scene sized for `config`.
    pub fn for_config(config: &SceneConfig, seed: u64) -> Self {
        Self::new(config.width, config.height, seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}
