//! Multi-octave fractal Brownian motion (fBm) noise.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;

use super::field::NoiseField;

/// simdnoise returns unscaled 2D simplex, peaking near 1/40.
const SIMPLEX_2D_SCALE: f32 = 40.0;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves (2-5 typical for pixel art).
    pub octaves: u8,
    /// Base frequency applied to the input coordinates.
    pub frequency: f32,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f32,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f32,
    /// Random seed for reproducible generation.
    pub seed: i32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            frequency: 2.0,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 42,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates a new noise configuration with the given seed.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Planet surfaces: coarse continents with a little detail.
    pub fn planet_surface(octaves: u8, seed: i32) -> Self {
        Self {
            octaves,
            frequency: 2.5,
            lacunarity: 2.0,
            persistence: 0.5,
            seed,
        }
    }

    /// Moons: higher base frequency, fewer octaves.
    pub fn moon_surface(octaves: u8, seed: i32) -> Self {
        Self {
            octaves,
            frequency: 4.0,
            lacunarity: 2.0,
            persistence: 0.4,
            seed,
        }
    }

    /// Nebula clouds: low frequency, soft falloff.
    pub fn nebula(octaves: u8, seed: i32) -> Self {
        Self {
            octaves,
            frequency: 1.5,
            lacunarity: 2.0,
            persistence: 0.55,
            seed,
        }
    }
}

/// Samples fractal noise at a 2D position.
///
/// Each octave is one layer of simplex noise with its own seed offset,
/// rescaled from simdnoise's raw output to [-1, 1].
///
/// # Returns
/// A noise value in [-1, 1] (normalized by amplitude sum, then clamped)
pub fn sample_fractal_noise(pos: Vec2, config: &FractalNoiseConfig) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = config.frequency;
    let mut max_amplitude = 0.0f32;

    for octave in 0..config.octaves.max(1) {
        let octave_seed = config.seed.wrapping_add(octave as i32 * 31337);

        let x = pos.x * frequency;
        let y = pos.y * frequency;

        let noise_value = NoiseBuilder::fbm_2d_offset(x, 1, y, 1)
            .with_seed(octave_seed)
            .with_freq(1.0)
            .with_octaves(1)
            .generate()
            .0[0]
            * SIMPLEX_2D_SCALE;

        total += noise_value * amplitude;
        max_amplitude += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    let value = total / max_amplitude;
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// A seeded fractal noise field.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalNoise {
    config: FractalNoiseConfig,
}

impl FractalNoise {
    pub fn new(config: FractalNoiseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FractalNoiseConfig {
        &self.config
    }
}

impl NoiseField for FractalNoise {
    fn sample(&self, nx: f32, ny: f32) -> f32 {
        sample_fractal_noise(Vec2::new(nx, ny), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.octaves, 4);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.5);
    }

    #[test]
    fn test_noise_reproducibility() {
        let noise = FractalNoise::new(FractalNoiseConfig::with_seed(12345));

        let result1 = noise.sample(0.5, 0.3);
        let result2 = noise.sample(0.5, 0.3);

        assert_eq!(result1, result2, "Same seed and position should produce same result");

        let twin = FractalNoise::new(FractalNoiseConfig::with_seed(12345));
        assert_eq!(twin.sample(0.5, 0.3), result1);
    }

    #[test]
    fn test_noise_range() {
        let noise = FractalNoise::new(FractalNoiseConfig::planet_surface(5, 7));
        let test_positions = [
            (0.0, 0.0),
            (1.0, 0.0),
            (0.25, 0.75),
            (0.577, 0.123),
            (-3.5, 12.0),
            (1000.0, -1000.0),
        ];

        for (x, y) in test_positions {
            let value = noise.sample(x, y);
            assert!(
                (-1.0..=1.0).contains(&value),
                "Noise value {} at ({}, {}) out of range",
                value,
                x,
                y
            );
        }
    }

    #[test]
    fn test_noise_spans_most_of_the_range() {
        for config in [
            FractalNoiseConfig::planet_surface(4, 7),
            FractalNoiseConfig::moon_surface(3, 11),
            FractalNoiseConfig::default(),
        ] {
            let noise = FractalNoise::new(config.clone());
            let mut min = f32::MAX;
            let mut max = f32::MIN;
            for j in 0..64 {
                for i in 0..64 {
                    let v = noise.sample(i as f32 / 64.0, j as f32 / 64.0);
                    min = min.min(v);
                    max = max.max(v);
                }
            }
            assert!(min < -0.3 && max > 0.3, "{:?}: range [{}, {}]", config, min, max);
        }
    }

    #[test]
    fn test_noise_is_smooth() {
        let noise = FractalNoise::new(FractalNoiseConfig::planet_surface(4, 99));
        let mut x = 0.1f32;
        while x < 0.9 {
            let a = noise.sample(x, 0.4);
            let b = noise.sample(x + 1e-5, 0.4);
            assert!((a - b).abs() < 0.05, "jump of {} at x = {}", (a - b).abs(), x);
            x += 0.05;
        }
    }

    #[test]
    fn test_different_seeds_produce_different_results() {
        let noise1 = FractalNoise::new(FractalNoiseConfig::with_seed(1));
        let noise2 = FractalNoise::new(FractalNoiseConfig::with_seed(2));

        let differs = [(0.5, 0.3), (0.1, 0.9), (0.77, 0.21)]
            .iter()
            .any(|&(x, y)| noise1.sample(x, y) != noise2.sample(x, y));

        assert!(differs, "Different seeds should produce different results");
    }

    #[test]
    fn test_zero_octaves_behaves_like_one() {
        let zero = FractalNoiseConfig { octaves: 0, ..FractalNoiseConfig::with_seed(5) };
        let one = FractalNoiseConfig { octaves: 1, ..FractalNoiseConfig::with_seed(5) };
        let pos = Vec2::new(0.4, 0.6);
        assert_eq!(sample_fractal_noise(pos, &zero), sample_fractal_noise(pos, &one));
    }
}
