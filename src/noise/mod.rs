//! Coherent noise used for planet surfaces, nebulae and background grain.
//!
//! Uses simdnoise for the underlying simplex samples.

mod field;
mod fractal;

pub use field::{sample_grid, ConstantNoise, NoiseField};
pub use fractal::{sample_fractal_noise, FractalNoise, FractalNoiseConfig};
