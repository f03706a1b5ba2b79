//! The `NoiseField` abstraction.

use rayon::prelude::*;

/// A deterministic scalar field over 2D space.
///
/// Implementations must return a value in `[-1, 1]` for every input and the
/// same value for the same input. Coordinates are usually pixel positions
/// divided by the canvas size, optionally multiplied by a frequency; inputs
/// outside `[0, 1]` are still evaluated.
pub trait NoiseField: Send + Sync {
    fn sample(&self, nx: f32, ny: f32) -> f32;
}

/// A field that returns the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseField for ConstantNoise {
    fn sample(&self, _nx: f32, _ny: f32) -> f32 {
        if self.0.is_nan() {
            0.0
        } else {
            self.0.clamp(-1.0, 1.0)
        }
    }
}

impl<N: NoiseField + ?Sized> NoiseField for &N {
    fn sample(&self, nx: f32, ny: f32) -> f32 {
        (**self).sample(nx, ny)
    }
}

impl<N: NoiseField + ?Sized> NoiseField for Box<N> {
    fn sample(&self, nx: f32, ny: f32) -> f32 {
        (**self).sample(nx, ny)
    }
}

/// Samples `field` at every pixel of a `width x height` grid.
///
/// Pixel `(x, y)` is sampled at `(x / width * scale, y / height * scale)`.
/// Returns values in row-major order. Rows are sampled in parallel.
pub fn sample_grid(field: &dyn NoiseField, width: u32, height: u32, scale: f32) -> Vec<f32> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    (0..(width * height))
        .into_par_iter()
        .map(|idx| {
            let x = idx % width;
            let y = idx / width;
            let nx = x as f32 / width as f32 * scale;
            let ny = y as f32 / height as f32 * scale;
            field.sample(nx, ny)
        })
        .collect()
}
