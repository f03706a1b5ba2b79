//! Fixed-size RGB canvas.

use image::{ImageBuffer, RgbImage};

use crate::color::{lerp, Color, BLACK};

/// A mutable RGB pixel grid.
///
/// Coordinates are signed so that callers can compute positions relative to
/// discs centred outside the grid; anything outside `[0, width) x [0, height)`
/// is ignored on write and reported as `None` on read.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Creates a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, BLACK)
    }

    /// Creates a canvas filled with `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width, height, color),
        }
    }

    /// Wraps an existing image.
    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns true if `(x, y)` lies on the canvas.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Reads a pixel.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if self.contains(x, y) {
            Some(*self.image.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Writes a pixel, returning false if it was out of bounds.
    pub fn put(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.image.put_pixel(x as u32, y as u32, color);
        true
    }

    /// Blends `color` over the existing pixel: `current * (1 - alpha) + color * alpha`.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) -> bool {
        match self.get(x, y) {
            Some(current) => self.put(x, y, lerp(current, color, alpha)),
            None => false,
        }
    }

    /// Fills the whole canvas.
    pub fn fill(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Fills one row; out-of-range rows are ignored.
    pub fn fill_row(&mut self, y: u32, color: Color) {
        if y >= self.height() {
            return;
        }
        for x in 0..self.width() {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Replicates every pixel into a `factor x factor` block.
    ///
    /// A factor of 0 is treated as 1.
    pub fn upscale(&self, factor: u32) -> Canvas {
        let factor = factor.max(1);
        let image = ImageBuffer::from_fn(self.width() * factor, self.height() * factor, |x, y| {
            *self.image.get_pixel(x / factor, y / factor)
        });
        Canvas { image }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{rgb, WHITE};

    #[test]
    fn test_out_of_bounds_writes_are_skipped() {
        let mut canvas = Canvas::new(4, 3);
        assert!(canvas.put(0, 0, WHITE));
        assert!(canvas.put(3, 2, WHITE));
        assert!(!canvas.put(-1, 0, WHITE));
        assert!(!canvas.put(4, 0, WHITE));
        assert!(!canvas.put(0, 3, WHITE));
        assert!(!canvas.put(i32::MIN, i32::MAX, WHITE));
        assert_eq!(canvas.get(4, 0), None);
        assert_eq!(canvas.get(3, 2), Some(WHITE));
    }

    #[test]
    fn test_blend_endpoints() {
        let mut canvas = Canvas::filled(2, 2, rgb(100, 50, 0));
        canvas.blend(0, 0, rgb(0, 0, 200), 1.0);
        canvas.blend(1, 0, rgb(0, 0, 200), 0.0);
        assert_eq!(canvas.get(0, 0), Some(rgb(0, 0, 200)));
        assert_eq!(canvas.get(1, 0), Some(rgb(100, 50, 0)));
        assert!(!canvas.blend(5, 5, WHITE, 0.5));
    }

    #[test]
    fn test_fill_row() {
        let mut canvas = Canvas::new(3, 3);
        canvas.fill_row(1, WHITE);
        canvas.fill_row(10, WHITE);
        assert_eq!(canvas.get(2, 1), Some(WHITE));
        assert_eq!(canvas.get(2, 0), Some(BLACK));
    }

    #[test]
    fn test_upscale_replicates_blocks() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put(1, 0, WHITE);
        let big = canvas.upscale(3);
        assert_eq!((big.width(), big.height()), (6, 6));
        for y in 0..6 {
            for x in 0..6 {
                let expected = if x >= 3 && y < 3 { WHITE } else { BLACK };
                assert_eq!(big.get(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
        assert_eq!(canvas.upscale(0), canvas);
    }
}
