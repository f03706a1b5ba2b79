//! PNG export of upscaled canvases.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageEncoder;
use thiserror::Error;
use tracing::debug;

use crate::canvas::Canvas;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid scale: {0} (must be at least 1)")]
    InvalidScale(u32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Integer upscale factor; every canvas pixel becomes a `scale x scale` block.
    pub scale: u32,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            scale: 1,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    pub fn with_scale(scale: u32) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }
}

/// Upscales `canvas` and writes it as an 8-bit RGB PNG.
///
/// Parent directories are created as needed.
///
/// # Returns
/// `Ok(())` on success, or an error if the scale is zero or writing fails
pub fn export_canvas_png(
    canvas: &Canvas,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    if options.scale == 0 {
        return Err(PngExportError::InvalidScale(options.scale));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let upscaled = canvas.upscale(options.scale);
    let image = upscaled.image();

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    debug!(path = %path.display(), width = image.width(), height = image.height(), "wrote png");
    Ok(())
}

/// Writes `canvas` to `{output_dir}/{base_name}.png` and returns the path.
pub fn export_named_png(
    canvas: &Canvas,
    output_dir: &Path,
    base_name: &str,
    options: &PngExportOptions,
) -> Result<PathBuf, PngExportError> {
    let path = output_dir.join(format!("{}.png", base_name));
    export_canvas_png(canvas, &path, options)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{rgb, WHITE};
    use tempfile::tempdir;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new(3, 2);
        canvas.put(0, 0, WHITE);
        canvas.put(2, 1, rgb(10, 200, 30));
        canvas
    }

    #[test]
    fn test_export_upscaled_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.png");
        export_canvas_png(&sample_canvas(), &path, &PngExportOptions::with_scale(4)).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (12, 8));
        assert_eq!(*decoded.get_pixel(3, 3), WHITE);
        assert_eq!(*decoded.get_pixel(4, 3), rgb(0, 0, 0));
        assert_eq!(*decoded.get_pixel(11, 7), rgb(10, 200, 30));
        assert_eq!(*decoded.get_pixel(8, 4), rgb(10, 200, 30));
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.png");
        let result = export_canvas_png(&sample_canvas(), &path, &PngExportOptions::with_scale(0));
        assert!(matches!(result, Err(PngExportError::InvalidScale(0))));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_named_creates_directories() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("renders").join("today");
        let path = export_named_png(&sample_canvas(), &out, "space_1", &PngExportOptions::default())
            .unwrap();
        assert_eq!(path, out.join("space_1.png"));
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
