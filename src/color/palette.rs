//! Ordered color ramps used for band quantization.

use std::fmt;
use std::str::FromStr;

use image::Rgb;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ops::{jitter, Color};

/// Errors that can occur when building a palette.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Palette must contain at least one color")]
    Empty,
    #[error("Unknown palette '{0}' (expected red, purple, blue or dark_brown)")]
    UnknownKind(String),
}

/// An immutable, non-empty sequence of colors.
///
/// Index 0 is the deepest band and the last index the brightest/outermost
/// one. Lookups clamp out-of-range indices, so a band count larger than the
/// palette can never index past the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[u8; 3]>", into = "Vec<[u8; 3]>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from a list of colors.
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Creates a palette from raw `[r, g, b]` triples.
    pub fn from_rgb(colors: &[[u8; 3]]) -> Result<Self, PaletteError> {
        Self::new(colors.iter().map(|&c| Rgb(c)).collect())
    }

    /// Random vivid palette.
    ///
    /// Each channel mixes a bright draw in `[128, 255]` with a dark draw in
    /// `[0, 100]`, weighted by `vibrance` (0 = dark and muddy, 1 = bright).
    pub fn random<R: Rng + ?Sized>(rng: &mut R, count: usize, vibrance: f32) -> Self {
        let vibrance = vibrance.clamp(0.0, 1.0);
        let colors = (0..count.max(1))
            .map(|_| {
                Rgb(std::array::from_fn(|_| {
                    let bright = rng.random_range(128..=255u8) as f32;
                    let dark = rng.random_range(0..=100u8) as f32;
                    (vibrance * bright + (1.0 - vibrance) * dark) as u8
                }))
            })
            .collect();
        Self { colors }
    }

    /// Random palette with every channel uniform in `[low, high]`.
    pub fn random_range<R: Rng + ?Sized>(rng: &mut R, count: usize, low: u8, high: u8) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let colors = (0..count.max(1))
            .map(|_| Rgb(std::array::from_fn(|_| rng.random_range(low..=high))))
            .collect();
        Self { colors }
    }

    /// Monochrome ramp ending at `base`.
    ///
    /// Band `i` is `base` darkened by `step * (bands - 1 - i)`, so the
    /// ramp runs from dark to `base`.
    pub fn gradient(base: Color, bands: usize, step: u8) -> Self {
        let bands = bands.max(1);
        let colors = (0..bands)
            .map(|i| {
                let amount = (step as usize * (bands - 1 - i)).min(255) as u8;
                super::ops::darken(base, amount)
            })
            .collect();
        Self { colors }
    }

    /// Derives a smaller palette by picking colors of `self` and jittering
    /// each channel by up to `amount`.
    pub fn derive<R: Rng + ?Sized>(&self, rng: &mut R, count: usize, amount: u8) -> Self {
        let colors = (0..count.max(1))
            .map(|_| {
                let base = self.choose(rng);
                jitter(rng, base, amount)
            })
            .collect();
        Self { colors }
    }

    /// Returns the palette in reverse order.
    pub fn reversed(&self) -> Self {
        let mut colors = self.colors.clone();
        colors.reverse();
        Self { colors }
    }

    /// Number of colors (bands).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; palettes cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color at `index`, clamped to the last band.
    pub fn color(&self, index: usize) -> Color {
        self.colors[index.min(self.colors.len() - 1)]
    }

    /// Deepest band.
    pub fn first(&self) -> Color {
        self.colors[0]
    }

    /// Brightest/outermost band.
    pub fn last(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }

    /// Picks a random color.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.colors[rng.random_range(0..self.colors.len())]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl TryFrom<Vec<[u8; 3]>> for Palette {
    type Error = PaletteError;

    fn try_from(value: Vec<[u8; 3]>) -> Result<Self, Self::Error> {
        Self::from_rgb(&value)
    }
}

impl From<Palette> for Vec<[u8; 3]> {
    fn from(palette: Palette) -> Self {
        palette.colors.into_iter().map(|c| c.0).collect()
    }
}

/// Built-in seven-band palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteKind {
    Red,
    Purple,
    Blue,
    DarkBrown,
}

impl PaletteKind {
    /// All preset kinds.
    pub fn all() -> [PaletteKind; 4] {
        [
            PaletteKind::Red,
            PaletteKind::Purple,
            PaletteKind::Blue,
            PaletteKind::DarkBrown,
        ]
    }

    /// Returns the name of the preset.
    pub fn name(&self) -> &'static str {
        match self {
            PaletteKind::Red => "red",
            PaletteKind::Purple => "purple",
            PaletteKind::Blue => "blue",
            PaletteKind::DarkBrown => "dark_brown",
        }
    }

    fn rgb(&self) -> &'static [[u8; 3]; 7] {
        match self {
            PaletteKind::Red => &[
                [32, 5, 8], [60, 10, 14], [90, 18, 22], [120, 24, 27],
                [150, 34, 35], [180, 44, 46], [210, 58, 63],
            ],
            PaletteKind::Purple => &[
                [18, 5, 30], [32, 10, 50], [50, 18, 75], [64, 24, 95],
                [85, 35, 120], [110, 50, 150], [140, 65, 190],
            ],
            PaletteKind::Blue => &[
                [7, 13, 23], [14, 23, 38], [22, 32, 54], [33, 47, 80],
                [46, 69, 104], [60, 90, 138], [80, 120, 178],
            ],
            PaletteKind::DarkBrown => &[
                [14, 9, 6], [19, 13, 9], [29, 20, 13], [38, 26, 16],
                [48, 33, 22], [59, 40, 28], [80, 55, 40],
            ],
        }
    }

    /// Resolves the preset into a palette.
    pub fn palette(&self) -> Palette {
        Palette {
            colors: self.rgb().iter().map(|&c| Rgb(c)).collect(),
        }
    }
}

impl FromStr for PaletteKind {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        PaletteKind::all()
            .into_iter()
            .find(|kind| kind.name() == key)
            .ok_or_else(|| PaletteError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
