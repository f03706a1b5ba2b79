//! Planet, moon and surface-effect configuration.

use serde::{Deserialize, Serialize};

use crate::color::{rgb, Color};
use crate::span::Span;

/// Weights of the radial and noise terms in the disc shading blend.
///
/// The noise weight is always `1 - radial`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadingWeights {
    pub radial: f32,
}

impl Default for ShadingWeights {
    fn default() -> Self {
        Self { radial: 0.45 }
    }
}

impl ShadingWeights {
    /// Purely radial shading; noise has no influence.
    pub fn radial_only() -> Self {
        Self { radial: 1.0 }
    }

    /// Blends normalized distance from the centre with a noise sample in
    /// `[-1, 1]`. The result lies in `[0, 1]` for inputs in range.
    pub fn blend(&self, radial: f32, noise: f32) -> f32 {
        let w = if self.radial.is_nan() { 0.0 } else { self.radial.clamp(0.0, 1.0) };
        w * radial + (1.0 - w) * (noise + 1.0) * 0.5
    }
}

/// Bright outline where the disc meets space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminatorConfig {
    /// Pixels with `|radial - 1| < epsilon` are affected.
    pub epsilon: f32,
    /// How far the band color moves toward white (1.0 = pure white).
    pub mix: f32,
}

/// Pixels where the noise crosses `threshold` inside `radial_cutoff` are
/// overwritten with `color`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeckleConfig {
    pub threshold: f32,
    pub radial_cutoff: f32,
    pub color: [u8; 3],
}

/// Random flecks scattered in an annulus of the disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleckConfig {
    pub probability: f64,
    pub center: f32,
    pub half_width: f32,
    pub color: [u8; 3],
}

/// Per-pixel overrides applied after band lookup, in field order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceEffects {
    pub terminator: Option<TerminatorConfig>,
    /// Dark patches where noise falls below the threshold.
    pub craters: Option<SpeckleConfig>,
    /// Bright patches where noise rises above the threshold.
    pub spots: Option<SpeckleConfig>,
    pub flecks: Option<FleckConfig>,
}

impl Default for SurfaceEffects {
    fn default() -> Self {
        Self {
            terminator: Some(TerminatorConfig { epsilon: 0.07, mix: 1.0 }),
            craters: Some(SpeckleConfig {
                threshold: -0.2,
                radial_cutoff: 0.85,
                color: [52, 52, 52],
            }),
            spots: Some(SpeckleConfig {
                threshold: 0.7,
                radial_cutoff: 0.7,
                color: [230, 230, 255],
            }),
            flecks: Some(FleckConfig {
                probability: 0.003,
                center: 0.55,
                half_width: 0.24,
                color: [180, 90, 10],
            }),
        }
    }
}

impl SurfaceEffects {
    /// No overrides at all.
    pub fn none() -> Self {
        Self {
            terminator: None,
            craters: None,
            spots: None,
            flecks: None,
        }
    }
}

/// Shading parameters shared by planets and moons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscStyle {
    pub weights: ShadingWeights,
    pub effects: SurfaceEffects,
}

/// Which half of a disc a half-disc shadow covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowSide {
    /// Offsets with `x > 0`.
    East,
    /// Offsets with `x < 0`.
    West,
    /// Offsets with `y < 0`.
    North,
    /// Offsets with `y > 0`.
    South,
}

impl ShadowSide {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        match self {
            ShadowSide::East => x > 0,
            ShadowSide::West => x < 0,
            ShadowSide::North => y < 0,
            ShadowSide::South => y > 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ShadowStyle {
    /// Uniform shade over one half of the disc.
    HalfDisc { side: ShadowSide },
    /// Shade that fades out from a point offset from the disc centre.
    Soft { offset: [i32; 2] },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowConfig {
    pub style: ShadowStyle,
    pub color: [u8; 3],
    pub alpha: Span<f32>,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            style: ShadowStyle::HalfDisc { side: ShadowSide::East },
            color: [0, 0, 0],
            alpha: Span::new(0.18, 0.42),
        }
    }
}

/// Concentric rings drawn around a planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Chance that a given planet gets rings at all.
    pub probability: f64,
    pub count: Span<u32>,
    /// Gap between consecutive rings, drawn per ring.
    pub spacing: Span<i32>,
    /// Per-channel darkening between consecutive rings.
    pub fade: Span<u8>,
    /// Angular resolution of the sweep, in degrees.
    pub angle_step: f32,
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    pub thicken_probability: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            probability: 1.0,
            count: Span::new(1, 3),
            spacing: Span::new(7, 11),
            fade: Span::new(8, 24),
            angle_step: 1.0,
            wave_amplitude: 0.0,
            wave_frequency: 0.0,
            thicken_probability: 0.11,
        }
    }
}

/// Round blemishes blended onto a planet after shading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraterConfig {
    pub count: Span<u32>,
    pub radius: Span<i32>,
    /// Distance of each crater from the planet centre, as a fraction of its radius.
    pub distance: Span<f32>,
    pub color: [u8; 3],
    pub alpha: f32,
}

impl Default for CraterConfig {
    fn default() -> Self {
        Self {
            count: Span::new(7, 17),
            radius: Span::new(2, 7),
            distance: Span::new(0.15, 0.88),
            color: [50, 46, 32],
            alpha: 1.0,
        }
    }
}

/// Thin bright outline just outside a disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RimLightConfig {
    pub thickness: u32,
    pub color: [u8; 3],
    /// Mix from the palette's outer color toward `color` (1.0 = `color`).
    pub tint: f32,
}

impl Default for RimLightConfig {
    fn default() -> Self {
        Self {
            thickness: 1,
            color: [230, 230, 240],
            tint: 0.7,
        }
    }
}

/// Short crescent of light inside a planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    pub start_deg: f32,
    pub end_deg: f32,
    /// Each divisor `t` draws the arc at `radius / t`.
    pub divisors: Span<u32>,
    /// Fixed color; `None` picks a random color from the planet palette.
    pub color: Option<[u8; 3]>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            start_deg: 70.0,
            end_deg: 110.0,
            divisors: Span::new(2, 6),
            color: None,
        }
    }
}

/// Satellites orbiting each planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonConfig {
    pub count: Span<u32>,
    pub radius: Span<i32>,
    /// Gap between the planet's edge and the moon's edge.
    pub gap: Span<i32>,
    /// Direction from the planet centre, in degrees.
    pub angle: Span<f32>,
    /// Number of colors picked from the base palette.
    pub bands: Span<u32>,
    /// Per-channel jitter applied to each picked color.
    pub jitter: u8,
    pub octaves: Span<u8>,
    pub noise_scale: f32,
    pub shadow_alpha: Option<Span<f32>>,
    pub rim: Option<RimLightConfig>,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            count: Span::new(1, 3),
            radius: Span::new(4, 12),
            gap: Span::new(8, 18),
            angle: Span::new(0.0, 360.0),
            bands: Span::new(2, 4),
            jitter: 40,
            octaves: Span::new(2, 3),
            noise_scale: 1.0,
            shadow_alpha: None,
            rim: None,
        }
    }
}

/// Non-overlapping planet placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub count: Span<u32>,
    pub radius: Span<i32>,
    /// Minimum distance between a disc and the canvas edge.
    pub edge_margin: i32,
    /// Minimum gap between two discs.
    pub spacing: i32,
    pub attempts_per_disc: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            count: Span::new(2, 4),
            radius: Span::new(15, 30),
            edge_margin: 4,
            spacing: 12,
            attempts_per_disc: 40,
        }
    }
}

pub(crate) fn to_color(c: [u8; 3]) -> Color {
    rgb(c[0], c[1], c[2])
}
