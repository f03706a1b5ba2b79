//! Scene configuration, presets and JSON persistence.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Palette, PaletteKind};
use crate::planet::{
    CraterConfig, DiscStyle, FleckConfig, HighlightConfig, MoonConfig, PlacementConfig,
    RimLightConfig, RingConfig, ShadingWeights, ShadowConfig, ShadowStyle, SpeckleConfig,
    SurfaceEffects, TerminatorConfig,
};
use crate::span::Span;

/// Upper bound on concentric rings per planet.
const MAX_RINGS: u32 = 64;

/// Errors raised while loading, saving or validating a [`SceneConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Where a palette comes from when a scene is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PaletteSource {
    /// Random vivid colors.
    Random { bands: Span<u32>, vibrance: f32 },
    /// Random colors with every channel in `[low, high]`.
    Range { bands: Span<u32>, low: u8, high: u8 },
    /// One of the fixed presets.
    Preset { palette: PaletteKind },
    /// Monochrome ramp from a random base color. With `limb_darkening`
    /// the ramp is reversed so discs are brightest at the centre.
    Gradient {
        bands: u32,
        step: u8,
        base: Span<u8>,
        limb_darkening: bool,
    },
}

impl PaletteSource {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Palette {
        match self {
            PaletteSource::Random { bands, vibrance } => {
                let count = bands.sample(rng) as usize;
                Palette::random(rng, count, *vibrance)
            }
            PaletteSource::Range { bands, low, high } => {
                let count = bands.sample(rng) as usize;
                Palette::random_range(rng, count, *low, *high)
            }
            PaletteSource::Preset { palette } => palette.palette(),
            PaletteSource::Gradient {
                bands,
                step,
                base,
                limb_darkening,
            } => {
                let base = crate::color::rgb(base.sample(rng), base.sample(rng), base.sample(rng));
                let ramp = Palette::gradient(base, *bands as usize, *step);
                if *limb_darkening {
                    ramp.reversed()
                } else {
                    ramp
                }
            }
        }
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        match self {
            PaletteSource::Random { bands, vibrance } => {
                check_min(field, bands.ordered().0, 1)?;
                check_unit(&format!("{field}.vibrance"), *vibrance)
            }
            PaletteSource::Range { bands, .. } => check_min(field, bands.ordered().0, 1),
            PaletteSource::Preset { .. } => Ok(()),
            PaletteSource::Gradient { bands, .. } => check_min(field, *bands, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BackgroundStyle {
    /// Vertical blend between the first colors of two palettes.
    Gradient {
        top: PaletteSource,
        bottom: PaletteSource,
    },
    /// Vertical blend through every color of a preset.
    Preset { palette: PaletteKind },
    /// Equal-height horizontal bands.
    Stripes { bands: u32, palette: PaletteSource },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub style: BackgroundStyle,
    /// Maximum brightness added per channel by the grain pass (0 = off).
    pub grain: Span<u8>,
    pub grain_octaves: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarClusterConfig {
    pub count: Span<u32>,
    pub stars_per: u32,
    /// Maximum distance of a cluster star from its cluster centre.
    pub spread: i32,
    pub colors: Vec<[u8; 3]>,
    /// Chance of a second pixel right of each cluster star.
    pub twin_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakConfig {
    pub count: Span<u32>,
    pub length: Span<i32>,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    /// Stars per canvas pixel.
    pub density: f32,
    pub colors: Vec<[u8; 3]>,
    pub cross_probability: f64,
    pub burst_probability: f64,
    /// Half-size of the white square drawn for a burst.
    pub burst_size: Span<i32>,
    pub clusters: Option<StarClusterConfig>,
    pub streaks: Option<StreakConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeckleCloudConfig {
    pub count: Span<u32>,
    pub size: Span<i32>,
    /// Fill probability at the cloud centre, falling off linearly to the edge.
    pub density: f64,
    pub palette: PaletteSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobConfig {
    pub count: Span<u32>,
    pub radius: Span<i32>,
    pub alpha: Span<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NebulaConfig {
    pub octaves: Span<u8>,
    pub scale: f32,
    pub palette: PaletteSource,
    /// Normalized noise value above which the nebula shows.
    pub threshold: f32,
    pub alpha: Span<f32>,
    pub sparkle_probability: f64,
    pub sparkle_color: [u8; 3],
    pub clouds: Option<SpeckleCloudConfig>,
    pub blobs: Option<BlobConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub placement: PlacementConfig,
    pub palette: PaletteSource,
    pub octaves: Span<u8>,
    pub noise_scale: f32,
    pub style: DiscStyle,
    pub shadow: Option<ShadowConfig>,
    pub craters: Option<CraterConfig>,
    pub rim: Option<RimLightConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonLayer {
    pub orbit: MoonConfig,
    /// Palette the moons derive their colors from; `None` uses the planet's.
    pub palette: Option<PaletteSource>,
    pub style: DiscStyle,
}

/// Full description of a scene. Together with a seed it determines the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Logical canvas width in pixels.
    pub width: u32,
    /// Logical canvas height in pixels.
    pub height: u32,
    /// Upscale factor applied on export.
    pub block_size: u32,
    pub background: BackgroundConfig,
    pub stars: Option<StarConfig>,
    pub nebula: Option<NebulaConfig>,
    pub planets: PlanetConfig,
    pub rings: Option<RingConfig>,
    pub moons: Option<MoonLayer>,
    pub highlight: Option<HighlightConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::wallpaper()
    }
}

impl SceneConfig {
    /// Several ringed, cratered planets with moons over a bright nebula.
    pub fn wallpaper() -> Self {
        Self {
            width: 120,
            height: 90,
            block_size: 10,
            background: BackgroundConfig {
                style: BackgroundStyle::Gradient {
                    top: PaletteSource::Random {
                        bands: Span::fixed(1),
                        vibrance: 0.6,
                    },
                    bottom: PaletteSource::Random {
                        bands: Span::fixed(1),
                        vibrance: 0.58,
                    },
                },
                grain: Span::fixed(0),
                grain_octaves: 3,
            },
            stars: Some(StarConfig {
                density: 0.002,
                colors: vec![[255, 255, 255], [220, 230, 250], [120, 170, 255]],
                cross_probability: 0.09,
                burst_probability: 0.01,
                burst_size: Span::new(1, 3),
                clusters: None,
                streaks: None,
            }),
            nebula: Some(NebulaConfig {
                octaves: Span::new(2, 4),
                scale: 1.0,
                palette: PaletteSource::Random {
                    bands: Span::fixed(6),
                    vibrance: 0.85,
                },
                threshold: 0.62,
                alpha: Span::new(0.55, 0.66),
                sparkle_probability: 0.001,
                sparkle_color: [220, 130, 255],
                clouds: Some(SpeckleCloudConfig {
                    count: Span::new(6, 10),
                    size: Span::new(12, 49),
                    density: 0.77,
                    palette: PaletteSource::Random {
                        bands: Span::fixed(3),
                        vibrance: 0.65,
                    },
                }),
                blobs: None,
            }),
            planets: PlanetConfig {
                placement: PlacementConfig::default(),
                palette: PaletteSource::Random {
                    bands: Span::new(4, 8),
                    vibrance: 0.88,
                },
                octaves: Span::new(3, 5),
                noise_scale: 1.0,
                style: DiscStyle::default(),
                shadow: Some(ShadowConfig::default()),
                craters: Some(CraterConfig::default()),
                rim: None,
            },
            rings: Some(RingConfig::default()),
            moons: Some(MoonLayer {
                orbit: MoonConfig::default(),
                palette: Some(PaletteSource::Random {
                    bands: Span::new(2, 5),
                    vibrance: 0.81,
                }),
                style: DiscStyle::default(),
            }),
            highlight: Some(HighlightConfig::default()),
        }
    }

    /// A single large limb-darkened planet with a soft shadow and a few moons.
    pub fn lone_planet() -> Self {
        let rim = RimLightConfig {
            thickness: 2,
            color: [230, 230, 240],
            tint: 0.7,
        };
        Self {
            width: 300,
            height: 226,
            block_size: 3,
            background: BackgroundConfig {
                style: BackgroundStyle::Gradient {
                    top: PaletteSource::Range {
                        bands: Span::fixed(1),
                        low: 10,
                        high: 60,
                    },
                    bottom: PaletteSource::Range {
                        bands: Span::fixed(1),
                        low: 70,
                        high: 140,
                    },
                },
                grain: Span::new(8, 19),
                grain_octaves: 3,
            },
            stars: Some(StarConfig {
                density: 0.004,
                colors: vec![[255, 255, 255], [245, 220, 200], [220, 210, 250]],
                cross_probability: 0.14,
                burst_probability: 0.0,
                burst_size: Span::fixed(1),
                clusters: Some(StarClusterConfig {
                    count: Span::new(7, 12),
                    stars_per: 15,
                    spread: 8,
                    colors: vec![[255, 255, 255], [255, 240, 180], [210, 190, 255]],
                    twin_probability: 0.14,
                }),
                streaks: Some(StreakConfig {
                    count: Span::new(0, 2),
                    length: Span::new(6, 14),
                    color: [230, 230, 255],
                }),
            }),
            nebula: Some(NebulaConfig {
                octaves: Span::fixed(3),
                scale: 1.5,
                palette: PaletteSource::Range {
                    bands: Span::fixed(3),
                    low: 60,
                    high: 176,
                },
                threshold: 0.45,
                alpha: Span::fixed(0.24),
                sparkle_probability: 0.0,
                sparkle_color: [220, 130, 255],
                clouds: None,
                blobs: Some(BlobConfig {
                    count: Span::new(2, 4),
                    radius: Span::new(20, 60),
                    alpha: Span::new(0.08, 0.2),
                }),
            }),
            planets: PlanetConfig {
                placement: PlacementConfig {
                    count: Span::fixed(1),
                    radius: Span::new(40, 46),
                    edge_margin: 50,
                    spacing: 0,
                    attempts_per_disc: 40,
                },
                palette: PaletteSource::Gradient {
                    bands: 11,
                    step: 19,
                    base: Span::new(85, 155),
                    limb_darkening: true,
                },
                octaves: Span::fixed(4),
                noise_scale: 3.0,
                style: DiscStyle {
                    weights: ShadingWeights { radial: 0.6 },
                    effects: SurfaceEffects {
                        terminator: Some(TerminatorConfig {
                            epsilon: 0.05,
                            mix: 0.6,
                        }),
                        craters: Some(SpeckleConfig {
                            threshold: -0.3,
                            radial_cutoff: 0.88,
                            color: [40, 44, 55],
                        }),
                        spots: Some(SpeckleConfig {
                            threshold: 0.45,
                            radial_cutoff: 0.73,
                            color: [230, 230, 255],
                        }),
                        flecks: None,
                    },
                },
                shadow: Some(ShadowConfig {
                    style: ShadowStyle::Soft { offset: [10, -5] },
                    color: [0, 0, 0],
                    alpha: Span::fixed(0.24),
                }),
                craters: Some(CraterConfig {
                    count: Span::new(12, 18),
                    radius: Span::new(3, 5),
                    distance: Span::new(0.19, 0.89),
                    color: [60, 60, 64],
                    alpha: 0.7,
                }),
                rim: Some(rim),
            },
            rings: None,
            moons: Some(MoonLayer {
                orbit: MoonConfig {
                    count: Span::new(2, 4),
                    radius: Span::new(5, 9),
                    gap: Span::new(13, 25),
                    angle: Span::new(-45.0, 45.0),
                    bands: Span::new(2, 4),
                    jitter: 20,
                    octaves: Span::fixed(3),
                    noise_scale: 2.0,
                    shadow_alpha: Some(Span::new(0.2, 0.35)),
                    rim: Some(RimLightConfig { thickness: 1, ..rim }),
                },
                palette: None,
                style: DiscStyle {
                    effects: SurfaceEffects {
                        flecks: None,
                        spots: None,
                        ..SurfaceEffects::default()
                    },
                    ..DiscStyle::default()
                },
            }),
            highlight: Some(HighlightConfig {
                start_deg: 70.0,
                end_deg: 112.0,
                divisors: Span::new(2, 6),
                color: Some([250, 250, 240]),
            }),
        }
    }

    /// Flat radially-shaded planets and rings drawn from one preset palette.
    pub fn palette_system(kind: PaletteKind) -> Self {
        Self {
            width: 100,
            height: 69,
            block_size: 8,
            background: BackgroundConfig {
                style: BackgroundStyle::Preset { palette: kind },
                grain: Span::fixed(0),
                grain_octaves: 3,
            },
            stars: Some(StarConfig {
                density: 0.001,
                colors: vec![[255, 255, 255]],
                cross_probability: 0.0,
                burst_probability: 0.0,
                burst_size: Span::fixed(1),
                clusters: None,
                streaks: None,
            }),
            nebula: None,
            planets: PlanetConfig {
                placement: PlacementConfig {
                    count: Span::fixed(3),
                    radius: Span::new(10, 20),
                    edge_margin: 2,
                    spacing: 6,
                    attempts_per_disc: 20,
                },
                palette: PaletteSource::Preset { palette: kind },
                octaves: Span::fixed(1),
                noise_scale: 1.0,
                style: DiscStyle {
                    weights: ShadingWeights::radial_only(),
                    effects: SurfaceEffects {
                        terminator: Some(TerminatorConfig {
                            epsilon: 0.08,
                            mix: 0.8,
                        }),
                        ..SurfaceEffects::none()
                    },
                },
                shadow: None,
                craters: None,
                rim: None,
            },
            rings: Some(RingConfig {
                probability: 0.5,
                count: Span::new(1, 3),
                spacing: Span::fixed(3),
                fade: Span::fixed(15),
                angle_step: 2.0,
                wave_amplitude: 0.0,
                wave_frequency: 0.0,
                thicken_probability: 0.0,
            }),
            moons: None,
            highlight: None,
        }
    }

    /// Looks a preset up by its CLI name.
    pub fn preset(name: &str, kind: PaletteKind) -> Option<Self> {
        match name {
            "wallpaper" => Some(Self::wallpaper()),
            "lone-planet" | "lone_planet" => Some(Self::lone_planet()),
            "palette-system" | "palette_system" => Some(Self::palette_system(kind)),
            _ => None,
        }
    }

    /// Output resolution after upscaling.
    pub fn output_size(&self) -> (u32, u32) {
        (self.width * self.block_size, self.height * self.block_size)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: SceneConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every value the renderer cannot clamp on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > 8192 || self.height > 8192 {
            return Err(ConfigError::Invalid(format!(
                "canvas {}x{} exceeds 8192 pixels per side",
                self.width, self.height
            )));
        }
        if !(1..=64).contains(&self.block_size) {
            return Err(ConfigError::Invalid(format!(
                "block_size must be in 1..=64, got {}",
                self.block_size
            )));
        }

        match &self.background.style {
            BackgroundStyle::Gradient { top, bottom } => {
                top.validate("background.top")?;
                bottom.validate("background.bottom")?;
            }
            BackgroundStyle::Preset { .. } => {}
            BackgroundStyle::Stripes { bands, palette } => {
                check_min("background.bands", *bands, 1)?;
                palette.validate("background.palette")?;
            }
        }

        if let Some(stars) = &self.stars {
            if !stars.density.is_finite() || stars.density < 0.0 || stars.density > 1.0 {
                return Err(ConfigError::Invalid(format!(
                    "stars.density must be in [0, 1], got {}",
                    stars.density
                )));
            }
            if stars.colors.is_empty() {
                return Err(ConfigError::Invalid("stars.colors must not be empty".into()));
            }
            check_probability("stars.cross_probability", stars.cross_probability)?;
            check_probability("stars.burst_probability", stars.burst_probability)?;
            if let Some(clusters) = &stars.clusters {
                if clusters.colors.is_empty() {
                    return Err(ConfigError::Invalid(
                        "stars.clusters.colors must not be empty".into(),
                    ));
                }
                check_probability("stars.clusters.twin_probability", clusters.twin_probability)?;
            }
        }

        if let Some(nebula) = &self.nebula {
            nebula.palette.validate("nebula.palette")?;
            check_unit_span("nebula.alpha", nebula.alpha)?;
            check_probability("nebula.sparkle_probability", nebula.sparkle_probability)?;
            if let Some(clouds) = &nebula.clouds {
                check_probability("nebula.clouds.density", clouds.density)?;
                clouds.palette.validate("nebula.clouds.palette")?;
            }
            if let Some(blobs) = &nebula.blobs {
                check_unit_span("nebula.blobs.alpha", blobs.alpha)?;
            }
        }

        let planets = &self.planets;
        check_min("planets.placement.radius", planets.placement.radius.ordered().0, 1)?;
        check_min("planets.placement.attempts_per_disc", planets.placement.attempts_per_disc, 1)?;
        planets.palette.validate("planets.palette")?;
        check_style("planets.style", &planets.style)?;
        if let Some(shadow) = &planets.shadow {
            check_unit_span("planets.shadow.alpha", shadow.alpha)?;
        }
        if let Some(craters) = &planets.craters {
            check_unit("planets.craters.alpha", craters.alpha)?;
        }

        if let Some(rings) = &self.rings {
            check_probability("rings.probability", rings.probability)?;
            check_probability("rings.thicken_probability", rings.thicken_probability)?;
            let (_, most) = rings.count.ordered();
            if most > MAX_RINGS {
                return Err(ConfigError::Invalid(format!(
                    "rings.count must be at most {MAX_RINGS}, got {most}"
                )));
            }
            if !rings.angle_step.is_finite() || rings.angle_step <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "rings.angle_step must be positive, got {}",
                    rings.angle_step
                )));
            }
        }

        if let Some(moons) = &self.moons {
            check_min("moons.orbit.radius", moons.orbit.radius.ordered().0, 1)?;
            check_min("moons.orbit.bands", moons.orbit.bands.ordered().0, 1)?;
            if let Some(alpha) = moons.orbit.shadow_alpha {
                check_unit_span("moons.orbit.shadow_alpha", alpha)?;
            }
            if let Some(palette) = &moons.palette {
                palette.validate("moons.palette")?;
            }
            check_style("moons.style", &moons.style)?;
        }

        Ok(())
    }
}

fn check_min<T: PartialOrd + std::fmt::Display>(field: &str, value: T, min: T) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::Invalid(format!(
            "{field} must be at least {min}, got {value}"
        )));
    }
    Ok(())
}

fn check_unit(field: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{field} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn check_unit_span(field: &str, span: Span<f32>) -> Result<(), ConfigError> {
    check_unit(field, span.min)?;
    check_unit(field, span.max)
}

fn check_probability(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{field} must be a probability in [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn check_style(field: &str, style: &DiscStyle) -> Result<(), ConfigError> {
    check_unit(&format!("{field}.weights.radial"), style.weights.radial)?;
    if let Some(FleckConfig { probability, .. }) = style.effects.flecks {
        check_probability(&format!("{field}.effects.flecks.probability"), probability)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tempfile::tempdir;

    #[test]
    fn test_presets_validate() {
        SceneConfig::wallpaper().validate().unwrap();
        SceneConfig::lone_planet().validate().unwrap();
        for kind in PaletteKind::all() {
            SceneConfig::palette_system(kind).validate().unwrap();
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert!(SceneConfig::preset("wallpaper", PaletteKind::Red).is_some());
        assert!(SceneConfig::preset("lone-planet", PaletteKind::Red).is_some());
        let system = SceneConfig::preset("palette-system", PaletteKind::Blue).unwrap();
        assert_eq!(
            system.background.style,
            BackgroundStyle::Preset {
                palette: PaletteKind::Blue
            }
        );
        assert!(SceneConfig::preset("nope", PaletteKind::Red).is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scene.json");
        let config = SceneConfig::lone_planet();
        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = SceneConfig::wallpaper();
        config.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::wallpaper();
        config.block_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::wallpaper();
        config.planets.placement.radius = Span::new(0, 10);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::wallpaper();
        if let Some(shadow) = config.planets.shadow.as_mut() {
            shadow.alpha = Span::new(0.2, 1.5);
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("planets.shadow.alpha"));

        let mut config = SceneConfig::wallpaper();
        if let Some(rings) = config.rings.as_mut() {
            rings.count = Span::new(2, u32::MAX);
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rings.count"));
    }

    #[test]
    fn test_load_rejects_bad_input() {
        let dir = tempdir().unwrap();
        let missing = SceneConfig::load(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(SceneConfig::load(&path), Err(ConfigError::Json(_))));

        let mut config = SceneConfig::wallpaper();
        config.height = 0;
        fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert!(matches!(SceneConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_gradient_source_limb_darkening() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let source = PaletteSource::Gradient {
            bands: 5,
            step: 10,
            base: Span::fixed(100),
            limb_darkening: true,
        };
        let palette = source.resolve(&mut rng);
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.first(), crate::color::rgb(100, 100, 100));
        assert_eq!(palette.last(), crate::color::rgb(60, 60, 60));
    }
}
