//! Scene backdrop passes and the scene configuration tree.

mod background;
mod config;
mod nebula;
mod stars;

pub use background::{apply_grain, paint_background, paint_gradient, paint_palette_ramp, paint_stripes, ramp_color};
pub use config::{
    BackgroundConfig, BackgroundStyle, BlobConfig, ConfigError, MoonLayer, NebulaConfig,
    PaletteSource, PlanetConfig, SceneConfig, SpeckleCloudConfig, StarClusterConfig, StarConfig,
    StreakConfig,
};
pub use nebula::{paint_blobs, paint_nebula, paint_noise_cloud, paint_speckle_clouds};
pub use stars::{draw_star_clusters, draw_streaks, paint_starfield, scatter_stars};
