//! Planet rendering: banded discs, shadows, rings, craters, moons and
//! non-overlapping placement.

mod config;
mod craters;
mod disc;
mod moons;
mod placement;
mod ring;
mod shadow;

pub use config::{
    CraterConfig, DiscStyle, FleckConfig, HighlightConfig, MoonConfig, PlacementConfig,
    RimLightConfig, RingConfig, ShadingWeights, ShadowConfig, ShadowSide, ShadowStyle,
    SpeckleConfig, SurfaceEffects, TerminatorConfig,
};
pub(crate) use config::to_color;
pub use craters::draw_craters;
pub use disc::{band_index, rasterize_disc, Disc};
pub use moons::place_moons;
pub use placement::{place_discs, DiscPlacement};
pub use ring::{draw_rings, highlight_arc, rim_light};
pub use shadow::{apply_half_shadow, apply_soft_shadow};
