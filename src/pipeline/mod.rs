//! Pipeline module for orchestrating scene stages.
//!
//! Provides a trait-based architecture for drawing passes that are
//! composed, in a fixed order, into a complete scene.

mod stage;
mod state;

pub use stage::{
    render_scene, BackgroundStage, HighlightStage, MoonStage, NebulaStage, Pipeline,
    PipelineError, PlanetStage, RingStage, SceneStage, StageId, StarfieldStage,
};
pub use state::{PlanetRecord, Scene};
