//! Scene stage trait and pipeline orchestration.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use super::state::{PlanetRecord, Scene};
use crate::color::lerp;
use crate::noise::{FractalNoise, FractalNoiseConfig};
use crate::planet::{
    apply_half_shadow, apply_soft_shadow, draw_craters, draw_rings, highlight_arc, place_discs,
    place_moons, rasterize_disc, rim_light, to_color, Disc, ShadowStyle,
};
use crate::scene::{paint_background, paint_nebula, paint_starfield, SceneConfig};

/// Unique identifier for scene stages.
///
/// The declaration order is the drawing order: a pipeline never runs a
/// stage after one that is declared later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageId {
    /// Sky fill and grain.
    Background,
    /// Scattered stars, clusters and streaks.
    Stars,
    /// Noise clouds, speckle clouds and blobs.
    Nebula,
    /// Placement, shading, shadows and craters of every planet.
    Planets,
    /// Rings around planets.
    Rings,
    /// Moons around planets.
    Moons,
    /// Highlights drawn over finished planets.
    PostEffects,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Background => "background",
            StageId::Stars => "stars",
            StageId::Nebula => "nebula",
            StageId::Planets => "planets",
            StageId::Rings => "rings",
            StageId::Moons => "moons",
            StageId::PostEffects => "post-effects",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error("Out of order: stage '{0}' cannot run after '{1}'")]
    OutOfOrder(String, String),
}

/// Trait for implementing scene stages.
///
/// Each stage draws onto the scene canvas, building upon previous stages.
pub trait SceneStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage, modifying the scene in place.
    fn execute(&self, scene: &mut Scene, config: &SceneConfig) -> Result<(), PipelineError>;
}

/// Orchestrates scene stages into a complete image.
pub struct Pipeline {
    stages: Vec<Box<dyn SceneStage>>,
    config: SceneConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: SceneConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Creates a pipeline with one stage per enabled section of `config`.
    pub fn standard(config: SceneConfig) -> Self {
        let stars = config.stars.is_some();
        let nebula = config.nebula.is_some();
        let rings = config.rings.is_some();
        let moons = config.moons.is_some();
        let highlight = config.highlight.is_some();

        let mut pipeline = Self::new(config);
        pipeline.add_stage(BackgroundStage);
        if stars {
            pipeline.add_stage(StarfieldStage);
        }
        if nebula {
            pipeline.add_stage(NebulaStage);
        }
        pipeline.add_stage(PlanetStage);
        if rings {
            pipeline.add_stage(RingStage);
        }
        if moons {
            pipeline.add_stage(MoonStage);
        }
        if highlight {
            pipeline.add_stage(HighlightStage);
        }
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: SceneStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the stage IDs in execution order.
    pub fn stage_ids(&self) -> Vec<StageId> {
        self.stages.iter().map(|s| s.id()).collect()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Executes all stages in order on the given scene.
    pub fn run(&self, scene: &mut Scene) -> Result<(), PipelineError> {
        self.run_with_callbacks(scene, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `scene` - The scene to draw into
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        scene: &mut Scene,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            if let Some(last) = completed.last() {
                if stage.id() < *last {
                    return Err(PipelineError::OutOfOrder(
                        stage.name().to_string(),
                        last.name().to_string(),
                    ));
                }
            }

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            stage.execute(scene, &self.config)?;
            completed.push(stage.id());
            info!(stage = stage.id().name(), "stage complete");

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Builds and runs the standard pipeline for `config`.
pub fn render_scene(config: &SceneConfig, seed: u64) -> Result<Scene, PipelineError> {
    let mut scene = Scene::for_config(config, seed);
    Pipeline::standard(config.clone()).run(&mut scene)?;
    Ok(scene)
}

fn missing_section(stage: &str, section: &str) -> PipelineError {
    PipelineError::StageFailed(stage.to_string(), format!("no `{section}` section in config"))
}

/// Background fill stage.
pub struct BackgroundStage;

impl SceneStage for BackgroundStage {
    fn id(&self) -> StageId {
        StageId::Background
    }

    fn name(&self) -> &str {
        "Background"
    }

    fn execute(&self, scene: &mut Scene, config: &SceneConfig) -> Result<(), PipelineError> {
        paint_background(&mut scene.canvas, &mut scene.rng, &config.background);
        Ok(())
    }
}

/// Starfield stage.
pub struct StarfieldStage;

impl SceneStage for StarfieldStage {
    fn id(&self) -> StageId {
        StageId::Stars
    }

    fn name(&self) -> &str {
        "Starfield"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Background]
    }

    fn execute(&self, scene: &mut Scene, config: &SceneConfig) -> Result<(), PipelineError> {
        let stars = config
            .stars
            .as_ref()
            .ok_or_else(|| missing_section(self.name(), "stars"))?;
        paint_starfield(&mut scene.canvas, &mut scene.rng, stars);
        Ok(())
    }
}

/// Nebula stage.
pub struct NebulaStage;

impl SceneStage for NebulaStage {
    fn id(&self) -> StageId {
        StageId::Nebula
    }

    fn name(&self) -> &str {
        "Nebula"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Background]
    }

    fn execute(&self, scene: &mut Scene, config: &SceneConfig) -> Result<(), PipelineError> {
        let nebula = config
            .nebula
            .as_ref()
            .ok_or_else(|| missing_section(self.name(), "nebula"))?;
        paint_nebula(&mut scene.canvas, &mut scene.rng, nebula);
        Ok(())
    }
}

/// Places and shades every planet, then applies its shadow, craters and
/// rim light.
pub struct PlanetStage;

impl SceneStage for PlanetStage {
    fn id(&self) -> StageId {
        StageId::Planets
    }

    fn name(&self) -> &str {
        "Planets"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Background]
    }

    fn execute(&self, scene: &mut Scene, config: &SceneConfig) -> Result<(), PipelineError> {
        let Scene {
            canvas,
            rng,
            planets,
            ..
        } = scene;
        let cfg = &config.planets;
        let placements = place_discs(rng, canvas.width(), canvas.height(), &cfg.placement);

        for placement in placements {
            let palette = cfg.palette.resolve(rng);
            let octaves = cfg.octaves.sample(rng);
            let noise = FractalNoise::new(FractalNoiseConfig::planet_surface(octaves, rng.random()));
            let disc = Disc::new(placement, &palette, &noise).with_noise_scale(cfg.noise_scale);
            let written = rasterize_disc(canvas, &disc, &cfg.style, rng);

            if let Some(shadow) = &cfg.shadow {
                let alpha = shadow.alpha.sample(rng);
                let shade = to_color(shadow.color);
                match shadow.style {
                    ShadowStyle::HalfDisc { side } => {
                        apply_half_shadow(canvas, &placement, side, shade, alpha);
                    }
                    ShadowStyle::Soft { offset } => {
                        apply_soft_shadow(canvas, &placement, (offset[0], offset[1]), shade, alpha);
                    }
                }
            }
            if let Some(craters) = &cfg.craters {
                draw_craters(canvas, rng, &placement, craters);
            }
            if let Some(rim) = &cfg.rim {
                let color = lerp(palette.last(), to_color(rim.color), rim.tint);
                rim_light(canvas, &placement, color, rim.thickness);
            }

            debug!(
                cx = placement.cx,
                cy = placement.cy,
                radius = placement.radius,
                bands = palette.len(),
                written,
                "drew planet"
            );
            planets.push(PlanetRecord { placement, palette });
        }
        Ok(())
    }
}

/// Rings around planets.
pub struct RingStage;

impl SceneStage for RingStage {
    fn id(&self) -> StageId {
        StageId::Rings
    }

    fn name(&self) -> &str {
        "Rings"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Planets]
    }

    fn execute(&self, scene: &mut Scene, config: &SceneConfig) -> Result<(), PipelineError> {
        let rings = config
            .rings
            .as_ref()
            .ok_or_else(|| missing_section(self.name(), "rings"))?;
        let Scene {
            canvas,
            rng,
            planets,
            ..
        } = scene;

        for planet in planets.iter() {
            if rings.probability > 0.0 && rng.random_bool(rings.probability.min(1.0)) {
                draw_rings(canvas, rng, &planet.placement, planet.palette.last(), rings);
            }
        }
        Ok(())
    }
}

/// Moons around planets.
pub struct MoonStage;

impl SceneStage for MoonStage {
    fn id(&self) -> StageId {
        StageId::Moons
    }

    fn name(&self) -> &str {
        "Moons"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Planets]
    }

    fn execute(&self, scene: &mut Scene, config: &SceneConfig) -> Result<(), PipelineError> {
        let layer = config
            .moons
            .as_ref()
            .ok_or_else(|| missing_section(self.name(), "moons"))?;
        let Scene {
            canvas,
            rng,
            planets,
            moons,
            ..
        } = scene;

        for planet in planets.iter() {
            let base = match &layer.palette {
                Some(source) => source.resolve(rng),
                None => planet.palette.clone(),
            };
            let placed = place_moons(canvas, rng, &planet.placement, &base, &layer.orbit, &layer.style);
            moons.extend(placed);
        }
        debug!(moons = moons.len(), "drew moons");
        Ok(())
    }
}

/// Highlight arcs over finished planets.
pub struct HighlightStage;

impl SceneStage for HighlightStage {
    fn id(&self) -> StageId {
        StageId::PostEffects
    }

    fn name(&self) -> &str {
        "Highlights"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Planets]
    }

    fn execute(&self, scene: &mut Scene, config: &SceneConfig) -> Result<(), PipelineError> {
        let highlight = config
            .highlight
            .as_ref()
            .ok_or_else(|| missing_section(self.name(), "highlight"))?;
        let Scene {
            canvas,
            rng,
            planets,
            ..
        } = scene;

        for planet in planets.iter() {
            let color = match highlight.color {
                Some(c) => to_color(c),
                None => planet.palette.choose(rng),
            };
            highlight_arc(canvas, &planet.placement, color, highlight);
        }
        Ok(())
    }
}
