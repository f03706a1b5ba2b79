//! Pixelspace CLI - Procedural pixel-art space scene generator.
//!
//! Renders gradient skies, starfields, nebulae, banded planets, rings and
//! moons on a low-resolution canvas and writes them upscaled to PNG.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use pixelspace::color::PaletteKind;
use pixelspace::export::{export_named_png, PngExportOptions};
use pixelspace::pipeline::{Pipeline, Scene};
use pixelspace::scene::SceneConfig;
use pixelspace::span::Span;

/// Procedural pixel-art space scene generator.
#[derive(Parser)]
#[command(name = "pixelspace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one or more scenes and write them as PNG.
    Generate {
        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "space")]
        name: String,

        /// Scene preset.
        #[arg(short, long, default_value = "wallpaper")]
        preset: Preset,

        /// Palette used by the palette-system preset (red, purple, blue, dark_brown).
        #[arg(long, default_value = "purple")]
        palette: PaletteKind,

        /// Logical canvas width, overriding the preset.
        #[arg(long)]
        width: Option<u32>,

        /// Logical canvas height, overriding the preset.
        #[arg(long)]
        height: Option<u32>,

        /// Upscale factor on export, overriding the preset.
        #[arg(long)]
        block_size: Option<u32>,

        /// Exact number of planets to attempt, overriding the preset.
        #[arg(long)]
        planets: Option<u32>,

        /// Number of images to generate; image `i` uses seed + i.
        #[arg(short, long, default_value = "1")]
        count: u32,

        /// Load the scene configuration from a JSON file instead of a preset.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the resolved configuration as JSON and exit.
        #[arg(long)]
        dump_config: bool,
    },

    /// Display information about a scene configuration.
    Info {
        /// Scene preset.
        #[arg(short, long, default_value = "wallpaper")]
        preset: Preset,

        /// Palette used by the palette-system preset.
        #[arg(long, default_value = "purple")]
        palette: PaletteKind,
    },

    /// List the built-in palettes.
    Palettes,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Several ringed planets with moons over a nebula.
    Wallpaper,
    /// One large planet with a soft shadow and a few moons.
    LonePlanet,
    /// Flat planets and rings drawn from one preset palette.
    PaletteSystem,
}

impl Preset {
    fn config(self, palette: PaletteKind) -> SceneConfig {
        match self {
            Preset::Wallpaper => SceneConfig::wallpaper(),
            Preset::LonePlanet => SceneConfig::lone_planet(),
            Preset::PaletteSystem => SceneConfig::palette_system(palette),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Preset::Wallpaper => "wallpaper",
            Preset::LonePlanet => "lone-planet",
            Preset::PaletteSystem => "palette-system",
        }
    }
}

struct GenerateArgs {
    seed: Option<u64>,
    output: PathBuf,
    name: String,
    preset: Preset,
    palette: PaletteKind,
    width: Option<u32>,
    height: Option<u32>,
    block_size: Option<u32>,
    planets: Option<u32>,
    count: u32,
    config: Option<PathBuf>,
    dump_config: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            seed,
            output,
            name,
            preset,
            palette,
            width,
            height,
            block_size,
            planets,
            count,
            config,
            dump_config,
        } => {
            run_generate(GenerateArgs {
                seed,
                output,
                name,
                preset,
                palette,
                width,
                height,
                block_size,
                planets,
                count,
                config,
                dump_config,
            });
        }
        Commands::Info { preset, palette } => {
            run_info(preset, palette);
        }
        Commands::Palettes => {
            run_palettes();
        }
    }
}

fn run_generate(args: GenerateArgs) {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error: failed to load {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => args.preset.config(args.palette),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(block_size) = args.block_size {
        config.block_size = block_size;
    }
    if let Some(planets) = args.planets {
        config.planets.placement.count = Span::fixed(planets);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if args.count == 0 {
        eprintln!("Error: Count must be at least 1");
        std::process::exit(1);
    }

    if args.dump_config {
        match config.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Generate seed if not provided
    let seed = args.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let (out_w, out_h) = config.output_size();
    println!("Pixelspace - Procedural Space Scene Generator");
    println!("=============================================");
    match &args.config {
        Some(path) => println!("Config: {}", path.display()),
        None => println!("Preset: {}", args.preset.name()),
    }
    println!("Canvas: {}x{} (block size {})", config.width, config.height, config.block_size);
    println!("Output: {}x{} -> {}", out_w, out_h, args.output.display());
    println!("Seed: {}", seed);

    let pipeline = Pipeline::standard(config.clone());
    let options = PngExportOptions::with_scale(config.block_size);
    let start = Instant::now();

    for i in 0..args.count {
        let image_seed = seed.wrapping_add(i as u64);
        let file_name = if args.count > 1 {
            format!("{}_{}", args.name, i + 1)
        } else {
            args.name.clone()
        };

        println!("\nRendering {} (seed {})...", file_name, image_seed);
        let mut scene = Scene::for_config(&config, image_seed);
        pipeline
            .run_with_callbacks(
                &mut scene,
                |name, i, total| {
                    println!("  [{}/{}] Starting: {}", i + 1, total, name);
                },
                |name, i, total| {
                    println!("  [{}/{}] Completed: {}", i + 1, total, name);
                },
            )
            .unwrap_or_else(|e| {
                eprintln!("Error during generation: {}", e);
                std::process::exit(1);
            });

        println!(
            "  Planets: {}, moons: {}",
            scene.planets.len(),
            scene.moons.len()
        );

        match export_named_png(&scene.canvas, &args.output, &file_name, &options) {
            Ok(path) => println!("  Saved: {}", path.display()),
            Err(e) => {
                eprintln!("Error exporting PNG: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!("\nGeneration completed in {:.2?}", start.elapsed());
}

fn run_info(preset: Preset, palette: PaletteKind) {
    let config = preset.config(palette);
    let pipeline = Pipeline::standard(config.clone());
    let (out_w, out_h) = config.output_size();

    let canvas_pixels = config.width as u64 * config.height as u64;
    let output_pixels = out_w as u64 * out_h as u64;
    let bytes_canvas = canvas_pixels * 3; // RGB8
    let bytes_output = output_pixels * 3;
    let bytes_noise_grid = canvas_pixels * 4; // f32

    println!("Pixelspace - Scene Configuration Info");
    println!("=====================================");
    println!();
    println!("Preset: {}", preset.name());
    println!("Canvas: {}x{}", config.width, config.height);
    println!("Block size: {}", config.block_size);
    println!("Output: {}x{}", out_w, out_h);
    println!();
    println!("Pixel counts:");
    println!("  Canvas:    {:>12} pixels", canvas_pixels);
    println!("  Output:    {:>12} pixels", output_pixels);
    println!();
    println!("Memory usage (in-memory):");
    println!("  Canvas:          {:>12} bytes ({:.2} MB)", bytes_canvas, bytes_canvas as f64 / 1024.0 / 1024.0);
    println!("  Noise grid:      {:>12} bytes ({:.2} MB)", bytes_noise_grid, bytes_noise_grid as f64 / 1024.0 / 1024.0);
    println!("  Upscaled image:  {:>12} bytes ({:.2} MB)", bytes_output, bytes_output as f64 / 1024.0 / 1024.0);
    println!();
    println!("Stages:");
    for (i, id) in pipeline.stage_ids().iter().enumerate() {
        println!("  {}. {}", i + 1, id.name());
    }
}

fn run_palettes() {
    println!("Built-in palettes:");
    for kind in PaletteKind::all() {
        let swatches: Vec<String> = kind
            .palette()
            .colors()
            .iter()
            .map(|c| format!("#{:02x}{:02x}{:02x}", c.0[0], c.0[1], c.0[2]))
            .collect();
        println!("  {:<11} {}", kind.name(), swatches.join(" "));
    }
}
