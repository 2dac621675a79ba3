//! Model viewer toolkit
//!
//! Headless front end for the library: loads OBJ models in the background,
//! builds noise terrain and reports which octants a camera can see.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use glam::Vec3;

use objview::constants::DEFAULT_SETTINGS_FILE;
use objview::render::mesh_loader::{LoadEvent, LoadStatus, MeshLoader};
use objview::utils::settings::{ViewerSettings, load_or_default, save_settings};
use objview::{Camera, CoherentNoise, ParticleField, TerrainGrid};

/// OBJ model viewer tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (bincode); defaults are used when it is missing
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Write the effective settings back to the settings file
    #[arg(long, default_value_t = false)]
    save_settings: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a model on the background loader and report the result
    Load {
        model: PathBuf,
        /// Companion texture image
        #[arg(long)]
        texture: Option<PathBuf>,
    },
    /// Generate a terrain plane with a noise height map
    Terrain {
        #[arg(long)]
        seed: Option<i32>,
        #[arg(long)]
        octaves: Option<u32>,
        #[arg(long)]
        persistence: Option<f64>,
        #[arg(long)]
        frequency: Option<f64>,
        #[arg(long)]
        amplitude: Option<f64>,
        /// Also scatter the particle field above the terrain
        #[arg(long, default_value_t = false)]
        particles: bool,
    },
    /// Print the octants visible from a camera
    Cull {
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_hyphen_values = true)]
        pos: Option<Vec<f32>>,
        #[arg(long, default_value_t = 180.0, allow_hyphen_values = true)]
        yaw: f32,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pitch: f32,
        #[arg(long)]
        cube_size: Option<f32>,
        #[arg(long, default_value_t = 1.0)]
        aspect: f32,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut settings = load_or_default(&args.settings);

    let code = match args.command {
        Command::Load { model, texture } => run_load(&settings, model, texture),
        Command::Terrain {
            seed,
            octaves,
            persistence,
            frequency,
            amplitude,
            particles,
        } => {
            let noise = &mut settings.terrain.noise;
            if let Some(seed) = seed {
                noise.seed = seed;
            }
            if let Some(octaves) = octaves {
                noise.octaves = octaves;
            }
            if let Some(persistence) = persistence {
                noise.persistence = persistence;
            }
            if let Some(frequency) = frequency {
                noise.frequency = frequency;
            }
            if let Some(amplitude) = amplitude {
                noise.amplitude = amplitude;
            }
            run_terrain(&settings, particles)
        }
        Command::Cull {
            pos,
            yaw,
            pitch,
            cube_size,
            aspect,
        } => {
            if let Some(size) = cube_size {
                settings.culling.cube_size = size;
            }
            let position = pos.map(|p| Vec3::new(p[0], p[1], p[2])).unwrap_or(Vec3::ZERO);
            run_cull(&settings, position, yaw, pitch, aspect)
        }
    };

    if args.save_settings {
        if let Err(e) = save_settings(&args.settings, &settings) {
            tracing::error!("Failed to save settings: {}", e);
            return ExitCode::FAILURE;
        }
        tracing::info!("Settings saved to {}", args.settings.display());
    }
    code
}

fn run_load(settings: &ViewerSettings, model: PathBuf, texture: Option<PathBuf>) -> ExitCode {
    let mut loader = MeshLoader::new();
    if let Err(e) = loader.load(model, texture) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let timeout = Duration::from_secs(settings.loader.result_timeout_secs);
    let result = loop {
        match loader.wait_event(timeout) {
            Some(LoadEvent::Progress(p)) => println!("progress: {}%", p),
            Some(LoadEvent::Finished(result)) => break result,
            None => {
                loader.stop_loading();
                eprintln!("load timed out after {}s", timeout.as_secs());
                return ExitCode::FAILURE;
            }
        }
    };

    for warning in &result.warnings {
        println!("{}", warning);
    }
    match result.status {
        LoadStatus::Success => {
            if let Some(model) = loader.current_model() {
                let mesh = &model.mesh;
                println!(
                    "loaded {} positions, {} texcoords, {} normals, {} triangles",
                    mesh.positions.len(),
                    mesh.texcoords.len(),
                    mesh.normals.len(),
                    mesh.triangle_count()
                );
                if let Some(tex) = &model.texture {
                    println!("texture {}x{} ({} bytes)", tex.width, tex.height, tex.byte_len());
                }
            }
            ExitCode::SUCCESS
        }
        LoadStatus::Failed => {
            eprintln!("{}", result.message);
            ExitCode::FAILURE
        }
        LoadStatus::Cancelled => {
            eprintln!("load cancelled");
            ExitCode::FAILURE
        }
    }
}

fn run_terrain(settings: &ViewerSettings, with_particles: bool) -> ExitCode {
    let terrain = &settings.terrain;
    let mut grid = match TerrainGrid::generate_plane(terrain.plane_size, terrain.plane_size, terrain.cell_size) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let noise = CoherentNoise::new(terrain.noise);
    grid.apply_height_map(&noise);

    println!(
        "terrain {}x{} vertices, {} strip indices",
        grid.cols,
        grid.rows,
        grid.indices.len()
    );
    if let Some((lo, hi)) = grid.height_range() {
        println!("height range {:.3} .. {:.3}", lo, hi);
    }

    if with_particles {
        let field = ParticleField::generate(&settings.particles);
        println!("{} particles in a cube of {}", field.len(), field.cube_size);
    }
    ExitCode::SUCCESS
}

fn run_cull(settings: &ViewerSettings, position: Vec3, yaw: f32, pitch: f32, aspect: f32) -> ExitCode {
    let mut camera = Camera::from_settings(&settings.camera);
    camera.position = position;
    camera.set_angles(yaw, pitch);

    let cube_size = settings.culling.cube_size;
    let octants = camera.visible_octants(aspect, cube_size);
    let mask = camera.visible_octant_mask(aspect, cube_size);

    println!("direction {:?}", camera.direction);
    println!("visible octants {:?}", octants);
    println!("mask {:#010b}", mask);
    ExitCode::SUCCESS
}
