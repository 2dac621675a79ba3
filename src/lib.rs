// Core module with geometry types
pub mod core;

// Player module with camera and input
pub mod player;

// Render module with loading and culling
pub mod render;

// World module with noise, terrain and particles
pub mod world;

// Other modules
pub mod constants;
pub mod error;
pub mod utils;

// Re-exports
pub use crate::core::{Face, FaceIndex, GpuBuffers, GpuVertex, MeshData, TexCoord2, Vertex3};
pub use error::{LoadError, ParseErrorKind, SettingsError, TerrainError};
pub use player::{Camera, InputState, MoveDir};
pub use render::{
    FaceIndexResolver, Frustum, LoadEvent, LoadResult, LoadStatus, MeshLoader, get_intersections,
    get_intersections_as_int, load_texture,
};
pub use utils::{ViewerSettings, load_settings, save_settings};
pub use world::{CoherentNoise, NoiseParameters, ParticleConfig, ParticleField, TerrainGrid};
