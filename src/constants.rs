// Camera constants
pub const CAMERA_MOVE_SPEED: f32 = 0.1; // world units per millisecond
pub const CAMERA_DEFAULT_H_ANGLE: f32 = 180.0;
pub const CAMERA_DEFAULT_V_ANGLE: f32 = 0.0;
pub const CAMERA_MAX_PITCH: f32 = 90.0;
pub const CAMERA_DEFAULT_FOV: f32 = 60.0;
pub const CAMERA_MIN_FOV: f32 = 10.0;
pub const CAMERA_MAX_FOV: f32 = 90.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 800.0;

// Frustum culling constants
pub const OCTANT_COUNT: usize = 8;
pub const OCTANT_SHRINK: f32 = 0.1;

// Mesh loading constants
pub const PROGRESS_DONE: u8 = 100;
pub const PROGRESS_CAP: u8 = 99;

// Terrain constants
pub const DEFAULT_TERRAIN_CUBE_SIZE: f32 = 200.0;
pub const DEFAULT_TERRAIN_CELL_SIZE: f32 = 2.0;
pub const MAX_TERRAIN_VERTICES: usize = 1 << 24; // keeps strip indices well inside u32
pub const NOISE_HASH_SCALE: f64 = 0.931322574615478515625e-9;

// Particle constants
pub const DEFAULT_PARTICLE_COUNT: usize = 5000;
pub const DEFAULT_PARTICLE_CUBE_SIZE: i32 = 200;
pub const MIN_PARTICLE_CUBE_SIZE: i32 = 4;

pub const DEFAULT_SETTINGS_FILE: &str = "objview_settings.bin";
