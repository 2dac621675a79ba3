//! Procedural scene content
//! Contains coherent noise, the terrain grid and the particle field.

pub mod noise;
pub mod particles;
pub mod terrain;

// Re-export commonly used types
pub use noise::{CoherentNoise, NoiseParameters};
pub use particles::{Particle, ParticleBuffers, ParticleConfig, ParticleField};
pub use terrain::TerrainGrid;
