//! Snow-like particle field scattered over the upper half of a cube.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PARTICLE_COUNT, DEFAULT_PARTICLE_CUBE_SIZE, MIN_PARTICLE_CUBE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub count: usize,
    /// Edge length of the spawn cube, in whole units.
    pub cube_size: i32,
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            cube_size: DEFAULT_PARTICLE_CUBE_SIZE,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub size: f32,
    /// Fall speed per millisecond.
    pub speed: f32,
    /// Radius of the horizontal sway.
    pub radius: f32,
    /// Sway frequency.
    pub frequency: f32,
}

/// Two flat attribute streams: `[x, y, z, size]` and `[speed, radius, frequency]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleBuffers {
    pub positions: Vec<[f32; 4]>,
    pub motion: Vec<[f32; 3]>,
}

impl ParticleBuffers {
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn motion_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.motion)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    pub cube_size: i32,
    pub particles: Vec<Particle>,
}

impl ParticleField {
    /// Same config, same field.
    pub fn generate(config: &ParticleConfig) -> Self {
        let cube_size = config.cube_size.max(MIN_PARTICLE_CUBE_SIZE);
        let half = cube_size / 2;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let particles = (0..config.count)
            .map(|_| {
                let x = rng.gen_range(0..cube_size) - half;
                let y = rng.gen_range(0..half / 2) + half;
                let z = rng.gen_range(0..cube_size) - half;
                Particle {
                    position: [x as f32, y as f32, z as f32],
                    size: rng.gen_range(10..40) as f32,
                    speed: rng.gen_range(200..500) as f32 / 10_000.0,
                    radius: rng.gen_range(0..20) as f32,
                    frequency: rng.gen_range(0..200) as f32 / 100_000.0,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = particles.len(), cube_size, "Generated particle field");
        ParticleField {
            cube_size,
            particles,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn to_gpu_buffers(&self) -> ParticleBuffers {
        let (positions, motion) = self
            .particles
            .iter()
            .map(|p| {
                let [x, y, z] = p.position;
                ([x, y, z, p.size], [p.speed, p.radius, p.frequency])
            })
            .unzip();
        ParticleBuffers { positions, motion }
    }
}
