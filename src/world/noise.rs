//! Seeded value noise with octave summation, used for terrain heights.
//!
//! The lattice hash and the smoothing kernel are fixed so the same parameters
//! always give bit-identical heights.

use serde::{Deserialize, Serialize};

use crate::constants::NOISE_HASH_SCALE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    /// Amplitude multiplier applied per octave.
    pub persistence: f64,
    /// Base spatial frequency, doubled every octave.
    pub frequency: f64,
    pub amplitude: f64,
    pub octaves: u32,
    pub seed: i32,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            persistence: 0.5,
            frequency: 0.02,
            amplitude: 30.0,
            octaves: 6,
            seed: 2137,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoherentNoise {
    params: NoiseParameters,
    effective_seed: i32,
}

impl CoherentNoise {
    pub fn new(params: NoiseParameters) -> Self {
        // Keeps the offset positive and spreads neighbouring seeds apart.
        let effective_seed = 2i32.wrapping_add(params.seed.wrapping_mul(params.seed));
        Self {
            params,
            effective_seed,
        }
    }

    pub fn params(&self) -> &NoiseParameters {
        &self.params
    }

    pub fn effective_seed(&self) -> i32 {
        self.effective_seed
    }

    /// Height at planar coordinates `(x, y)`.
    pub fn height(&self, x: f64, y: f64) -> f64 {
        self.params.amplitude * self.total(x, y)
    }

    fn total(&self, x: f64, y: f64) -> f64 {
        let seed = f64::from(self.effective_seed);
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.params.frequency;

        for _ in 0..self.params.octaves {
            // Axes are swapped on purpose; existing height maps depend on it.
            sum += value(y * frequency + seed, x * frequency + seed) * amplitude;
            amplitude *= self.params.persistence;
            frequency *= 2.0;
        }
        sum
    }
}

/// Smoothed lattice noise at `(x, y)`: each of the four surrounding lattice
/// corners is filtered with a 3x3 kernel, then blended with a cubic ease.
pub fn value(x: f64, y: f64) -> f64 {
    let xi = x as i32;
    let yi = y as i32;
    let xf = x - f64::from(xi);
    let yf = y - f64::from(yi);

    let corner = |cx: i32, cy: i32| smoothed(cx, cy);
    let x0y0 = corner(xi, yi);
    let x1y0 = corner(xi.wrapping_add(1), yi);
    let x0y1 = corner(xi, yi.wrapping_add(1));
    let x1y1 = corner(xi.wrapping_add(1), yi.wrapping_add(1));

    let v1 = blend(x0y0, x1y0, xf);
    let v2 = blend(x0y1, x1y1, xf);
    blend(v1, v2, yf)
}

/// 3x3 weighted average around a lattice point: 1/16 diagonals, 1/8 edges, 1/4 centre.
fn smoothed(x: i32, y: i32) -> f64 {
    let (xm, xp) = (x.wrapping_sub(1), x.wrapping_add(1));
    let (ym, yp) = (y.wrapping_sub(1), y.wrapping_add(1));

    let corners = hash(xm, ym) + hash(xp, ym) + hash(xm, yp) + hash(xp, yp);
    let sides = hash(xm, y) + hash(xp, y) + hash(x, ym) + hash(x, yp);
    let center = hash(x, y);

    0.0625 * corners + 0.125 * sides + 0.25 * center
}

/// Cubic Hermite blend: weights `3t² - 2t³` for `b` and the mirrored weight for `a`.
fn blend(a: f64, b: f64, t: f64) -> f64 {
    let s = 1.0 - t;
    let (s2, t2) = (s * s, t * t);
    let wa = 3.0 * s2 - 2.0 * (s2 * s);
    let wb = 3.0 * t2 - 2.0 * (t2 * t);
    a * wa + b * wb
}

/// Integer lattice hash mapped to roughly [-1, 1]. 32-bit wrapping arithmetic.
pub fn hash(x: i32, y: i32) -> f64 {
    let n = x.wrapping_add(y.wrapping_mul(57));
    let n = (n << 13) ^ n;
    let t = n
        .wrapping_mul(
            n.wrapping_mul(n)
                .wrapping_mul(15731)
                .wrapping_add(789_221),
        )
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - f64::from(t) * NOISE_HASH_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> NoiseParameters {
        NoiseParameters {
            persistence: 0.5,
            frequency: 0.05,
            amplitude: 10.0,
            octaves: 4,
            seed: 7,
        }
    }

    #[test]
    fn test_hash_reference_value() {
        // n = 0: t = 1376312589
        let expected = 1.0 - 1_376_312_589.0 * NOISE_HASH_SCALE;
        assert_eq!(hash(0, 0), expected);
        assert!((hash(0, 0) - (-0.281_790_983_863_174_9)).abs() < 1e-12);
    }

    #[test]
    fn test_hash_range_and_wraparound() {
        for (x, y) in [(1, 0), (0, 1), (-5, 9), (i32::MAX, i32::MIN), (123_456, -654_321)] {
            let h = hash(x, y);
            assert!(h > -1.0 - 1e-9 && h <= 1.0, "hash({x}, {y}) = {h}");
        }
    }

    #[test]
    fn test_effective_seed() {
        assert_eq!(CoherentNoise::new(params()).effective_seed(), 51);
        let zero = NoiseParameters { seed: 0, ..params() };
        assert_eq!(CoherentNoise::new(zero).effective_seed(), 2);
    }

    #[test]
    fn test_value_on_lattice_is_smoothed_corner() {
        assert_eq!(value(3.0, 4.0), smoothed(3, 4));
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(2.0, 5.0, 0.0), 2.0);
        assert_eq!(blend(2.0, 5.0, 1.0), 5.0);
        assert_eq!(blend(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn test_height_is_deterministic() {
        let a = CoherentNoise::new(params());
        let b = CoherentNoise::new(params());
        for (x, y) in [(0.0, 0.0), (12.5, -3.25), (-100.0, 77.7)] {
            assert_eq!(a.height(x, y).to_bits(), b.height(x, y).to_bits());
        }
    }

    #[test]
    fn test_height_scales_with_amplitude() {
        let base = CoherentNoise::new(params());
        let triple = CoherentNoise::new(NoiseParameters {
            amplitude: 30.0,
            ..params()
        });
        for (x, y) in [(1.0, 2.0), (40.0, -8.5), (-3.3, 19.0)] {
            let h = base.height(x, y);
            assert!((triple.height(x, y) - 3.0 * h).abs() <= 1e-9 * h.abs().max(1.0));
        }
    }

    #[test]
    fn test_axes_are_swapped() {
        let noise = CoherentNoise::new(NoiseParameters {
            octaves: 1,
            amplitude: 1.0,
            ..params()
        });
        let seed = f64::from(noise.effective_seed());
        let (x, y) = (13.0, 41.0);
        let expected = value(y * 0.05 + seed, x * 0.05 + seed);
        assert_eq!(noise.height(x, y), expected);
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let noise = CoherentNoise::new(NoiseParameters {
            octaves: 0,
            ..params()
        });
        assert_eq!(noise.height(5.0, 5.0), 0.0);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = CoherentNoise::new(params());
        let b = CoherentNoise::new(NoiseParameters { seed: 8, ..params() });
        let differs = (0..10).any(|i| {
            let p = f64::from(i) * 3.7;
            a.height(p, p) != b.height(p, p)
        });
        assert!(differs);
    }
}
