//! Flat terrain grid built as a single serpentine triangle strip.
//!
//! Vertices are laid out row by row along z, `cols` vertices per row, centred
//! on the origin. The strip walks even rows left to right and odd rows right
//! to left, joining rows with one repeated index.

use crate::constants::MAX_TERRAIN_VERTICES;
use crate::core::vertex::{GpuVertex, TexCoord2, Vertex3};
use crate::error::TerrainError;
use crate::world::noise::CoherentNoise;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainGrid {
    /// Vertex rows along z.
    pub rows: usize,
    /// Vertices per row along x.
    pub cols: usize,
    pub cell_size: f32,
    pub positions: Vec<Vertex3>,
    pub texcoords: Vec<TexCoord2>,
    pub normals: Vec<Vertex3>,
    pub indices: Vec<u32>,
}

impl TerrainGrid {
    /// Builds a flat `z_size` by `x_size` plane split into square cells.
    /// Partial cells at the far edges are dropped.
    pub fn generate_plane(z_size: f32, x_size: f32, cell_size: f32) -> Result<Self, TerrainError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(TerrainError::InvalidCellSize(cell_size));
        }
        if !(z_size.is_finite() && x_size.is_finite()) || z_size < 0.0 || x_size < 0.0 {
            return Err(TerrainError::InvalidPlaneSize { z_size, x_size });
        }

        let too_large = || TerrainError::PlaneTooLarge {
            z_size,
            x_size,
            cell_size,
        };
        // Float-to-int casts saturate, so oversized planes surface in the checked ops.
        let rows = ((z_size / cell_size) as usize).checked_add(1).ok_or_else(too_large)?;
        let cols = ((x_size / cell_size) as usize).checked_add(1).ok_or_else(too_large)?;
        match rows.checked_mul(cols) {
            Some(count) if count <= MAX_TERRAIN_VERTICES => {}
            _ => return Err(too_large()),
        }

        let half_w = (cols as f32 - 1.0) / 2.0;
        let half_l = (rows as f32 - 1.0) / 2.0;
        let u_span = (cols - 1).max(1) as f32;
        let v_span = (rows - 1).max(1) as f32;

        let mut positions = Vec::with_capacity(rows * cols);
        let mut texcoords = Vec::with_capacity(rows * cols);
        for z in 0..rows {
            for x in 0..cols {
                positions.push(Vertex3::new(
                    (x as f32 - half_w) * cell_size,
                    0.0,
                    (z as f32 - half_l) * cell_size,
                ));
                texcoords.push(TexCoord2::new(x as f32 / u_span, z as f32 / v_span));
            }
        }

        let mut grid = TerrainGrid {
            rows,
            cols,
            cell_size,
            positions,
            texcoords,
            normals: Vec::new(),
            indices: strip_indices(rows, cols),
        };
        grid.compute_normals();

        tracing::debug!(
            rows,
            cols,
            indices = grid.indices.len(),
            "Generated terrain plane"
        );
        Ok(grid)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Replaces every height with the noise value sampled at the vertex's (x, z).
    pub fn apply_height_map(&mut self, noise: &CoherentNoise) {
        for p in &mut self.positions {
            p.y = noise.height(f64::from(p.x), f64::from(p.z)) as f32;
        }
        self.compute_normals();
    }

    /// Per-vertex normals: the area-weighted average of the surrounding triangles.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vertex3::ZERO; self.positions.len()];

        for z in 0..self.rows.saturating_sub(1) {
            for x in 0..self.cols.saturating_sub(1) {
                let a = z * self.cols + x;
                let b = a + self.cols;
                let c = a + 1;
                let d = b + 1;
                for [i, j, k] in [[a, b, c], [c, b, d]] {
                    let (p0, p1, p2) = (self.positions[i], self.positions[j], self.positions[k]);
                    let n = (p1 - p0).cross(p2 - p0);
                    acc[i] += n;
                    acc[j] += n;
                    acc[k] += n;
                }
            }
        }

        // A single row or column has no triangles; keep it facing up.
        self.normals = acc
            .into_iter()
            .map(|n| {
                if n.length() > f32::EPSILON {
                    n.normalized()
                } else {
                    Vertex3::new(0.0, 1.0, 0.0)
                }
            })
            .collect();
    }

    /// Lowest and highest vertex heights, or `None` for an empty grid.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        let mut ys = self.positions.iter().map(|p| p.y);
        let first = ys.next()?;
        Some(ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Interleaved vertices ready for upload; draw with `indices` as a triangle strip.
    pub fn to_gpu_vertices(&self) -> Vec<GpuVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.texcoords)
            .map(|((p, n), t)| GpuVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: t.to_array(),
            })
            .collect()
    }
}

/// Serpentine strip over a `rows` x `cols` vertex grid:
/// `2 * cols * (rows - 1) + (rows - 2)` indices, empty for fewer than two rows.
/// The caller keeps `rows * cols` within `MAX_TERRAIN_VERTICES`, so every index fits in `u32`.
fn strip_indices(rows: usize, cols: usize) -> Vec<u32> {
    if rows < 2 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(2 * cols * (rows - 1) + (rows - 2));
    for z in 0..rows - 1 {
        let row = z * cols;
        let last_row = z == rows - 2;

        if z % 2 == 0 {
            for x in 0..cols {
                indices.push((row + x) as u32);
                indices.push((row + x + cols) as u32);
            }
            if !last_row {
                indices.push((row + cols - 1) as u32);
            }
        } else {
            for x in (0..cols).rev() {
                indices.push((row + x) as u32);
                indices.push((row + x + cols) as u32);
            }
            if !last_row {
                indices.push(row as u32);
            }
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::noise::NoiseParameters;

    fn close(a: Vertex3, b: Vertex3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_small_plane_layout() {
        let grid = TerrainGrid::generate_plane(2.0, 2.0, 1.0).unwrap();

        assert_eq!((grid.rows, grid.cols), (3, 3));
        assert_eq!(grid.vertex_count(), 9);
        assert_eq!(grid.positions[0], Vertex3::new(-1.0, 0.0, -1.0));
        assert_eq!(grid.positions[4], Vertex3::new(0.0, 0.0, 0.0));
        assert_eq!(grid.positions[8], Vertex3::new(1.0, 0.0, 1.0));
        assert_eq!(grid.indices, vec![0, 3, 1, 4, 2, 5, 2, 5, 8, 4, 7, 3, 6]);
    }

    #[test]
    fn test_index_count_formula() {
        let grid = TerrainGrid::generate_plane(4.0, 6.0, 2.0).unwrap();
        assert_eq!((grid.rows, grid.cols), (3, 4));
        assert_eq!(grid.indices.len(), 2 * 4 * 2 + 1);

        let grid = TerrainGrid::generate_plane(10.0, 3.0, 1.0).unwrap();
        assert_eq!(grid.indices.len(), 2 * grid.cols * (grid.rows - 1) + (grid.rows - 2));
        assert!(grid.indices.iter().all(|&i| (i as usize) < grid.vertex_count()));
    }

    #[test]
    fn test_texcoords_span_unit_square() {
        let grid = TerrainGrid::generate_plane(4.0, 2.0, 1.0).unwrap();
        let last = grid.vertex_count() - 1;
        assert_eq!(grid.texcoords[0], TexCoord2::new(0.0, 0.0));
        assert_eq!(grid.texcoords[2], TexCoord2::new(1.0, 0.0));
        assert_eq!(grid.texcoords[3], TexCoord2::new(0.0, 0.25));
        assert_eq!(grid.texcoords[last], TexCoord2::new(1.0, 1.0));
    }

    #[test]
    fn test_single_row_has_no_strip() {
        let grid = TerrainGrid::generate_plane(0.0, 4.0, 1.0).unwrap();
        assert_eq!(grid.rows, 1);
        assert!(grid.indices.is_empty());
        assert!(grid.normals.iter().all(|&n| n == Vertex3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert!(matches!(
            TerrainGrid::generate_plane(10.0, 10.0, 0.0),
            Err(TerrainError::InvalidCellSize(_))
        ));
        assert!(matches!(
            TerrainGrid::generate_plane(-1.0, 10.0, 1.0),
            Err(TerrainError::InvalidPlaneSize { .. })
        ));
        assert!(TerrainGrid::generate_plane(f32::NAN, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_oversized_plane_is_an_error() {
        assert!(matches!(
            TerrainGrid::generate_plane(1e30, 1.0, 1.0),
            Err(TerrainError::PlaneTooLarge { .. })
        ));
        assert!(matches!(
            TerrainGrid::generate_plane(1.0, 1e30, 1.0),
            Err(TerrainError::PlaneTooLarge { .. })
        ));
        // Each side alone is fine; the vertex count is not.
        assert!(matches!(
            TerrainGrid::generate_plane(1e5, 1e5, 1.0),
            Err(TerrainError::PlaneTooLarge { .. })
        ));
        assert!(matches!(
            TerrainGrid::generate_plane(1.0, 1.0, f32::MIN_POSITIVE),
            Err(TerrainError::PlaneTooLarge { .. })
        ));
    }

    #[test]
    fn test_flat_normals_point_up() {
        let grid = TerrainGrid::generate_plane(6.0, 6.0, 2.0).unwrap();
        assert!(grid.normals.iter().all(|&n| close(n, Vertex3::new(0.0, 1.0, 0.0))));
    }

    #[test]
    fn test_sloped_normals() {
        let mut grid = TerrainGrid::generate_plane(4.0, 4.0, 1.0).unwrap();
        for p in &mut grid.positions {
            p.y = p.x;
        }
        grid.compute_normals();

        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!(grid.normals.iter().all(|&n| close(n, Vertex3::new(-s, s, 0.0))));
    }

    #[test]
    fn test_height_map_samples_noise_at_xz() {
        let noise = CoherentNoise::new(NoiseParameters::default());
        let flat = TerrainGrid::generate_plane(8.0, 8.0, 2.0).unwrap();
        let mut grid = flat.clone();
        grid.apply_height_map(&noise);

        for (p, q) in grid.positions.iter().zip(&flat.positions) {
            assert_eq!((p.x, p.z), (q.x, q.z));
            assert_eq!(p.y, noise.height(f64::from(p.x), f64::from(p.z)) as f32);
        }
        let (lo, hi) = grid.height_range().unwrap();
        assert!(lo <= hi);
    }

    #[test]
    fn test_gpu_vertices_match_grid() {
        let grid = TerrainGrid::generate_plane(2.0, 2.0, 1.0).unwrap();
        let verts = grid.to_gpu_vertices();
        assert_eq!(verts.len(), 9);
        assert_eq!(verts[8].position, [1.0, 0.0, 1.0]);
        assert_eq!(verts[8].uv, [1.0, 1.0]);
    }
}
