//! View-frustum planes and the coarse octant visibility test.
//!
//! Matrices follow glam's convention: column-major storage, column vectors,
//! `clip = view_proj * world`, so `w' = row(3) · v`. Planes are extracted from
//! rows (Gribb/Hartmann) and stored with unit normals pointing into the frustum.

use glam::{Mat4, Vec3, Vec4};

use crate::constants::{OCTANT_COUNT, OCTANT_SHRINK};

/// `normal · p + d = 0`, positive on the inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Builds a plane from raw coefficients and normalises it.
    pub fn from_coefficients(v: Vec4) -> Self {
        let normal = v.truncate();
        let length = normal.length();
        // A row with no usable normal (e.g. from a zero matrix) becomes a plane
        // every point is on, so it never rejects anything.
        if length <= f32::EPSILON {
            return Plane {
                normal: Vec3::ZERO,
                d: 0.0,
            };
        }
        Plane {
            normal: normal / length,
            d: v.w / length,
        }
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// True when an axis-aligned cube lies entirely on the outer side.
    ///
    /// Projects the cube's half-diagonal onto the normal; conservative near corners.
    pub fn rejects_cube(&self, center: Vec3, half_size: f32) -> bool {
        let e = half_size * (self.normal.x.abs() + self.normal.y.abs() + self.normal.z.abs());
        self.signed_distance(center) + e < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumSide {
    Left = 0,
    Right = 1,
    Bottom = 2,
    Top = 3,
    Near = 4,
    Far = 5,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    pub fn from_view_projection(view_proj: &Mat4) -> Self {
        let r0 = view_proj.row(0);
        let r1 = view_proj.row(1);
        let r2 = view_proj.row(2);
        let r3 = view_proj.row(3);

        Frustum {
            planes: [
                Plane::from_coefficients(r3 + r0), // Left
                Plane::from_coefficients(r3 - r0), // Right
                Plane::from_coefficients(r3 + r1), // Bottom
                Plane::from_coefficients(r3 - r1), // Top
                Plane::from_coefficients(r3 + r2), // Near (OpenGL depth [-1, 1])
                Plane::from_coefficients(r3 - r2), // Far
            ],
        }
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    pub fn plane(&self, side: FrustumSide) -> &Plane {
        &self.planes[side as usize]
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.signed_distance(point) >= 0.0)
    }

    /// Visible unless some plane has the whole cube outside.
    pub fn intersects_cube(&self, center: Vec3, half_size: f32) -> bool {
        !self.planes.iter().any(|p| p.rejects_cube(center, half_size))
    }
}

/// Corner directions of the eight octants: the four upper ones first, then the lower ones.
pub const OCTANT_OFFSETS: [Vec3; OCTANT_COUNT] = [
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
];

/// Octant cubes around `center`: each has edge `cube_size` and sits at
/// `center + offset * cube_size / 2`. The tested half-extent is shrunk slightly
/// so shared faces don't flicker between neighbours.
fn octant_visibility(view_proj: &Mat4, center: Vec3, cube_size: f32) -> [bool; OCTANT_COUNT] {
    let frustum = Frustum::from_view_projection(view_proj);
    let half_size = cube_size / 2.0;
    let test_size = half_size - OCTANT_SHRINK;

    OCTANT_OFFSETS.map(|offset| frustum.intersects_cube(center + offset * half_size, test_size))
}

/// Indices (0..8) of the octants that intersect the frustum, in ascending order.
pub fn get_intersections(view_proj: &Mat4, center: Vec3, cube_size: f32) -> Vec<usize> {
    octant_visibility(view_proj, center, cube_size)
        .iter()
        .enumerate()
        .filter_map(|(i, &visible)| visible.then_some(i))
        .collect()
}

/// Same test packed into a mask, bit `i` set when octant `i` is visible.
pub fn get_intersections_as_int(view_proj: &Mat4, center: Vec3, cube_size: f32) -> u8 {
    octant_visibility(view_proj, center, cube_size)
        .iter()
        .enumerate()
        .fold(0u8, |mask, (i, &visible)| mask | (u8::from(visible) << i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perspective_looking_down_neg_z() -> Mat4 {
        let proj = Mat4::perspective_rh_gl(90f32.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        proj * view
    }

    #[test]
    fn test_identity_planes_bound_unit_cube() {
        let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);
        let left = frustum.plane(FrustumSide::Left);
        assert!((left.normal - Vec3::X).length() < 1e-6);
        assert!((left.d - 1.0).abs() < 1e-6);

        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(frustum.contains_point(Vec3::new(0.99, -0.99, 0.5)));
        assert!(!frustum.contains_point(Vec3::new(1.5, 0.0, 0.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -1.5)));
    }

    #[test]
    fn test_planes_are_unit_length() {
        let frustum = Frustum::from_view_projection(&perspective_looking_down_neg_z());
        for plane in frustum.planes() {
            assert!((plane.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_perspective_near_and_far() {
        let frustum = Frustum::from_view_projection(&perspective_looking_down_neg_z());
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -1.0)));
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -99.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 1.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -101.0)));
        assert!(!frustum.contains_point(Vec3::new(-20.0, 0.0, -10.0)));
    }

    #[test]
    fn test_far_away_cube_is_culled() {
        let octants = get_intersections(&Mat4::IDENTITY, Vec3::splat(100.0), 0.5);
        assert!(octants.is_empty());
        assert_eq!(get_intersections_as_int(&Mat4::IDENTITY, Vec3::splat(100.0), 0.5), 0);
    }

    #[test]
    fn test_camera_at_center_sees_all_octants() {
        let octants = get_intersections(&Mat4::IDENTITY, Vec3::ZERO, 0.5);
        assert_eq!(octants, (0..8).collect::<Vec<_>>());
        assert_eq!(get_intersections_as_int(&Mat4::IDENTITY, Vec3::ZERO, 0.5), 0xFF);
    }

    #[test]
    fn test_small_cube_inside_wide_frustum() {
        let proj = Mat4::perspective_rh_gl(170f32.to_radians(), 1.0, 0.1, 1000.0);
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let octants = get_intersections(&(proj * view), Vec3::new(0.0, 0.0, -50.0), 1.0);
        assert_eq!(octants.len(), 8);
    }

    #[test]
    fn test_only_forward_octants_visible() {
        let mask = get_intersections_as_int(&perspective_looking_down_neg_z(), Vec3::ZERO, 20.0);
        // Octants 0, 1, 4 and 5 lie at -z, in front of the camera.
        assert_eq!(mask, 0b0011_0011);
        assert_eq!(
            get_intersections(&perspective_looking_down_neg_z(), Vec3::ZERO, 20.0),
            vec![0, 1, 4, 5]
        );
    }

    #[test]
    fn test_uniform_matrix_scale_does_not_change_result() {
        let vp = perspective_looking_down_neg_z();
        let center = Vec3::new(3.0, -2.0, -15.0);
        for size in [1.0, 4.0, 12.0] {
            let base = get_intersections_as_int(&vp, center, size);
            let scaled = get_intersections_as_int(&(vp * 3.5), center, size);
            assert_eq!(base, scaled, "cube size {size}");
        }
    }

    #[test]
    fn test_list_and_mask_agree() {
        let vp = perspective_looking_down_neg_z();
        for center in [Vec3::new(0.0, 0.0, -5.0), Vec3::new(30.0, 0.0, -10.0), Vec3::new(0.0, 8.0, 2.0)] {
            let list = get_intersections(&vp, center, 6.0);
            let mask = get_intersections_as_int(&vp, center, 6.0);
            let from_list = list.iter().fold(0u8, |m, &i| m | (1 << i));
            assert_eq!(mask, from_list);
        }
    }

    #[test]
    fn test_degenerate_plane_never_rejects() {
        let plane = Plane::from_coefficients(Vec4::new(0.0, 0.0, 0.0, -1.0));
        assert_eq!(plane.normal, Vec3::ZERO);
        assert!(!plane.rejects_cube(Vec3::new(5.0, -3.0, 2.0), 1.0));

        // Only the w row is non-zero: every side plane is degenerate.
        let flat = Mat4::from_cols(Vec4::ZERO, Vec4::ZERO, Vec4::ZERO, Vec4::new(0.0, 0.0, 0.0, -1.0));
        assert_eq!(get_intersections(&flat, Vec3::ZERO, 4.0).len(), 8);
        assert_eq!(get_intersections_as_int(&flat, Vec3::ZERO, 4.0), 0xFF);
    }

    #[test]
    fn test_rejects_cube_uses_projected_extent() {
        let plane = Plane::from_coefficients(Vec4::new(0.0, 2.0, 0.0, 0.0));
        assert_eq!(plane.normal, Vec3::Y);
        // Center 1.0 below the plane, half extent 1.5 reaches across it.
        assert!(!plane.rejects_cube(Vec3::new(0.0, -1.0, 0.0), 1.5));
        assert!(plane.rejects_cube(Vec3::new(0.0, -2.0, 0.0), 1.5));
    }
}
