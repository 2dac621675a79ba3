use glam::{Mat4, Vec3};

use crate::constants::*;
use crate::player::input::MoveDir;
use crate::render::frustum::{get_intersections, get_intersections_as_int};
use crate::utils::settings::CameraSettings;

/// Free-look camera. Angles are in degrees; `direction`, `right` and `up` are
/// recomputed from them on every look change.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub h_angle: f32,
    pub v_angle: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Camera {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            h_angle: CAMERA_DEFAULT_H_ANGLE,
            v_angle: CAMERA_DEFAULT_V_ANGLE,
            fov: settings.fov,
            near: settings.near,
            far: settings.far,
            move_speed: settings.move_speed,
            mouse_sensitivity: settings.mouse_sensitivity,
        };
        camera.update_vectors();
        camera
    }

    /// Back to the origin, looking down -z.
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.fov = CAMERA_DEFAULT_FOV;
        self.set_angles(CAMERA_DEFAULT_H_ANGLE, CAMERA_DEFAULT_V_ANGLE);
    }

    pub fn set_angles(&mut self, h_angle: f32, v_angle: f32) {
        self.h_angle = h_angle;
        self.v_angle = v_angle.clamp(-CAMERA_MAX_PITCH, CAMERA_MAX_PITCH);
        self.update_vectors();
    }

    /// Applies a mouse drag in pixels.
    pub fn look_by(&mut self, dx: f32, dy: f32) {
        self.set_angles(
            self.h_angle + dx * self.mouse_sensitivity,
            self.v_angle + dy * self.mouse_sensitivity,
        );
    }

    fn update_vectors(&mut self) {
        let h = self.h_angle.to_radians();
        let v = self.v_angle.to_radians();
        let h_right = (self.h_angle - 90.0).to_radians();

        self.direction = Vec3::new(v.cos() * h.sin(), v.sin(), v.cos() * h.cos());
        self.right = Vec3::new(h_right.sin(), 0.0, h_right.cos());
        self.up = self.right.cross(self.direction);
    }

    /// Moves along the current basis; `dt_ms` is the frame time in milliseconds.
    pub fn move_by(&mut self, dir: MoveDir, dt_ms: f32) {
        let step = dt_ms * self.move_speed;
        match dir {
            MoveDir::Forward => self.position += self.direction * step,
            MoveDir::Backward => self.position -= self.direction * step,
            MoveDir::Right => self.position += self.right * step,
            MoveDir::Left => self.position -= self.right * step,
            MoveDir::None => {}
        }
    }

    /// Mouse-wheel zoom, clamped to a sane field of view.
    pub fn zoom(&mut self, wheel_delta: f32) {
        self.fov = (self.fov - 0.05 * wheel_delta).clamp(CAMERA_MIN_FOV, CAMERA_MAX_FOV);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Octants of a cube grid centred on the camera that the camera can see.
    pub fn visible_octants(&self, aspect: f32, cube_size: f32) -> Vec<usize> {
        get_intersections(&self.view_projection(aspect), self.position, cube_size)
    }

    pub fn visible_octant_mask(&self, aspect: f32, cube_size: f32) -> u8 {
        get_intersections_as_int(&self.view_projection(aspect), self.position, cube_size)
    }
}
