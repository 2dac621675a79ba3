use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Three single-precision components, used for positions and normals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex3 {
    pub const ZERO: Vertex3 = Vertex3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vertex3 { x, y, z }
    }

    pub fn dot(self, other: Vertex3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vertex3) -> Vertex3 {
        Vertex3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy, or the zero vector when the length is zero.
    pub fn normalized(self) -> Vertex3 {
        let len = self.length();
        if len > f32::EPSILON {
            self * (1.0 / len)
        } else {
            Vertex3::ZERO
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vertex3 {
    type Output = Vertex3;

    fn add(self, rhs: Vertex3) -> Vertex3 {
        Vertex3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vertex3 {
    fn add_assign(&mut self, rhs: Vertex3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vertex3 {
    type Output = Vertex3;

    fn sub(self, rhs: Vertex3) -> Vertex3 {
        Vertex3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vertex3 {
    type Output = Vertex3;

    fn mul(self, rhs: f32) -> Vertex3 {
        Vertex3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<Vec3> for Vertex3 {
    fn from(v: Vec3) -> Self {
        Vertex3::new(v.x, v.y, v.z)
    }
}

impl From<Vertex3> for Vec3 {
    fn from(v: Vertex3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TexCoord2 {
    pub u: f32,
    pub v: f32,
}

impl TexCoord2 {
    pub const fn new(u: f32, v: f32) -> Self {
        TexCoord2 { u, v }
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.u, self.v]
    }
}

impl From<TexCoord2> for Vec2 {
    fn from(t: TexCoord2) -> Self {
        Vec2::new(t.u, t.v)
    }
}

/// Interleaved vertex layout uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}
