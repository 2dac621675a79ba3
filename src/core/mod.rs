//! Core geometry types
//! Contains vertex components and the mesh representation handed to renderers.

pub mod mesh;
pub mod vertex;

// Re-export commonly used types
pub use mesh::{Face, FaceIndex, GpuBuffers, MeshData};
pub use vertex::{GpuVertex, TexCoord2, Vertex3};
