use crate::core::vertex::{GpuVertex, TexCoord2, Vertex3};

/// One corner of a face. Indices are 1-based as written in the file; 0 means the slot is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceIndex {
    pub vertex: u32,
    pub tex: u32,
    pub normal: u32,
}

impl FaceIndex {
    pub const fn new(vertex: u32, tex: u32, normal: u32) -> Self {
        FaceIndex {
            vertex,
            tex,
            normal,
        }
    }
}

/// Triangles only.
pub type Face = [FaceIndex; 3];

/// Geometry produced by one successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vertex3>,
    pub texcoords: Vec<TexCoord2>,
    pub normals: Vec<Vertex3>,
    pub faces: Vec<Face>,
}

/// Flat per-corner arrays, one entry per face corner that carries the slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuBuffers {
    pub positions: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    pub fn has_texcoords(&self) -> bool {
        self.faces.iter().flatten().any(|i| i.tex != 0)
    }

    pub fn has_normals(&self) -> bool {
        self.faces.iter().flatten().any(|i| i.normal != 0)
    }

    pub fn position(&self, index: u32) -> Option<Vertex3> {
        Self::lookup(&self.positions, index)
    }

    pub fn texcoord(&self, index: u32) -> Option<TexCoord2> {
        Self::lookup(&self.texcoords, index)
    }

    pub fn normal(&self, index: u32) -> Option<Vertex3> {
        Self::lookup(&self.normals, index)
    }

    fn lookup<T: Copy>(items: &[T], index: u32) -> Option<T> {
        if index == 0 {
            return None;
        }
        items.get(index as usize - 1).copied()
    }

    /// Expands faces into draw-ready arrays.
    ///
    /// The separate arrays only receive entries for slots that are present, so a
    /// model without normals yields an empty `normals` array. The interleaved
    /// `vertices` always get one entry per corner, zero-filled where absent,
    /// with sequential indices.
    pub fn to_gpu_buffers(&self) -> GpuBuffers {
        let corners = self.faces.len() * 3;
        let mut out = GpuBuffers {
            positions: Vec::with_capacity(corners),
            texcoords: Vec::new(),
            normals: Vec::new(),
            vertices: Vec::with_capacity(corners),
            indices: Vec::with_capacity(corners),
        };

        for corner in self.faces.iter().flatten() {
            let position = self.position(corner.vertex);
            let uv = self.texcoord(corner.tex);
            let normal = self.normal(corner.normal);

            if let Some(p) = position {
                out.positions.push(p.to_array());
            }
            if let Some(t) = uv {
                out.texcoords.push(t.to_array());
            }
            if let Some(n) = normal {
                out.normals.push(n.to_array());
            }

            out.indices.push(out.vertices.len() as u32);
            out.vertices.push(GpuVertex {
                position: position.map(Vertex3::to_array).unwrap_or_default(),
                normal: normal.map(Vertex3::to_array).unwrap_or_default(),
                uv: uv.map(TexCoord2::to_array).unwrap_or_default(),
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            positions: vec![
                Vertex3::new(0.0, 0.0, 0.0),
                Vertex3::new(1.0, 0.0, 0.0),
                Vertex3::new(0.0, 1.0, 0.0),
            ],
            texcoords: vec![TexCoord2::new(0.0, 0.0), TexCoord2::new(1.0, 1.0)],
            normals: vec![Vertex3::new(0.0, 0.0, 1.0)],
            faces: vec![[
                FaceIndex::new(1, 1, 1),
                FaceIndex::new(2, 2, 1),
                FaceIndex::new(3, 0, 1),
            ]],
        }
    }

    #[test]
    fn test_zero_index_is_absent() {
        let mesh = triangle();
        assert_eq!(mesh.position(0), None);
        assert_eq!(mesh.texcoord(0), None);
        assert_eq!(mesh.position(3), Some(Vertex3::new(0.0, 1.0, 0.0)));
        assert_eq!(mesh.position(4), None);
    }

    #[test]
    fn test_gpu_buffers_skip_absent_slots() {
        let buffers = triangle().to_gpu_buffers();

        assert_eq!(buffers.positions.len(), 3);
        assert_eq!(buffers.texcoords, vec![[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(buffers.normals.len(), 3);
        assert_eq!(buffers.indices, vec![0, 1, 2]);
        assert_eq!(buffers.vertices[2].uv, [0.0, 0.0]);
        assert_eq!(buffers.vertices[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_slot_presence() {
        let mut mesh = triangle();
        assert!(mesh.has_texcoords());
        assert!(mesh.has_normals());

        for corner in mesh.faces.iter_mut().flatten() {
            corner.normal = 0;
        }
        assert!(!mesh.has_normals());
        assert!(mesh.to_gpu_buffers().normals.is_empty());
    }
}
