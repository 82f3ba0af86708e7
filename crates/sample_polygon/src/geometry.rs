use bytemuck::Pod;
use bytemuck::Zeroable;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }
}

/// A quad in clip space, bottom-left, top-left, bottom-right, top-right.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new(-0.4, -0.7, 0.0),
    Vertex::new(-0.4, 0.7, 0.0),
    Vertex::new(0.4, -0.7, 0.0),
    Vertex::new(0.4, 0.7, 0.0),
];

/// Two triangles sharing the 1-2 diagonal.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

pub const INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;

pub fn vertex_stride() -> u32 {
    std::mem::size_of::<Vertex>() as u32
}
