//! Vertex type for lit, textured meshes

use bytemuck::{Pod, Zeroable};

/// Mesh vertex: object-space position, normal and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl MeshVertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Colors for scene elements without a per-kind entry
pub mod colors {
    pub const PLAYER: [f32; 3] = [1.0, 1.0, 1.0];
    pub const GROUND: [f32; 3] = [1.0, 1.0, 1.0];
    pub const LANE_MARKER: [f32; 3] = [1.0, 1.0, 1.0];
    pub const SKY: [f32; 3] = [0.5, 0.7, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.2, 0.3, 0.8, 1.0];
}
