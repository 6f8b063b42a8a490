//! Instance records for the host renderer

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::{Material, Mesh};

/// One drawn shape: column-major model matrix plus mesh and material ids
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub mesh: u32,
    pub material: u32,
    pub _pad: [u32; 2],
}

impl Instance {
    pub fn new(mesh: Mesh, transform: &Mat4, material: Material) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
            color: material.color(),
            mesh: mesh as u32,
            material: material as u32,
            _pad: [0; 2],
        }
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// Colors for game elements
pub mod colors {
    pub const BASEBALL: [f32; 4] = [0.95, 0.93, 0.88, 1.0];
    pub const BASKETBALL: [f32; 4] = [0.9, 0.45, 0.1, 1.0];
    pub const ALUMINUM: [f32; 4] = [0.75, 0.77, 0.8, 1.0];
    pub const WOOD: [f32; 4] = [0.6, 0.42, 0.25, 1.0];
}
