//! Rendering boundary
//!
//! The game never touches meshes or shaders. It describes each frame as
//! "draw this mesh with this transform and material" calls against a
//! [`Scene`], and [`DrawList`] packs those calls for a host renderer.

pub mod instance;

use glam::{Mat4, Vec3};

pub use instance::{Instance, colors};

use crate::consts::BAT_CYLINDER_SIZE;
use crate::sim::rig;
use crate::sim::{Body, BodyRole, GameState, ProjectileKind};

/// Meshes the host is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Mesh {
    Sphere = 0,
    Cylinder = 1,
    Bat = 2,
}

/// Materials the host is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Material {
    Baseball = 0,
    Basketball = 1,
    Aluminum = 2,
    Wood = 3,
}

impl Material {
    pub fn color(self) -> [f32; 4] {
        match self {
            Material::Baseball => colors::BASEBALL,
            Material::Basketball => colors::BASKETBALL,
            Material::Aluminum => colors::ALUMINUM,
            Material::Wood => colors::WOOD,
        }
    }
}

/// Anything that can draw a shape
pub trait Scene {
    fn draw(&mut self, mesh: Mesh, transform: &Mat4, material: Material);
}

/// Scene that records draws as GPU-ready instances
#[derive(Debug, Default)]
pub struct DrawList {
    pub instances: Vec<Instance>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw bytes for a single buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Scene for DrawList {
    fn draw(&mut self, mesh: Mesh, transform: &Mat4, material: Material) {
        self.instances.push(Instance::new(mesh, transform, material));
    }
}

fn draw_body(body: &Body, scene: &mut impl Scene) {
    match body.role {
        BodyRole::Bat => {
            let cylinder = body.drawn_location * Mat4::from_scale(Vec3::from(BAT_CYLINDER_SIZE));
            scene.draw(Mesh::Cylinder, &cylinder, Material::Aluminum);
        }
        BodyRole::Projectile(ProjectileKind::Baseball) | BodyRole::Ambient => {
            scene.draw(Mesh::Sphere, &body.drawn_location, Material::Baseball);
        }
        BodyRole::Projectile(ProjectileKind::Basketball) => {
            scene.draw(Mesh::Sphere, &body.drawn_location, Material::Basketball);
        }
    }
}

/// Every simulated body at its blended transform
pub fn draw_bodies(state: &GameState, scene: &mut impl Scene) {
    for body in state.bodies.iter().chain(&state.ambient) {
        draw_body(body, scene);
    }
}

/// Bodies plus the batter's bat, posed for the current swing
pub fn draw_frame(state: &GameState, scene: &mut impl Scene) {
    draw_bodies(state, scene);
    let bat = rig::bat_transform(state.batting_x, state.swing_elapsed());
    scene.draw(Mesh::Bat, &bat, Material::Wood);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_one_instance_per_body() {
        let mut state = GameState::new(4);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let mut list = DrawList::default();
        draw_bodies(&state, &mut list);
        assert_eq!(list.len(), state.bodies.len() + state.ambient.len());
        assert!(!list.is_empty());

        list.clear();
        draw_frame(&state, &mut list);
        assert_eq!(list.len(), state.bodies.len() + state.ambient.len() + 1);
        assert_eq!(list.as_bytes().len(), list.len() * std::mem::size_of::<Instance>());
    }

    #[test]
    fn test_projectile_material_follows_kind() {
        let mut state = GameState::new(4);
        state.spawn_projectile(ProjectileKind::Basketball, Mat4::IDENTITY, Vec3::Z);
        let mut list = DrawList::default();
        draw_bodies(&state, &mut list);
        assert_eq!(list.instances[0].material, Material::Basketball as u32);
        assert_eq!(list.instances[0].mesh, Mesh::Sphere as u32);
    }

    #[test]
    fn test_bat_proxy_draws_as_cylinder() {
        let mut state = GameState::new(4);
        state.emplace_bat(Mat4::IDENTITY);
        let mut list = DrawList::default();
        draw_bodies(&state, &mut list);
        let instance = list.instances[0];
        assert_eq!(instance.mesh, Mesh::Cylinder as u32);
        let expected = Mat4::from_scale(Vec3::from(BAT_CYLINDER_SIZE));
        assert!(instance.transform().abs_diff_eq(expected, 1e-6));
    }
}
