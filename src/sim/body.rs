//! Rigid bodies and their interpolated draw transforms
//!
//! A body keeps the state of the previous tick so the renderer can draw it
//! anywhere between two physics steps.

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Which pitch came out of the pitcher's hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Baseball,
    /// The bad ball - batting it ends the game
    Basketball,
}

/// What a body stands for in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyRole {
    /// Invisible cylinder riding the bat, used for contact tests
    Bat,
    /// A pitched ball
    Projectile(ProjectileKind),
    /// Decorative title-screen ball
    Ambient,
}

/// Snapshot of the last tick, for interpolation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub center: Vec3,
    pub rotation: Mat3,
}

/// A simulated rigid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub role: BodyRole,
    pub center: Vec3,
    /// Orientation basis. Carries any scale of the matrix the body was emplaced with.
    pub rotation: Mat3,
    pub linear_velocity: Vec3,
    /// Radians per second about `spin_axis`
    pub angular_velocity: f32,
    pub spin_axis: Vec3,
    /// Per-axis scale applied when drawing (and colliding)
    pub size: Vec3,
    pub previous: Snapshot,
    /// Blended world transform, including `size`
    pub drawn_location: Mat4,
}

impl Body {
    /// Place a body at `location` with the given motion
    pub fn emplace(
        id: u32,
        role: BodyRole,
        size: Vec3,
        location: Mat4,
        linear_velocity: Vec3,
        angular_velocity: f32,
        spin_axis: Vec3,
    ) -> Self {
        let mut body = Self {
            id,
            role,
            center: Vec3::ZERO,
            rotation: Mat3::IDENTITY,
            linear_velocity,
            angular_velocity,
            spin_axis,
            size,
            previous: Snapshot {
                center: Vec3::ZERO,
                rotation: Mat3::IDENTITY,
            },
            drawn_location: Mat4::IDENTITY,
        };
        body.relocate(location, linear_velocity, angular_velocity);
        body
    }

    /// Re-emplace an existing body, dropping its interpolation history
    pub fn relocate(&mut self, location: Mat4, linear_velocity: Vec3, angular_velocity: f32) {
        self.center = location.w_axis.truncate();
        self.rotation = Mat3::from_mat4(location);
        self.previous = Snapshot {
            center: self.center,
            rotation: self.rotation,
        };
        self.linear_velocity = linear_velocity;
        self.angular_velocity = angular_velocity;
        self.drawn_location = self.current_location();
    }

    /// Integrate one fixed step (explicit Euler, spin pre-multiplied)
    pub fn advance(&mut self, dt: f32) {
        self.previous = Snapshot {
            center: self.center,
            rotation: self.rotation,
        };
        self.center += self.linear_velocity * dt;

        let angle = self.angular_velocity * dt;
        if angle != 0.0 {
            if let Some(axis) = self.spin_axis.try_normalize() {
                self.rotation = Mat3::from_axis_angle(axis, angle) * self.rotation;
            }
        }
    }

    /// Component-wise mix of the previous and current rotation basis.
    ///
    /// Not an orientation slerp: large per-step rotations shrink the basis
    /// mid-blend. Steps are short enough that it doesn't show.
    pub fn blend_rotation(&self, alpha: f32) -> Mat3 {
        let prev = self.previous.rotation;
        let cur = self.rotation;
        Mat3::from_cols(
            prev.x_axis.lerp(cur.x_axis, alpha),
            prev.y_axis.lerp(cur.y_axis, alpha),
            prev.z_axis.lerp(cur.z_axis, alpha),
        )
    }

    /// Update `drawn_location` for a render between the last two steps
    pub fn blend_state(&mut self, alpha: f32) {
        let center = self.previous.center.lerp(self.center, alpha);
        self.drawn_location = Mat4::from_translation(center)
            * Mat4::from_mat3(self.blend_rotation(alpha))
            * Mat4::from_scale(self.size);
    }

    /// Un-interpolated transform at the latest step
    pub fn current_location(&self) -> Mat4 {
        Mat4::from_translation(self.center)
            * Mat4::from_mat3(self.rotation)
            * Mat4::from_scale(self.size)
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.role, BodyRole::Projectile(_))
    }

    pub fn projectile_kind(&self) -> Option<ProjectileKind> {
        match self.role {
            BodyRole::Projectile(kind) => Some(kind),
            _ => None,
        }
    }

    /// Below `speed` on every axis
    pub fn is_at_rest(&self, speed: f32) -> bool {
        self.linear_velocity.abs().max_element() < speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_at(center: Vec3, velocity: Vec3, spin: f32) -> Body {
        Body::emplace(
            1,
            BodyRole::Projectile(ProjectileKind::Baseball),
            Vec3::new(0.5, 0.5, 1.0),
            Mat4::from_translation(center),
            velocity,
            spin,
            Vec3::Y,
        )
    }

    #[test]
    fn test_emplace_splits_translation_from_basis() {
        let location = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_rotation_y(0.5)
            * Mat4::from_scale(Vec3::splat(2.0));
        let body = Body::emplace(
            3,
            BodyRole::Bat,
            Vec3::ONE,
            location,
            Vec3::ZERO,
            0.0,
            Vec3::X,
        );
        assert!((body.center - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        assert!(body.rotation.abs_diff_eq(Mat3::from_mat4(location), 1e-5));
        assert!(body.drawn_location.abs_diff_eq(location, 1e-5));
    }

    #[test]
    fn test_advance_records_previous_state() {
        let mut body = ball_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 0.0);
        body.advance(0.05);
        assert_eq!(body.previous.center, Vec3::ZERO);
        assert!((body.center.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_spin_is_pre_multiplied() {
        let mut body = ball_at(Vec3::ZERO, Vec3::ZERO, std::f32::consts::PI);
        body.rotation = Mat3::from_rotation_x(0.3);
        body.advance(0.5);
        let expected =
            Mat3::from_rotation_y(std::f32::consts::FRAC_PI_2) * Mat3::from_rotation_x(0.3);
        assert!(body.rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_zero_spin_axis_is_ignored() {
        let mut body = ball_at(Vec3::ZERO, Vec3::ZERO, 5.0);
        body.spin_axis = Vec3::ZERO;
        body.advance(0.05);
        assert_eq!(body.rotation, Mat3::IDENTITY);
    }

    #[test]
    fn test_blend_endpoints() {
        let mut body = ball_at(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0);
        body.advance(1.0);

        body.blend_state(0.0);
        assert!((body.drawn_location.w_axis.truncate() - Vec3::ZERO).length() < 1e-5);

        body.blend_state(1.0);
        assert!(body.drawn_location.abs_diff_eq(body.current_location(), 1e-5));

        body.blend_state(0.5);
        assert!((body.drawn_location.w_axis.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_blend_rotation_is_component_mix() {
        let mut body = ball_at(Vec3::ZERO, Vec3::ZERO, std::f32::consts::PI);
        // Half a turn in one step: the midpoint basis collapses toward zero
        body.advance(1.0);
        let mid = body.blend_rotation(0.5);
        assert!(mid.x_axis.length() < 1e-3);
        assert!((mid.y_axis - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_at_rest() {
        let body = ball_at(Vec3::ZERO, Vec3::new(0.4, -0.2, 0.49), 0.0);
        assert!(body.is_at_rest(0.5));
        let body = ball_at(Vec3::ZERO, Vec3::new(0.4, -0.6, 0.0), 0.0);
        assert!(!body.is_at_rest(0.5));
    }

    proptest! {
        #[test]
        fn prop_zero_velocity_is_identity(
            x in -50.0f32..50.0, y in -50.0f32..50.0, z in -50.0f32..50.0,
            steps in 1usize..200,
        ) {
            let start = Vec3::new(x, y, z);
            let mut body = ball_at(start, Vec3::ZERO, 0.0);
            body.rotation = Mat3::from_rotation_z(0.7);
            let rotation = body.rotation;
            for _ in 0..steps {
                body.advance(crate::consts::SIM_DT);
            }
            prop_assert_eq!(body.center, start);
            prop_assert_eq!(body.rotation, rotation);
        }

        #[test]
        fn prop_constant_velocity_is_linear(
            vx in -20.0f32..20.0, vy in -20.0f32..20.0, vz in -20.0f32..20.0,
            steps in 1usize..100,
        ) {
            let v = Vec3::new(vx, vy, vz);
            let dt = crate::consts::SIM_DT;
            let mut body = ball_at(Vec3::ZERO, v, 0.0);
            for _ in 0..steps {
                body.advance(dt);
            }
            let expected = v * dt * steps as f32;
            prop_assert!((body.center - expected).length() <= 1e-3 * (1.0 + expected.length()));
        }
    }
}
