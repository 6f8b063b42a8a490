//! Ball Don't Lie - batting practice with a twist
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (bodies, collisions, game state)
//! - `renderer`: Draw list handed to the host page's renderer
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (20 Hz, interpolated for rendering)
    pub const SIM_DT: f32 = 1.0 / 20.0;
    /// Longest frame the accumulator will take in one go
    pub const MAX_FRAME_TIME: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration applied to batted and ambient balls
    pub const GRAVITY: f32 = 9.8;
    /// Spin kept per ground bounce
    pub const BOUNCE_SPIN_DAMPING: f32 = 0.5;
    /// Below this speed a grounded ball stops bouncing
    pub const GROUND_SETTLE_SPEED: f32 = 2.0;
    /// Sample-sphere subdivision levels for the bat/ball test
    pub const COLLIDER_SUBDIVISIONS: u32 = 2;

    /// Pitched ball scale (baseball and basketball share the same proxy)
    pub const PROJECTILE_SIZE: [f32; 3] = [0.5, 0.5, 1.0];
    /// Bat proxy collision scale. The proxy inherits the bat's own scale, so
    /// its reach covers the whole barrel.
    pub const BAT_PROXY_SIZE: [f32; 3] = [1.0, 1.0, 1.0];
    /// Cylinder drawn along the proxy's axis
    pub const BAT_CYLINDER_SIZE: [f32; 3] = [0.08, 0.08, 0.4];

    /// Autoplay swings once the pitch is this close (seconds) to `AUTOPLAY_STRIKE_Z`
    pub const AUTOPLAY_LEAD: f32 = 0.5;
    pub const AUTOPLAY_STRIKE_Z: f32 = -4.5;

    /// Ambient title-screen shower
    pub const AMBIENT_MAX_BALLS: usize = 15;
    pub const AMBIENT_SPAWN: [f32; 3] = [0.0, 530.0, -20.0];
    pub const AMBIENT_SPAWN_SPREAD: f32 = 10.0;
    pub const AMBIENT_FLOOR: f32 = 480.0;
    pub const AMBIENT_BOUNCE: f32 = 0.8;
    pub const AMBIENT_CULL_RADIUS: f32 = 530.0;
    pub const AMBIENT_MIN_SPEED: f32 = 2.0;
}

/// Offset every component by a uniform value in `[-spread/2, spread/2)`
#[inline]
pub fn jitter<R: Rng + ?Sized>(v: Vec3, spread: f32, rng: &mut R) -> Vec3 {
    v + Vec3::new(
        spread * (rng.random::<f32>() - 0.5),
        spread * (rng.random::<f32>() - 0.5),
        spread * (rng.random::<f32>() - 0.5),
    )
}

/// Uniformly random unit vector (rejection sampled inside the unit cube)
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = jitter(Vec3::ZERO, 2.0, rng);
        if let Some(n) = v.try_normalize() {
            if v.length_squared() <= 1.0 {
                return n;
            }
        }
    }
}
