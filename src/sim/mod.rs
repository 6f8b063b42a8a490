//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ambient;
pub mod body;
pub mod clock;
pub mod collision;
pub mod rig;
pub mod state;
pub mod tick;

pub use body::{Body, BodyRole, ProjectileKind, Snapshot};
pub use clock::Simulation;
pub use collision::{Collider, IntersectTest, intersect_cube, intersect_sphere};
pub use state::{Cue, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
