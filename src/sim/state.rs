//! Game state and core simulation types
//!
//! Everything a game needs to resume deterministically lives here, RNG included.

use glam::{Mat4, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyRole, ProjectileKind};
use crate::tuning::{Tuning, TuningError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start trigger
    NotStarted,
    /// Pitches are being thrown
    Started,
    /// Out of pitches short of the target, or the bad ball was batted
    GameOver,
    /// Out of pitches with the target reached
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Named audio clips the host plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Title and game-over loop
    Standby,
    /// Victory loop
    Champion,
    /// Crowd cheering
    HomeRun,
    /// Crowd booing
    Boo,
}

/// Something the host should react to, produced by `tick`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    PitchThrown { kind: ProjectileKind, speed: f32 },
    /// Bat met ball (or the debug trigger faked it)
    Contact { kind: ProjectileKind },
    HomeRun { score: u32 },
    Out,
    Play(Cue),
    Pause(Cue),
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Home runs this game
    pub score: u32,
    /// Pitches left; the game ends when this reaches -1
    pub pitch_counter: i32,
    pub target_score: u32,
    /// Batter's lateral offset
    pub batting_x: f32,
    pub night_time: bool,
    /// Simulated seconds since the state was created
    pub t: f32,
    /// Simulated time the current swing began
    pub swing_started_at: Option<f32>,
    /// The projectile in flight has been hit
    pub contact: bool,
    /// The hit projectile has touched the ground
    pub landed: bool,
    /// Earliest simulated time for the next pitch
    pub next_pitch_at: f32,
    /// Bat proxy and projectile, in spawn order
    pub bodies: Vec<Body>,
    /// Title-screen ball shower
    pub ambient: Vec<Body>,
    /// Ambient loop currently playing
    pub ambient_cue: Option<Cue>,
    /// Next entity ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::from_parts(seed, Tuning::default())
    }

    /// Create a new game state with custom tuning. Rejects tuning whose
    /// ranges the pitcher couldn't sample from.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_parts(seed, tuning))
    }

    fn from_parts(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            score: 0,
            pitch_counter: tuning.pitch_count,
            target_score: tuning.target_score,
            batting_x: tuning.batting_x_start,
            night_time: false,
            t: 0.0,
            swing_started_at: None,
            contact: false,
            landed: false,
            next_pitch_at: 0.0,
            bodies: Vec::new(),
            ambient: Vec::new(),
            ambient_cue: None,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fresh match: score, counter and target back to their starting values.
    /// The batter keeps their position and the sky keeps its time of day.
    pub fn reset_match(&mut self) {
        self.score = 0;
        self.pitch_counter = self.tuning.pitch_count;
        self.target_score = self.tuning.target_score;
        self.clear_field();
        self.next_pitch_at = self.t + self.tuning.pitch_cooldown;
    }

    /// Drop the bat and projectile along with their latches
    pub fn clear_field(&mut self) {
        self.bodies.clear();
        self.swing_started_at = None;
        self.contact = false;
        self.landed = false;
    }

    pub fn bat(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.role == BodyRole::Bat)
    }

    pub fn projectile(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_projectile())
    }

    pub fn projectile_mut(&mut self) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.is_projectile())
    }

    /// Seconds into the current swing, `None` outside the swing window
    pub fn swing_elapsed(&self) -> Option<f32> {
        let d = self.t - self.swing_started_at?;
        (d < self.tuning.swing_duration).then_some(d)
    }

    /// Place (or re-place) the bat proxy at `location`
    pub fn emplace_bat(&mut self, location: Mat4) {
        let size = Vec3::from(crate::consts::BAT_PROXY_SIZE);
        if let Some(bat) = self.bodies.iter_mut().find(|b| b.role == BodyRole::Bat) {
            bat.relocate(location, Vec3::ZERO, 0.0);
            return;
        }
        let id = self.next_entity_id();
        self.bodies
            .push(Body::emplace(id, BodyRole::Bat, size, location, Vec3::ZERO, 0.0, Vec3::Y));
    }

    /// Pitch a ball. Ignored while another projectile is in flight.
    pub fn spawn_projectile(
        &mut self,
        kind: ProjectileKind,
        location: Mat4,
        velocity: Vec3,
    ) -> bool {
        if self.projectile().is_some() {
            return false;
        }
        let id = self.next_entity_id();
        let size = Vec3::from(crate::consts::PROJECTILE_SIZE);
        self.bodies.push(Body::emplace(
            id,
            BodyRole::Projectile(kind),
            size,
            location,
            velocity,
            0.0,
            Vec3::Y,
        ));
        true
    }
}
