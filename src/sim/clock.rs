//! Frame-driven fixed timestep
//!
//! Wall-clock frame time goes in, whole `SIM_DT` ticks come out, and the
//! leftover fraction blends every body for rendering.

use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::consts::*;

/// A game plus the accumulator that drives it
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: GameState,
    /// Pending input, one-shots cleared after each tick
    pub input: TickInput,
    /// Multiplier on wall-clock time. Negative values are treated as zero.
    pub time_scale: f32,
    accumulator: f32,
    steps_taken: u64,
}

impl Simulation {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            time_scale: 1.0,
            accumulator: 0.0,
            steps_taken: 0,
        }
    }

    /// Run the ticks owed for `frame_time` seconds, then blend for drawing
    pub fn frame(&mut self, frame_time: f32) -> Vec<GameEvent> {
        let scaled = (frame_time * self.time_scale).max(0.0);
        self.accumulator += scaled.min(MAX_FRAME_TIME);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(tick(&mut self.state, &self.input, SIM_DT));
            self.accumulator -= SIM_DT;
            self.steps_taken += 1;
            substeps += 1;

            self.input.clear_one_shots();
        }

        let alpha = self.alpha();
        for body in self.state.bodies.iter_mut().chain(self.state.ambient.iter_mut()) {
            body.blend_state(alpha);
        }
        events
    }

    /// Fraction of a tick waiting in the accumulator
    pub fn alpha(&self) -> f32 {
        (self.accumulator / SIM_DT).min(1.0)
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }
}
