//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec3;
use log::{debug, info};
use rand::Rng;

use super::ambient;
use super::body::{BodyRole, ProjectileKind};
use super::collision::Collider;
use super::rig;
use super::state::{Cue, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Begin a game from the title screen
    pub start: bool,
    /// Start over from any phase
    pub restart: bool,
    pub toggle_night: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub swing: bool,
    /// Debug: treat the pitch in flight as hit
    pub force_homerun: bool,
    /// Demo mode - the computer bats. Held, not cleared after a tick.
    pub autoplay: bool,
}

impl TickInput {
    /// Clear the triggers that fire once per key press
    pub fn clear_one_shots(&mut self) {
        *self = TickInput {
            autoplay: self.autoplay,
            ..Default::default()
        };
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let mut input = input.clone();
    if input.autoplay {
        autoplay(state, &mut input);
    }

    if input.toggle_night {
        state.night_time = !state.night_time;
    }

    if input.restart || (input.start && state.phase == GamePhase::NotStarted) {
        begin_match(state, &mut events);
    }

    if state.phase == GamePhase::Started {
        play(state, &input, dt, &mut events);
    } else {
        ambient::step(state, dt);
    }

    sync_ambient_cue(state, &mut events);
    state.t += dt;
    events
}

fn begin_match(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.reset_match();
    state.ambient.clear();
    set_phase(state, GamePhase::Started, events);
    info!(
        "Match started: {} pitches, {} home runs to win",
        state.pitch_counter, state.target_score
    );
}

fn set_phase(state: &mut GameState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    state.phase = to;
    if to.is_terminal() {
        state.clear_field();
        info!("Game ended ({:?}) with {} home runs", to, state.score);
    }
    events.push(GameEvent::PhaseChanged { from, to });
}

/// One step of an active match
fn play(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    if input.move_left {
        state.batting_x = (state.batting_x - tuning.batting_x_step).max(tuning.batting_x_min);
    }
    if input.move_right {
        state.batting_x = (state.batting_x + tuning.batting_x_step).min(tuning.batting_x_max);
    }
    if input.swing && state.swing_elapsed().is_none() {
        state.swing_started_at = Some(state.t);
    }
    if input.force_homerun && !state.contact {
        if let Some(kind) = state.projectile().and_then(|b| b.projectile_kind()) {
            state.contact = true;
            debug!("Forced contact on {:?}", kind);
            events.push(GameEvent::Contact { kind });
        }
    }

    pitch(state, events);
    if state.phase != GamePhase::Started {
        return;
    }

    // The bat proxy only exists for the length of a swing
    match state.swing_elapsed() {
        Some(d) => state.emplace_bat(rig::bat_proxy_transform(state.batting_x, Some(d))),
        None => {
            state.swing_started_at = None;
            state.bodies.retain(|b| b.role != BodyRole::Bat);
        }
    }

    // Collisions are tested on the latest step, not a render blend
    for body in &mut state.bodies {
        body.blend_state(1.0);
    }
    detect_contact(state, events);

    if state.contact {
        fly(state, dt, events);
        if state.phase != GamePhase::Started {
            return;
        }
    }

    for body in &mut state.bodies {
        body.advance(dt);
        body.blend_state(1.0);
    }

    clear_projectile(state);
}

/// Throw the next pitch once the previous one is gone and the cooldown ran out
fn pitch(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.projectile().is_some() || state.t < state.next_pitch_at || state.pitch_counter <= -1 {
        return;
    }

    state.pitch_counter -= 1;
    if state.pitch_counter < 0 {
        let to = if state.score >= state.target_score {
            GamePhase::Won
        } else {
            GamePhase::GameOver
        };
        set_phase(state, to, events);
        return;
    }

    let tuning = &state.tuning;
    let speed = state.rng.random_range(tuning.pitch_speed_min..tuning.pitch_speed_max) as f32;
    let k = state.rng.random_range(tuning.pitch_lateral_min..tuning.pitch_lateral_max) as f32;
    let lateral = tuning.pitch_lateral_bias + tuning.pitch_lateral_step * k;
    let kind = if state.rng.random_bool(0.5) {
        ProjectileKind::Basketball
    } else {
        ProjectileKind::Baseball
    };

    let velocity = Vec3::new(lateral, 0.0, speed);
    if state.spawn_projectile(kind, rig::release_transform(), velocity) {
        debug!(
            "Pitch {:?} at {:.0} ({} left)",
            kind, speed, state.pitch_counter
        );
        events.push(GameEvent::PitchThrown { kind, speed });
    }
}

fn detect_contact(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.contact {
        return;
    }
    let (Some(bat), Some(ball)) = (state.bat(), state.projectile()) else {
        return;
    };
    let collider = Collider::sphere(COLLIDER_SUBDIVISIONS, state.tuning.collider_leeway);
    if !(bat.check_if_colliding(ball, &collider) || ball.check_if_colliding(bat, &collider)) {
        return;
    }
    let Some(kind) = ball.projectile_kind() else {
        return;
    };
    state.contact = true;
    if let Some(ball) = state.projectile_mut() {
        ball.angular_velocity = 0.0;
    }
    debug!("Contact with {:?}", kind);
    events.push(GameEvent::Contact { kind });
}

/// A hit projectile takes off, falls, bounces and lands once
fn fly(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let tuning = state.tuning.clone();
    let batted = state.projectile().is_some_and(|b| {
        b.projectile_kind() == Some(ProjectileKind::Baseball) && b.linear_velocity.z > 0.0
    });
    let lift = if batted {
        state.rng.random_range(tuning.hit_lift_min..=tuning.hit_lift_max) as f32
    } else {
        0.0
    };

    let already_landed = state.landed;
    let Some(ball) = state.projectile_mut() else {
        return;
    };

    if batted {
        let z = ball.center.z;
        ball.linear_velocity.x = (z + 2.0) * 6.0;
        ball.linear_velocity.y += lift;
        ball.linear_velocity.z *= -(z.abs() * 3.0).min(tuning.hit_depth_gain_cap);
    }

    ball.linear_velocity.y -= GRAVITY * dt;

    let mut landing = None;
    if ball.center.y < tuning.ground_height && ball.linear_velocity.y < 0.0 {
        if !already_landed {
            landing = ball.projectile_kind().map(|kind| (kind, ball.center));
        }
        let d = tuning.bounce_damping;
        ball.linear_velocity *= Vec3::new(d, -d, d);
        ball.angular_velocity *= BOUNCE_SPIN_DAMPING;
    }
    if ball.linear_velocity.length() < GROUND_SETTLE_SPEED && ball.center.y < tuning.ground_height {
        ball.linear_velocity.y = 0.0;
    }

    let Some((kind, at)) = landing else {
        return;
    };
    state.landed = true;

    if kind == ProjectileKind::Basketball {
        info!("Batted the bad ball");
        set_phase(state, GamePhase::GameOver, events);
        return;
    }

    let (x, z) = (at.x.abs(), at.z.abs());
    if x < tuning.fence_half_width && z > tuning.fence_depth - x {
        state.score += 1;
        info!("Home run! {} of {}", state.score, state.target_score);
        events.push(GameEvent::HomeRun { score: state.score });
        events.push(GameEvent::Play(Cue::HomeRun));
    } else {
        debug!("Out at ({:.1}, {:.1})", at.x, at.z);
        events.push(GameEvent::Out);
        events.push(GameEvent::Play(Cue::Boo));
    }
}

/// Drop a projectile that left the field or came to rest, arming the next pitch
fn clear_projectile(state: &mut GameState) {
    let tuning = &state.tuning;
    let contact = state.contact;
    let before = state.bodies.len();
    state.bodies.retain(|b| {
        if !b.is_projectile() {
            return true;
        }
        let distance = b.center.length();
        if contact {
            distance < tuning.batted_radius && !b.is_at_rest(tuning.rest_speed)
        } else {
            distance < tuning.live_radius
        }
    });
    if state.bodies.len() == before {
        return;
    }

    if !contact {
        debug!("Pitch went by");
    }
    state.contact = false;
    state.landed = false;
    state.next_pitch_at = state.t + state.tuning.pitch_cooldown;
}

/// Ambient loop follows the phase; only changes produce events
fn sync_ambient_cue(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let wanted = match state.phase {
        GamePhase::NotStarted | GamePhase::GameOver => Some(Cue::Standby),
        GamePhase::Won => Some(Cue::Champion),
        GamePhase::Started => None,
    };
    if wanted == state.ambient_cue {
        return;
    }
    if let Some(old) = state.ambient_cue {
        events.push(GameEvent::Pause(old));
    }
    if let Some(new) = wanted {
        events.push(GameEvent::Play(new));
    }
    state.ambient_cue = wanted;
}

/// Demo player: starts the game and swings at baseballs on a fixed lead
fn autoplay(state: &GameState, input: &mut TickInput) {
    if state.phase == GamePhase::NotStarted {
        input.start = true;
        return;
    }
    if state.phase != GamePhase::Started || state.swing_started_at.is_some() || state.contact {
        return;
    }
    let Some(ball) = state.projectile() else {
        return;
    };
    if ball.projectile_kind() != Some(ProjectileKind::Baseball) || ball.linear_velocity.z <= 0.0 {
        return;
    }
    let eta = (AUTOPLAY_STRIKE_Z - ball.center.z) / ball.linear_velocity.z;
    if eta <= AUTOPLAY_LEAD {
        input.swing = true;
    }
}
