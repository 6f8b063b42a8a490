//! Title-screen ball shower
//!
//! Runs whenever no game is in progress: balls are dropped high above the
//! stadium, bounce off an invisible floor and are recycled once they drift
//! out or run out of energy.

use glam::{Mat4, Vec3};
use rand::Rng;

use super::body::{Body, BodyRole};
use super::state::GameState;
use crate::consts::*;
use crate::{jitter, random_unit_vector};

/// One fixed step of the shower: top up, apply gravity and bounce, cull, move
pub fn step(state: &mut GameState, dt: f32) {
    while state.ambient.len() < AMBIENT_MAX_BALLS {
        let id = state.next_entity_id();
        let ball = spawn(id, &mut state.rng);
        state.ambient.push(ball);
    }

    for ball in &mut state.ambient {
        ball.linear_velocity.y -= GRAVITY * dt;
        if ball.center.y < AMBIENT_FLOOR && ball.linear_velocity.y < 0.0 {
            ball.linear_velocity.y *= -AMBIENT_BOUNCE;
        }
    }

    state.ambient.retain(|b| {
        b.center.length() < AMBIENT_CULL_RADIUS && b.linear_velocity.length() > AMBIENT_MIN_SPEED
    });

    for ball in &mut state.ambient {
        ball.advance(dt);
        ball.blend_state(1.0);
    }
}

fn spawn<R: Rng + ?Sized>(id: u32, rng: &mut R) -> Body {
    let at = jitter(Vec3::from(AMBIENT_SPAWN), AMBIENT_SPAWN_SPREAD, rng);
    let velocity = jitter(Vec3::NEG_Y, 2.0, rng).normalize_or_zero() * 3.0;
    let size = Vec3::new(1.0, 1.0 + rng.random::<f32>(), 1.0);
    let spin = rng.random::<f32>();
    let axis = random_unit_vector(rng);
    Body::emplace(id, BodyRole::Ambient, size, Mat4::from_translation(at), velocity, spin, axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_is_capped() {
        let mut state = GameState::new(3);
        for _ in 0..500 {
            step(&mut state, SIM_DT);
            assert!(state.ambient.len() <= AMBIENT_MAX_BALLS);
        }
    }

    #[test]
    fn test_survivors_are_in_bounds() {
        let mut state = GameState::new(5);
        for _ in 0..200 {
            step(&mut state, SIM_DT);
            for ball in &state.ambient {
                assert_eq!(ball.role, BodyRole::Ambient);
                // Culled before the move, so at most one step past the radius
                let reach = AMBIENT_CULL_RADIUS + ball.linear_velocity.length() * SIM_DT;
                assert!(ball.center.length() < reach + 1e-3);
            }
        }
    }

    #[test]
    fn test_balls_bounce_off_the_floor() {
        let mut state = GameState::new(8);
        let mut ball = spawn(99, &mut state.rng);
        ball.center = Vec3::new(0.0, AMBIENT_FLOOR - 1.0, 0.0);
        ball.linear_velocity = Vec3::new(0.0, -10.0, 0.0);
        state.ambient = vec![ball];
        step(&mut state, SIM_DT);
        let ball = state.ambient.iter().find(|b| b.id == 99).unwrap();
        assert!(ball.linear_velocity.y > 0.0);
    }

    #[test]
    fn test_slow_balls_are_recycled() {
        let mut state = GameState::new(8);
        let mut ball = spawn(99, &mut state.rng);
        ball.center = Vec3::new(0.0, 500.0, 0.0);
        ball.linear_velocity = Vec3::new(0.5, 0.0, 0.0);
        state.ambient = vec![ball];
        step(&mut state, SIM_DT);
        assert!(state.ambient.iter().all(|b| b.id != 99));
    }
}
