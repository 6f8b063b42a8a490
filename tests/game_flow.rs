//! Whole-game flows driven through the public API

use ball_dont_lie::consts::{AUTOPLAY_LEAD, AUTOPLAY_STRIKE_Z, SIM_DT};
use ball_dont_lie::sim::{
    BodyRole, Cue, GameEvent, GamePhase, GameState, ProjectileKind, Simulation, TickInput, tick,
};
use glam::Vec3;

const MAX_TICKS: usize = 20_000;

fn start(state: &mut GameState) -> Vec<GameEvent> {
    let input = TickInput {
        start: true,
        ..Default::default()
    };
    tick(state, &input, SIM_DT)
}

fn pitches_thrown(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::PitchThrown { .. }))
        .count()
}

/// Turn the pitch in flight into a baseball about to land beyond the fence
fn fake_home_run(state: &mut GameState) {
    state.contact = true;
    if let Some(ball) = state.projectile_mut() {
        ball.role = BodyRole::Projectile(ProjectileKind::Baseball);
        ball.center = Vec3::new(0.0, -9.8, -200.0);
        ball.linear_velocity = Vec3::new(0.0, -5.0, -1.0);
    }
}

#[test]
fn test_no_swings_is_game_over() {
    let mut state = GameState::new(2024);
    let mut events = start(&mut state);
    assert_eq!(state.phase, GamePhase::Started);
    assert_eq!(state.pitch_counter, 20);

    let input = TickInput::default();
    for _ in 0..MAX_TICKS {
        events.extend(tick(&mut state, &input, SIM_DT));
        if state.phase != GamePhase::Started {
            break;
        }
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.score, 0);
    assert_eq!(state.pitch_counter, -1);
    assert_eq!(pitches_thrown(&events), 20);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Contact { .. })));
    assert_eq!(events.last(), Some(&GameEvent::Play(Cue::Standby)));
}

/// Swing when the baseball in flight is about to reach the plate
fn swing_now(state: &GameState) -> bool {
    if state.contact || state.swing_started_at.is_some() {
        return false;
    }
    state.projectile().is_some_and(|ball| {
        let v = ball.linear_velocity;
        ball.projectile_kind() == Some(ProjectileKind::Baseball)
            && v.z > 0.0
            && (AUTOPLAY_STRIKE_Z - ball.center.z) / v.z <= AUTOPLAY_LEAD
    })
}

#[test]
fn test_timed_swings_hit_real_pitches() {
    let (mut contacts, mut home_runs, mut outs) = (0, 0, 0);
    for seed in 100..108 {
        let mut state = GameState::new(seed);
        start(&mut state);
        for _ in 0..MAX_TICKS {
            let input = TickInput {
                swing: swing_now(&state),
                ..Default::default()
            };
            for event in tick(&mut state, &input, SIM_DT) {
                match event {
                    GameEvent::Contact { .. } => contacts += 1,
                    GameEvent::HomeRun { .. } => home_runs += 1,
                    GameEvent::Out => outs += 1,
                    _ => {}
                }
            }
            if state.phase != GamePhase::Started {
                break;
            }
        }
    }
    assert!(contacts > 0, "no swing connected");
    assert!(home_runs > 0);
    assert!(home_runs + outs <= contacts);
}

#[test]
fn test_three_home_runs_win() {
    let mut state = GameState::new(99);
    let mut events = start(&mut state);

    let input = TickInput::default();
    for _ in 0..MAX_TICKS {
        events.extend(tick(&mut state, &input, SIM_DT));
        if state.phase != GamePhase::Started {
            break;
        }
        if state.score < 3 && !state.contact && state.projectile().is_some() {
            fake_home_run(&mut state);
        }
    }

    assert_eq!(state.phase, GamePhase::Won);
    assert_eq!(state.score, 3);
    assert_eq!(pitches_thrown(&events), 20);
    let home_runs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::HomeRun { .. }))
        .count();
    assert_eq!(home_runs, 3);
    assert!(events.contains(&GameEvent::Play(Cue::Champion)));
}

#[test]
fn test_restart_after_game_over() {
    let mut state = GameState::new(5);
    start(&mut state);
    state.pitch_counter = 0;
    state.next_pitch_at = 0.0;
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.phase, GamePhase::GameOver);

    let input = TickInput {
        restart: true,
        ..Default::default()
    };
    let events = tick(&mut state, &input, SIM_DT);
    assert_eq!(state.phase, GamePhase::Started);
    assert_eq!(state.score, 0);
    assert_eq!(state.pitch_counter, 20);
    assert!(events.contains(&GameEvent::Pause(Cue::Standby)));
}

#[test]
fn test_wall_clock_frames_reach_the_end() {
    let mut sim = Simulation::new(GameState::new(7));
    sim.input.start = true;

    let mut pitches = 0;
    // Uneven frame times, including hitches past the clamp
    let frames = [1.0 / 60.0, 1.0 / 30.0, 0.25, 1.0 / 144.0];
    for i in 0..MAX_TICKS * 4 {
        pitches += pitches_thrown(&sim.frame(frames[i % frames.len()]));
        if sim.state.phase.is_terminal() {
            break;
        }
    }
    assert_eq!(sim.state.phase, GamePhase::GameOver);
    assert_eq!(pitches, 20);
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let mut state = GameState::new(seed);
        let input = TickInput {
            autoplay: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..3000 {
            events.extend(tick(&mut state, &input, SIM_DT));
        }
        (events, state.score, state.pitch_counter)
    };
    assert_eq!(run(31), run(31));
}
