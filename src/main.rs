//! Ball Don't Lie entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use ball_dont_lie::Settings;
    use ball_dont_lie::audio::AudioManager;
    use ball_dont_lie::consts::*;
    use ball_dont_lie::renderer::{DrawList, draw_frame};
    use ball_dont_lie::sim::{GamePhase, GameState, Simulation};

    // The page owns meshes, materials and the camera; it gets one packed
    // instance buffer per frame.
    #[wasm_bindgen(inline_js = "
        export function draw_instances(bytes, night) {
            const host = window.ballDontLie;
            if (host && host.draw) {
                host.draw(bytes, night);
            }
        }
    ")]
    extern "C" {
        fn draw_instances(bytes: &[u8], night: bool);
    }

    /// What the HUD last showed, to skip redundant DOM writes
    #[derive(PartialEq)]
    struct HudSnapshot {
        phase: GamePhase,
        score: u32,
        target: u32,
        pitches: i32,
        autoplay: bool,
    }

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        settings: Settings,
        audio: AudioManager,
        draw_list: DrawList,
        last_time: f64,
        last_hud: Option<HudSnapshot>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut state = GameState::new(seed);
            state.night_time = settings.night_time;
            let mut sim = Simulation::new(state);
            sim.time_scale = settings.effective_time_scale();
            Self {
                sim,
                audio: AudioManager::new(&settings),
                settings,
                draw_list: DrawList::default(),
                last_time: 0.0,
                last_hud: None,
            }
        }

        /// Run simulation ticks and react to what happened
        fn update(&mut self, dt: f32) {
            let events = self.sim.frame(dt);
            self.audio.handle(&events);
        }

        /// Flip day and night in the game and remember it for next visit
        fn toggle_night(&mut self) {
            // Two presses inside one tick cancel out, same as the stored value
            self.sim.input.toggle_night = !self.sim.input.toggle_night;
            let night = self.settings.toggle_night();
            self.settings.save();
            log::info!("Night time: {}", night);
        }

        /// Hand the frame to the page
        fn render(&mut self) {
            self.draw_list.clear();
            draw_frame(&self.sim.state, &mut self.draw_list);
            draw_instances(self.draw_list.as_bytes(), self.sim.state.night_time);
        }

        fn update_hud(&mut self) {
            let state = &self.sim.state;
            let snapshot = HudSnapshot {
                phase: state.phase,
                score: state.score,
                target: state.target_score,
                pitches: state.pitch_counter.max(0),
                autoplay: self.sim.input.autoplay,
            };
            if self.last_hud.as_ref() == Some(&snapshot) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            set_text("score", &snapshot.score.to_string());
            set_text("target", &snapshot.target.to_string());
            set_text("pitches", &snapshot.pitches.to_string());
            let status = match snapshot.phase {
                GamePhase::NotStarted => "Press M to play ball",
                GamePhase::Started if snapshot.autoplay => "Autoplay",
                GamePhase::Started => "",
                GamePhase::GameOver => "Game over - press R to try again",
                GamePhase::Won => "Champion! Press R to play again",
            };
            set_text("status", status);

            self.last_hud = Some(snapshot);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ball Don't Lie starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_auto_mute(game.clone());
        request_animation_frame(game);

        log::info!("Ball Don't Lie running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            if matches!(event.key().as_str(), "n" | "N") {
                g.toggle_night();
                return;
            }
            let input = &mut g.sim.input;
            match event.key().as_str() {
                "m" | "M" => input.start = true,
                "r" | "R" => input.restart = true,
                "j" | "J" => input.move_left = true,
                "l" | "L" => input.move_right = true,
                "v" | "V" => input.swing = true,
                "8" => input.force_homerun = true, // Debug: count the pitch in flight as hit
                "i" | "I" => {
                    input.autoplay = !input.autoplay;
                    log::info!("Autoplay: {}", input.autoplay);
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    /// Silence the stadium while the tab is hidden or unfocused
    fn setup_auto_mute(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if !g.settings.mute_on_blur {
                    return;
                }
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                g.audio.set_muted(hidden);
                if hidden {
                    log::info!("Muted (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur / focus
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                    log::info!("Muted (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless autoplay: `ball-dont-lie [tuning.json] [seed]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use ball_dont_lie::Tuning;
    use ball_dont_lie::sim::{GameEvent, GameState, Simulation};

    env_logger::init();
    log::info!("Ball Don't Lie (native) starting...");
    log::info!("Native mode runs a headless autoplay game - serve the wasm build to play");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read tuning file {}", path))?;
            let tuning = Tuning::from_json(&json)
                .with_context(|| format!("failed to load tuning from {}", path))?;
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed
            .parse::<u64>()
            .with_context(|| format!("seed must be an unsigned integer, got {:?}", seed))?,
        None => 0x5eed,
    };

    let mut sim = Simulation::new(GameState::with_tuning(seed, tuning)?);
    sim.input.autoplay = true;

    // 60 fps frames, an hour of game time at most
    const FRAME: f32 = 1.0 / 60.0;
    let mut pitches = 0;
    let mut hits = 0;
    for _ in 0..60 * 60 * 60 {
        for event in sim.frame(FRAME) {
            match event {
                GameEvent::PitchThrown { .. } => pitches += 1,
                GameEvent::Contact { .. } => hits += 1,
                _ => {}
            }
        }
        if sim.state.phase.is_terminal() {
            break;
        }
    }

    println!(
        "{:?}: {} home runs from {} pitches ({} hit), {:.1}s simulated",
        sim.state.phase, sim.state.score, pitches, hits, sim.state.t
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
