//! Lane Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use lane_dash::audio::{AudioManager, SoundEffect};
    use lane_dash::sim::{GamePhase, GameState, autopilot, tick};
    use lane_dash::{Action, HighScores, HudSnapshot};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioManager,
        high_scores: HighScores,
        last_time: f64,
        /// Rank of the last finished run, shown on the game-over overlay
        last_rank: Option<usize>,
        last_phase: GamePhase,
        /// Idle/demo mode - autopilot plays the game
        idle_mode: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                audio: AudioManager::new(),
                high_scores: HighScores::new(),
                last_time: 0.0,
                last_rank: None,
                last_phase: GamePhase::Running,
                idle_mode: false,
            }
        }

        /// Run one simulation frame
        fn update(&mut self, dt: f32) {
            if self.idle_mode {
                if let Some(action) = autopilot::choose_action(&self.state) {
                    self.state.apply(action);
                }
            }

            tick(&mut self.state, dt);

            let events = self.state.drain_events();
            self.audio.play_events(&events);

            // Record the run once, on the transition into game over
            let current_phase = self.state.phase;
            if current_phase != self.last_phase {
                if current_phase == GamePhase::GameOver {
                    let hud = HudSnapshot::from_state(&self.state);
                    self.last_rank = self.high_scores.record_run(&hud);
                    if self.last_rank == Some(1) {
                        self.audio.play(SoundEffect::HighScore);
                    }
                }
                self.last_phase = current_phase;
            }
        }

        fn apply(&mut self, action: Action) {
            self.audio.resume();
            if self.state.apply(action) {
                // Restart and pause toggles happen outside tick
                let events = self.state.drain_events();
                self.audio.play_events(&events);
                self.last_phase = self.state.phase;
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = HudSnapshot::from_state(&self.state);

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.score_text()));
            }

            if let Some(el) = document.query_selector("#hud-speed .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.speed_text()));
            }

            if let Some(el) = document.query_selector("#hud-distance .hud-value").ok().flatten() {
                el.set_text_content(Some(&hud.distance_text()));
            }

            if let Some(el) = document.get_element_by_id("pause-menu") {
                let class = if hud.paused() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if hud.game_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&hud.score_text()));
                    }
                    if let Some(rank_el) = document.get_element_by_id("final-rank") {
                        let text = match self.last_rank {
                            Some(rank) => format!("#{}", rank),
                            None => "-".to_string(),
                        };
                        rank_el.set_text_content(Some(&text));
                    }
                    if let Some(best_el) = document.get_element_by_id("best-score") {
                        let best = self.high_scores.top_score().unwrap_or(0);
                        best_el.set_text_content(Some(&best.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Lane Dash starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Lane Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.repeat() {
                return;
            }
            let key = event.key();
            let mut g = game.borrow_mut();
            if key == "i" || key == "I" {
                g.idle_mode = !g.idle_mode;
                log::info!("Idle mode: {}", g.idle_mode);
                return;
            }
            if key == "m" || key == "M" {
                let muted = g.audio.toggle_muted();
                log::info!("Muted: {}", muted);
                return;
            }
            if let Some(action) = Action::from_key(&key) {
                event.prevent_default();
                g.apply(action);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // First frame has no delta; tick clamps long stalls
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().apply(Action::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Running {
                        g.state.pause();
                        g.last_phase = g.state.phase;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Running {
                    g.state.pause();
                    g.last_phase = g.state.phase;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_dash::sim::{GameEvent, GameState, autopilot, tick};
    use lane_dash::{HudSnapshot, Tuning};

    // Simulated frame rate and run length for the headless demo
    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_SECONDS: u32 = 180;

    env_logger::init();
    log::info!("Lane Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    // Usage: lane-dash [seed] [tuning.json]
    let args: Vec<String> = std::env::args().collect();
    let seed = args
        .get(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);
    let tuning = match args.get(2) {
        Some(path) => match Tuning::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let mut state = GameState::with_tuning(tuning, seed);
    log::info!("Seed: {}", seed);

    let mut frames = 0u32;
    let mut recycled = 0u32;
    while frames < MAX_SECONDS * 60 && !state.is_game_over() {
        if let Some(action) = autopilot::choose_action(&state) {
            state.apply(action);
        }
        tick(&mut state, FRAME_DT);
        frames += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::TileRecycled { .. } => recycled += 1,
                GameEvent::Crashed { id } => log::info!("Crashed into obstacle {}", id),
                other => log::debug!("{:?}", other),
            }
        }
    }

    let hud = HudSnapshot::from_state(&state);
    let outcome = if hud.game_over() { "crashed" } else { "survived" };
    println!(
        "Run {} after {:.1}s: score {}, distance {}, speed {}, pickups {}, tiles recycled {}",
        outcome,
        frames as f32 * FRAME_DT,
        hud.score_text(),
        hud.distance_text(),
        hud.speed_text(),
        hud.collected,
        recycled
    );
    match serde_json::to_string_pretty(&state.session) {
        Ok(json) => log::info!("Final session:\n{}", json),
        Err(e) => log::warn!("Could not serialize session: {}", e),
    }
}
