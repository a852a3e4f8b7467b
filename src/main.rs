//! Multiple Hunt entry point
//!
//! Wires the page to the game rules on the web and runs a headless demo natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlSelectElement, MouseEvent};

    use multiple_hunt::GameConfig;
    use multiple_hunt::ScoreCookie;
    use multiple_hunt::audio::{AudioManager, SoundEffect};
    use multiple_hunt::dom_ids;
    use multiple_hunt::platform::View;
    use multiple_hunt::score::load_last_score;
    use multiple_hunt::sim::{
        BallStatus, GameEvent, GameState, Level, Outcome, finish_round, start_round, tick,
        verify_ball,
    };

    /// Game instance: the model plus everything the page needs
    struct Game {
        state: GameState,
        view: View,
        audio: AudioManager,
        /// Handle and callback of the movement interval
        ticker: Option<(i32, Closure<dyn FnMut()>)>,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig, view: View) -> Self {
            let audio = AudioManager::new(config.effective_volume(), config.error_sound_url.clone());
            Self {
                state: GameState::new(seed, config),
                view,
                audio,
                ticker: None,
            }
        }

        /// Start a round at the selected level
        fn start(&mut self, level_text: &str) -> Result<(), JsValue> {
            let level = Level::parse(level_text, self.state.config.max_level)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;

            self.view.remove_by_id(dom_ids::START_BUTTON);
            let field = self.view.field_size();
            start_round(&mut self.state, level, field)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            self.apply_events()
        }

        /// One movement step
        fn on_tick(&mut self) {
            tick(&mut self.state);
            self.view.move_balls(&self.state.balls);
        }

        fn on_ball_click(&mut self, id: u32) -> Result<(), JsValue> {
            match verify_ball(&mut self.state, id) {
                Ok(_) => self.apply_events(),
                Err(e) => {
                    log::debug!("Click on ball {} ignored: {}", id, e);
                    Ok(())
                }
            }
        }

        fn on_end_click(&mut self) -> Result<(), JsValue> {
            match finish_round(&mut self.state) {
                Ok(_) => self.apply_events(),
                Err(e) => {
                    log::warn!("End of round ignored: {}", e);
                    Ok(())
                }
            }
        }

        /// Mirror model changes on the page
        fn apply_events(&mut self) -> Result<(), JsValue> {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::RoundStarted { target, life, .. } => {
                        self.view.show_target(target);
                        self.view.show_life(life);
                        self.view.spawn_balls(&self.state.balls)?;
                    }
                    GameEvent::BallCleared { id } => {
                        self.view.set_ball_status(id, BallStatus::Correct);
                        self.view.remove_ball(id);
                        self.audio.play(SoundEffect::Clear);
                    }
                    GameEvent::BallMissed { id, life } => {
                        self.view.set_ball_status(id, BallStatus::Error);
                        self.view.show_life(life);
                        self.audio.play(SoundEffect::Miss);
                    }
                    GameEvent::LifeDepleted => {
                        log::info!("Out of life, ending round");
                    }
                    GameEvent::RoundEnded(outcome) => self.end_round(outcome)?,
                }
            }
            Ok(())
        }

        fn stop_animation(&mut self) {
            if let Some((handle, _callback)) = self.ticker.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }

        fn end_round(&mut self, outcome: Outcome) -> Result<(), JsValue> {
            self.stop_animation();
            self.view.clear_balls();
            self.view.remove_background_audio();

            match outcome {
                Outcome::Won { score } => {
                    self.view.show_winner(score)?;
                    self.audio.play(SoundEffect::Win);
                }
                Outcome::Lost { .. } => {
                    self.view.show_loser()?;
                    self.audio.play(SoundEffect::Lose);
                }
            }
            ScoreCookie::from_outcome(&outcome).store();

            setup_restart_button(&self.view)?;
            self.view.remove_by_id(dom_ids::END_BUTTON);
            Ok(())
        }
    }

    fn selected_level() -> String {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(dom_ids::LEVEL_SELECT))
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|select| select.value())
            .unwrap_or_else(|| "1".into())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Multiple Hunt starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let config = GameConfig::load();
        let view = View::new(document, config.ball_size)?;
        view.center_in_field(dom_ids::START_BUTTON);
        view.show_last_score(load_last_score());

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, config, view)));
        log::info!("Game initialized with seed: {}", seed);

        setup_start_button(game.clone())?;
        setup_ball_clicks(game)?;

        Ok(())
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let btn = document
            .get_element_by_id(dom_ids::START_BUTTON)
            .ok_or_else(|| JsValue::from_str("missing #juego"))?;

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let level = selected_level();
            if let Err(e) = game.borrow_mut().start(&level) {
                log::error!("Could not start round: {:?}", e);
                return;
            }
            if let Err(e) = start_animation(game.clone()) {
                log::error!("Could not start animation: {:?}", e);
            }
            if let Err(e) = setup_end_button(game.clone()) {
                log::error!("Could not wire end button: {:?}", e);
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Move the balls every `tick_interval_ms` until the round ends
    fn start_animation(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let interval = game.borrow().state.config.tick_interval_ms as i32;

        let ticking = game.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            ticking.borrow_mut().on_tick();
        });
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval,
        )?;
        game.borrow_mut().ticker = Some((handle, callback));
        Ok(())
    }

    /// One listener on the field handles every ball
    fn setup_ball_clicks(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let field = game.borrow().view.field().clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let Some(id) = View::ball_id_of(&target) else {
                return;
            };
            if let Err(e) = game.borrow_mut().on_ball_click(id) {
                log::error!("Ball click failed: {:?}", e);
            }
        });
        field.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_end_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let Some(btn) = document.get_element_by_id(dom_ids::END_BUTTON) else {
            log::warn!("#{} not found, round can only end by losing all life", dom_ids::END_BUTTON);
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Err(e) = game.borrow_mut().on_end_click() {
                log::error!("Ending round failed: {:?}", e);
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Replay by reloading the page
    fn setup_restart_button(view: &View) -> Result<(), JsValue> {
        let btn = view.create_button("VOLVER A JUGAR", dom_ids::RESTART_BUTTON)?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Multiple Hunt (native) starting...");
    log::info!("The game needs a browser - build for wasm32 and serve the page to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let level = args.next().unwrap_or_else(|| "1".into());

    println!("\nRunning demo rounds (seed {}, level {})...", seed, level);
    for careful in [true, false] {
        match demo_round(seed, &level, careful) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("demo failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Play a round headlessly: a careful player clicks only multiples, a
/// careless one clicks balls in order until the round is decided.
#[cfg(not(target_arch = "wasm32"))]
fn demo_round(seed: u64, level: &str, careful: bool) -> Result<String, multiple_hunt::GameError> {
    use glam::Vec2;
    use multiple_hunt::sim::{
        GameState, Level, RoundPhase, finish_round, start_round, tick, verify_ball,
    };
    use multiple_hunt::{GameConfig, ScoreCookie};

    let config = GameConfig::load();
    let level = Level::parse(level, config.max_level)?;
    let mut state = GameState::new(seed, config);
    start_round(&mut state, level, Vec2::new(800.0, 600.0))?;

    let target = state.target;
    let ids: Vec<u32> = state
        .balls
        .iter()
        .filter(|b| !careful || b.is_multiple_of(target))
        .map(|b| b.id)
        .collect();
    for id in ids {
        if !state.is_playing() {
            break;
        }
        verify_ball(&mut state, id)?;
        tick(&mut state);
    }

    let outcome = match state.phase {
        RoundPhase::Finished(outcome) => outcome,
        _ => finish_round(&mut state)?,
    };
    let cookie = ScoreCookie::from_outcome(&outcome);
    cookie.store();

    Ok(format!(
        "{} player, target {}: {:?} -> {}",
        if careful { "careful" } else { "careless" },
        target,
        outcome,
        cookie.header(cookie.expired.then_some("<100 days ago>"))
    ))
}
