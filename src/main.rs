//! Coin Blitz entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use coin_blitz::assets::ImageStore;
    use coin_blitz::audio::{AudioManager, SoundEffect};
    use coin_blitz::render::CanvasSurface;
    use coin_blitz::sim::{Game, GameEvent, MusicTrack};
    use coin_blitz::{GameConfig, Settings};
    use glam::Vec2;

    /// Application context holding everything alive for the page's lifetime
    struct App {
        game: Game,
        surface: CanvasSurface,
        audio: AudioManager,
        last_time: f64,
        started: bool,
    }

    impl App {
        /// One animation frame: dt from the wall clock, unclamped
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.game.advance(dt);
            self.dispatch_events();
            self.game.render(&mut self.surface);
        }

        /// Map simulation events onto the audio layer
        fn dispatch_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::ShotFired => self.audio.play_sound(SoundEffect::Shot),
                    GameEvent::PlayerHit => self.audio.play_sound(SoundEffect::Hit),
                    GameEvent::MonsterKilled => self.audio.play_sound(SoundEffect::Death),
                    GameEvent::CoinCollected { .. } => self.audio.play_sound(SoundEffect::Coin),
                    GameEvent::Music(track) => self.audio.play_music(track),
                    GameEvent::GameOver => {}
                }
            }
        }

        fn start(&mut self) {
            if !self.started {
                self.started = true;
                self.audio.resume();
                self.game.start();
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Coin Blitz starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();

        // Best-effort image preload; missing sprites render as silhouettes.
        let images = ImageStore::load_all().await;
        let catalog = images.catalog();

        let surface = CanvasSurface::new(canvas.clone(), images).expect("canvas surface");

        let mut config = GameConfig::default();
        config.ui.show_fps = settings.show_fps;
        if !settings.particles {
            config.fx.player_hit_particles = 0;
            config.fx.monster_kill_particles = 0;
            config.fx.coin_particles = 0;
        }

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(config, catalog, seed);
        log::info!("Game initialized with seed: {}", seed);

        let mut audio = AudioManager::new();
        audio.set_music_volume(settings.music_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.play_music(MusicTrack::Menu);

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            audio,
            last_time: 0.0,
            started: false,
        }));

        // Hide loading indicator once assets settled.
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&canvas, app.clone());
        setup_menu_buttons(app.clone());
        setup_auto_pause(app.clone(), settings.pause_on_blur);
        setup_resize(app.clone());

        // Pages without a menu jump straight into the round.
        if document.get_element_by_id("startBtn").is_none() {
            app.borrow_mut().start();
        }

        request_animation_frame(app);

        log::info!("Coin Blitz running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let name = event.key().to_lowercase();
                let mut a = app.borrow_mut();

                match name.as_str() {
                    "p" => {
                        if a.started {
                            a.game.pause();
                        }
                        return;
                    }
                    "m" => {
                        a.audio.toggle_mute();
                        return;
                    }
                    _ => {}
                }

                if a.game.input.press_name(&name) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let name = event.key().to_lowercase();
                app.borrow_mut().game.input.release_name(&name);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse aim, canvas-local coordinates
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                app.borrow_mut().game.input.set_pointer(Vec2::new(x, y));
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.game.input.set_pointer_down(true);
            });
            let _ = document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.input.set_pointer_down(false);
            });
            let _ = document
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: drag aims, contact fires
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let mut a = app.borrow_mut();
                    a.game.input.set_pointer(Vec2::new(x, y));
                    a.game.input.set_pointer_down(true);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    app.borrow_mut().game.input.set_pointer(Vec2::new(x, y));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.input.set_pointer_down(false);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Menu wiring: start, difficulty, and mute buttons are all optional in
    /// the page; missing elements are simply skipped.
    fn setup_menu_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.play_sound(SoundEffect::ButtonClick);
                a.start();

                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(menu) = document.get_element_by_id("menuScreen") {
                    let _ = menu.set_attribute("class", "hidden");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (id, name) in [
            ("easyBtn", "easy"),
            ("normalBtn", "normal"),
            ("hardBtn", "hard"),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut a = app.borrow_mut();
                    a.audio.play_sound(SoundEffect::ButtonClick);
                    a.game.set_difficulty(name);
                    log::info!("Difficulty set to {}", name);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("muteBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.play_sound(SoundEffect::ButtonClick);
                let muted = a.audio.toggle_mute();
                log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>, enabled: bool) {
        if !enabled {
            return;
        }

        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                if a.started && a.game.phase() == coin_blitz::sim::GamePhase::Running {
                    a.game.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().surface.handle_resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app.clone());
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use coin_blitz::assets::SpriteCatalog;
    use coin_blitz::render::NullSurface;
    use coin_blitz::sim::{Game, GameEvent, Key};
    use coin_blitz::GameConfig;

    env_logger::init();
    log::info!("Coin Blitz (native) starting headless demo...");

    let mut game = Game::new(GameConfig::default(), SpriteCatalog::new(), 0xC01B);
    let mut surface = NullSurface;
    game.start();

    // Hold fire and drift right for ten simulated seconds at 60 fps.
    game.input.press(Key::Fire);
    game.input.press(Key::Right);
    game.input.set_pointer(glam::Vec2::new(600.0, 300.0));

    let mut kills = 0u32;
    for _ in 0..600 {
        game.advance(1000.0 / 60.0);
        for event in game.drain_events() {
            if event == GameEvent::MonsterKilled {
                kills += 1;
            }
        }
        game.render(&mut surface);
    }

    log::info!(
        "Demo finished: score {}, kills {}, monsters on field {}, phase {:?}",
        game.score,
        kills,
        game.spawn.monsters.len(),
        game.phase()
    );
    println!("score: {} (kills: {})", game.score, kills);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
