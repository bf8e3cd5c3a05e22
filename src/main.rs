//! Hero Flight entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent, Window,
    };

    use hero_flight::audio::{AudioManager, playback_for};
    use hero_flight::consts::SIM_DT;
    use hero_flight::platform::{
        DeviceProfile, FrameHandle, FrameHost, FrameLoop, LocalStore, TouchThrottle,
        command_for_key, command_for_pointer,
    };
    use hero_flight::renderer::CanvasRenderer;
    use hero_flight::renderer::sprites::SpriteSheet;
    use hero_flight::sim::{GameEvent, GamePhase};
    use hero_flight::ui::{Controls, FpsCounter};
    use hero_flight::{Command, Game, QualityPreset, Settings, Tuning};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// requestAnimationFrame through one shared callback
    struct BrowserFrames {
        window: Window,
        callback: FrameCallback,
    }

    impl FrameHost for BrowserFrames {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            let callback = self.callback.borrow();
            let closure = callback.as_ref()?;
            self.window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok()
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    /// Browser app holding all state
    struct App {
        game: Game<LocalStore>,
        renderer: CanvasRenderer,
        audio: AudioManager,
        frames: FrameLoop,
        host: BrowserFrames,
        document: Document,
        board: HtmlCanvasElement,
        throttle: TouchThrottle,
        fps: FpsCounter,
        last_time: f64,
    }

    impl App {
        /// Apply a player command and bring the screen up to date
        fn command(&mut self, command: Command) {
            let events = self.game.handle(command);
            self.dispatch(&events);
            self.sync_frames();
            self.draw();
        }

        /// One animation frame: simulate, draw, re-arm
        fn frame(&mut self, time: f64) {
            self.frames.on_frame();

            let quality = self.game.settings().quality;
            if quality == QualityPreset::Low && self.last_time > 0.0 {
                // Capped devices skip callbacks that come too early
                if time - self.last_time < quality.min_frame_ms() {
                    self.frames.arm(&mut self.host);
                    return;
                }
            }

            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            let events = self.game.advance(dt);
            self.dispatch(&events);
            self.fps.record(time);
            self.draw();
            if self.game.wants_frames() {
                self.frames.arm(&mut self.host);
            }
        }

        /// Start or stop the frame chain after a command. A restarted chain
        /// measures its first delta from scratch.
        fn sync_frames(&mut self) {
            if self.game.wants_frames() {
                if !self.frames.is_pending() {
                    self.last_time = 0.0;
                    self.frames.arm(&mut self.host);
                }
            } else {
                self.frames.halt(&mut self.host);
            }
        }

        fn dispatch(&mut self, events: &[GameEvent]) {
            let phase = self.game.phase();
            for event in events {
                if let GameEvent::SoundToggled { enabled } = event {
                    self.audio.set_enabled(*enabled);
                }
                self.audio.apply(&playback_for(event, phase));
                log::debug!("{event:?}");
            }
        }

        fn draw(&self) {
            let fps = Some(self.fps.fps()).filter(|_| self.game.settings().show_fps);
            self.renderer.render(self.game.state(), fps);
            self.update_controls();
        }

        /// Show/hide DOM screens and buttons for the current phase
        fn update_controls(&self) {
            let controls = Controls::for_phase(self.game.phase(), self.game.settings().sound_enabled);
            set_visible(&self.document, "start-screen", controls.start_screen);
            set_visible(&self.document, "pause-btn", controls.pause_button);
            set_visible(&self.document, "pause-overlay", controls.pause_overlay);
            set_visible(&self.document, "game-over", controls.game_over);
            set_all_visible(&self.document, ".sound-on", controls.sound_on);
            set_all_visible(&self.document, ".sound-off", !controls.sound_on);
        }

        fn resize(&mut self) {
            let rect = self.board.get_bounding_client_rect();
            let dpr = self.host.window.device_pixel_ratio();
            self.renderer
                .resize(rect.width(), rect.height(), dpr, self.game.settings().quality);
            self.draw();
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn set_all_visible(document: &Document, selector: &str, visible: bool) {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        }
    }

    /// Clicks and touches on buttons are handled by the buttons themselves
    fn targets_control(target: Option<web_sys::EventTarget>) -> bool {
        target
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".game-control").ok().flatten())
            .is_some()
    }

    /// Optional balance overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(err) => {
                log::warn!("{err}, using defaults");
                Tuning::default()
            }
        }
    }

    fn canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Hero Flight starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let device = DeviceProfile::detect();
        let seed = js_sys::Date::now() as u64;
        let game = Game::with_default_settings(
            seed,
            LocalStore::open(),
            load_tuning(&document),
            Settings::from_preset(device.default_preset()),
        );
        log::info!("Seed: {seed}, quality: {}", game.settings().quality.as_str());

        let board = canvas(&document, "board")?;
        let ui = canvas(&document, "ui")?;
        let renderer = CanvasRenderer::new(board.clone(), ui, SpriteSheet::load("./images")?)?;
        let audio = AudioManager::new("./sounds", game.settings().sound_enabled);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            audio,
            frames: FrameLoop::new(),
            host: BrowserFrames {
                window: window.clone(),
                callback: callback.clone(),
            },
            document: document.clone(),
            board,
            throttle: TouchThrottle::for_device(device.ios_like),
            fps: FpsCounter::default(),
            last_time: 0.0,
        }));

        {
            let app = app.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                app.borrow_mut().frame(time);
            }));
        }

        setup_keyboard(&window, app.clone())?;
        setup_pointer(&document, app.clone())?;
        setup_buttons(&document, app.clone())?;
        setup_auto_pause(&window, &document, app.clone())?;
        setup_resize(&window, app.clone())?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        app.borrow_mut().resize();
        log::info!("Hero Flight running!");
        Ok(())
    }

    fn setup_keyboard(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let code = event.code();
            let phase = app.borrow().game.phase();
            if matches!(code.as_str(), "Space" | "ArrowUp") {
                // Keep the page from scrolling
                event.prevent_default();
            }
            if let Some(command) = command_for_key(&code, phase) {
                app.borrow_mut().command(command);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_pointer(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if targets_control(event.target()) {
                    return;
                }
                let phase = app.borrow().game.phase();
                if let Some(command) = command_for_pointer(phase) {
                    app.borrow_mut().command(command);
                }
            });
            document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start (throttled, suppresses the synthetic click)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if targets_control(event.target()) {
                    return;
                }
                event.prevent_default();
                let now = js_sys::Date::now();
                let mut app = app.borrow_mut();
                if !app.throttle.accept(now) {
                    return;
                }
                if let Some(command) = command_for_pointer(app.game.phase()) {
                    app.command(command);
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let buttons = [
            ("#start-btn", Command::Start),
            ("#restart-btn", Command::Restart),
            ("#pause-btn", Command::TogglePause),
            ("#play-btn", Command::Resume),
            (".sound-toggle", Command::ToggleMute),
        ];
        for (selector, command) in buttons {
            let nodes = document.query_selector_all(selector)?;
            for i in 0..nodes.length() {
                let Some(node) = nodes.item(i) else { continue };
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.stop_propagation();
                    app.borrow_mut().command(command);
                });
                node.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }
        Ok(())
    }

    fn setup_auto_pause(
        window: &Window,
        document: &Document,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut app = app.borrow_mut();
                    if app.game.phase() == GamePhase::Running {
                        app.command(Command::TogglePause);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut app = app.borrow_mut();
                if app.game.phase() == GamePhase::Running {
                    app.command(Command::TogglePause);
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        for event in ["resize", "orientationchange"] {
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        }
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);

    log::info!("Hero Flight (native) starting: headless demo, seed {seed}, {seconds}s");
    native::run_demo(seed, seconds);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use hero_flight::consts::SIM_DT;
    use hero_flight::platform::MemoryStore;
    use hero_flight::sim::GameEvent;
    use hero_flight::{Command, Game, Tuning};

    /// Let the autopilot play for `seconds` of simulated time
    pub fn run_demo(seed: u64, seconds: u32) {
        let mut game = Game::new(seed, MemoryStore::new(), Tuning::default());
        game.handle(Command::ToggleDemo);

        let mut runs = 0;
        let mut best = 0;
        for _ in 0..seconds * 60 {
            for event in game.advance(SIM_DT) {
                match event {
                    GameEvent::Crashed { cause, score } => {
                        runs += 1;
                        best = best.max(score);
                        log::info!("Run {runs} ended by {cause:?} with score {score}");
                    }
                    GameEvent::LevelUp { level } => log::info!("Level {level}"),
                    _ => log::trace!("{event:?}"),
                }
            }
        }

        let state = game.state();
        println!(
            "seed {seed}: {runs} finished runs, best {best}, current score {} (phase {:?})",
            state.display_score(),
            state.phase
        );
    }
}
