//! Lane Runner entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use lane_runner::audio::AudioManager;
    use lane_runner::renderer::Renderer;
    use lane_runner::{Game, GameError, InputEvent, Tuning};

    /// Browser host: the session plus the bits of page state it drives
    struct Host {
        game: Game<Renderer>,
        audio: AudioManager,
        /// Whether a rAF callback is already scheduled
        looping: bool,
    }

    type SharedHost = Rc<RefCell<Host>>;

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn show_fatal(err: &GameError) {
        log::error!("Fatal: {err}");
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            set_text(&document, "error", &err.to_string());
            set_visible(&document, "error", true);
            set_visible(&document, "loading", false);
        }
    }

    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Lane Runner starting...");

        if let Err(e) = start().await {
            show_fatal(&e);
        }
    }

    async fn start() -> Result<(), GameError> {
        let window = web_sys::window().ok_or_else(|| GameError::Host("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::Host("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| GameError::Host("no canvas element".into()))?;

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        // WebGPU where available, WebGL2 otherwise
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::NoAdapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut renderer = Renderer::new(surface, &adapter, width, height).await?;
        renderer.register_procedural_textures();

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::with_config(renderer, Tuning::default(), seed);
        log::info!("Game initialized with seed: {}", seed);

        bind_hud(&mut game, &document);

        let host = Rc::new(RefCell::new(Host {
            game,
            audio: AudioManager::new(),
            looping: false,
        }));

        setup_input_handlers(host.clone());
        setup_resize(&canvas, host.clone());
        setup_auto_pause(host.clone());

        set_visible(&document, "loading", false);
        set_visible(&document, "start-prompt", true);

        // Draw the idle scene once so the canvas is not blank
        host.borrow_mut().game.render();

        log::info!("Lane Runner ready");
        Ok(())
    }

    /// Wire the session observers to the HUD elements
    fn bind_hud(game: &mut Game<Renderer>, document: &Document) {
        {
            let document = document.clone();
            game.on_score_update(move |score| set_text(&document, "score", &score.to_string()));
        }
        {
            let document = document.clone();
            game.on_lives_update(move |lives| set_text(&document, "lives", &lives.to_string()));
        }
        {
            let document = document.clone();
            game.on_pause(move |paused| set_visible(&document, "pause-menu", paused));
        }
        {
            let document = document.clone();
            game.on_game_over(move |score| {
                set_text(&document, "final-score", &score.to_string());
                set_visible(&document, "game-over", true);
            });
        }
    }

    fn update_high_score(host: &Host) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let best = host
            .game
            .high_score()
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        set_text(&document, "high-score", &best);
        set_text(
            &document,
            "difficulty",
            if host.game.hard_difficulty() { "Hard" } else { "Normal" },
        );
    }

    fn start_run(host: &SharedHost) {
        {
            let mut h = host.borrow_mut();
            h.audio.resume();
            h.game.start();
            update_high_score(&h);
        }
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            set_visible(&document, "start-prompt", false);
            set_visible(&document, "game-over", false);
            set_visible(&document, "hud", true);
        }
        ensure_loop(host.clone());
    }

    fn setup_input_handlers(host: SharedHost) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if key == "m" || key == "M" {
                let muted = host.borrow_mut().audio.toggle_muted();
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    set_visible(&document, "muted", muted);
                }
                return;
            }

            let (running, paused) = {
                let h = host.borrow();
                (h.game.is_running(), h.game.is_paused())
            };

            if !running && !paused {
                match key.as_str() {
                    "Enter" => start_run(&host),
                    "h" | "H" => {
                        let mut h = host.borrow_mut();
                        let hard = !h.game.hard_difficulty();
                        h.game.set_hard_difficulty(hard);
                        update_high_score(&h);
                    }
                    _ => {}
                }
                return;
            }

            let Some(input) = InputEvent::from_key(&key) else {
                return;
            };
            event.prevent_default();
            {
                let mut h = host.borrow_mut();
                h.game.handle_input(input);
                let events = h.game.drain_events();
                h.audio.play_events(&events);
            }
            // Resuming needs the frame loop back
            if input == InputEvent::TogglePause {
                ensure_loop(host.clone());
            }
        });
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, host: SharedHost) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_pixel_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            let mut h = host.borrow_mut();
            h.game.resize(width, height);
            if !h.looping {
                h.game.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(host: SharedHost) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Tab switch or minimize
        {
            let host = host.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut h = host.borrow_mut();
                    if h.game.is_running() {
                        h.game.toggle_pause();
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

        // Click outside the page
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut h = host.borrow_mut();
                if h.game.is_running() {
                    h.game.toggle_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn ensure_loop(host: SharedHost) {
        {
            let mut h = host.borrow_mut();
            if h.looping {
                return;
            }
            h.looping = true;
        }
        request_animation_frame(host);
    }

    fn request_animation_frame(host: SharedHost) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: SharedHost, time: f64) {
        let keep_going = {
            let mut h = host.borrow_mut();
            let keep_going = h.game.frame(time);
            let events = h.game.drain_events();
            h.audio.play_events(&events);
            if h.game.is_game_over() {
                update_high_score(&h);
            }
            h.looping = keep_going;
            keep_going
        };

        if keep_going {
            request_animation_frame(host);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Native build: no window, so play a scripted run against the headless renderer
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::consts::SIM_DT;
    use lane_runner::game::DEFAULT_SEED;
    use lane_runner::renderer::HeadlessRenderer;
    use lane_runner::{Game, InputEvent, Tuning};

    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    log::info!("Native mode renders headless - serve the wasm build for the real game");

    // Usage: lane-runner [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut game = Game::with_config(HeadlessRenderer::default(), tuning, seed);
    game.on_game_over(|score| log::info!("Game over, final score {score}"));
    game.start();

    // Weave between lanes and hop every couple of seconds
    let script = [
        InputEvent::MoveLeft,
        InputEvent::Jump,
        InputEvent::MoveRight,
        InputEvent::MoveRight,
        InputEvent::Jump,
        InputEvent::MoveLeft,
    ];
    let mut now_ms = 0.0;
    let mut frame = 0usize;
    while game.frame(now_ms) && frame < 60 * 120 {
        if frame % 90 == 0 {
            game.handle_input(script[(frame / 90) % script.len()]);
        }
        now_ms += f64::from(SIM_DT) * 1000.0;
        frame += 1;
    }

    println!(
        "seed {seed}: score {} after {:.1}s, {} lives left, {} frames rendered",
        game.score(),
        game.state().elapsed,
        game.lives(),
        game.renderer().frames,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
