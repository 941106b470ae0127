//! Mini Arcade entry point
//!
//! On the web this hosts the slime toy on a 2D canvas. Natively it runs
//! every toy headless for a few seconds of frames and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_slime {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use mini_arcade::frame_loop::FrameLoop;
    use mini_arcade::platform::{self, LocalStore};
    use mini_arcade::slime::SlimeSim;
    use mini_arcade::slime::pointer::to_canvas;
    use mini_arcade::Settings;

    /// Page instance holding all state
    struct Page {
        sim: SlimeSim,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        frame_loop: FrameLoop,
    }

    /// Size the canvas to its container and return the new size
    fn size_to_parent(canvas: &HtmlCanvasElement) -> (f32, f32) {
        if let Some(parent) = canvas.parent_element() {
            canvas.set_width(parent.client_width().max(0) as u32);
            canvas.set_height(parent.client_height().max(0) as u32);
        }
        (canvas.width() as f32, canvas.height() as f32)
    }

    impl Page {
        /// Match the canvas to its container
        fn fit_canvas(&mut self) {
            let (w, h) = size_to_parent(&self.canvas);
            self.sim.resize(w, h);
        }

        /// Client coordinates to canvas space
        fn local(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            to_canvas(
                Vec2::new(client_x as f32, client_y as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
            )
        }

        fn render(&self) {
            let ctx = &self.ctx;
            ctx.clear_rect(
                0.0,
                0.0,
                self.sim.state.width as f64,
                self.sim.state.height as f64,
            );

            let particles = self.sim.field.particles();

            if self.settings.links {
                ctx.set_line_width(1.0);
                for link in self.sim.links() {
                    let (a, b) = (&particles[link.a], &particles[link.b]);
                    ctx.begin_path();
                    ctx.set_stroke_style_str(&format!("rgba(100, 200, 255, {})", link.alpha));
                    ctx.move_to(a.pos.x as f64, a.pos.y as f64);
                    ctx.line_to(b.pos.x as f64, b.pos.y as f64);
                    ctx.stroke();
                }
            }

            for p in particles {
                let [r, g, b, a] = p.color;
                ctx.begin_path();
                let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, p.radius as f64, 0.0, TAU);
                ctx.set_fill_style_str(&format!(
                    "rgba({}, {}, {}, {})",
                    (r * 255.0).round(),
                    (g * 255.0).round(),
                    (b * 255.0).round(),
                    a
                ));
                ctx.fill();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Slime starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("slimeCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = match LocalStore::open() {
            Ok(store) => Settings::load(&store),
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Settings::default()
            }
        };

        // Scatter over the real container, not the default 300x150 canvas
        let (width, height) = size_to_parent(&canvas);
        let sim = SlimeSim::new(width, height, &settings, platform::time_seed());

        let page = Rc::new(RefCell::new(Page {
            sim,
            settings,
            canvas: canvas.clone(),
            ctx,
            frame_loop: FrameLoop::new(),
        }));

        setup_resize(page.clone());
        setup_pointer_handlers(&canvas, page.clone());
        setup_buttons(page.clone());

        request_animation_frame(page);

        log::info!("Slime running!");
    }

    fn setup_resize(page: Rc<RefCell<Page>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            page.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, page: Rc<RefCell<Page>>) {
        // Mouse down / move
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut p = page.borrow_mut();
                let pos = p.local(event.client_x(), event.client_y());
                p.sim.press(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut p = page.borrow_mut();
                let pos = p.local(event.client_x(), event.client_y());
                p.sim.pointer_moved(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leave
        for name in ["mouseup", "mouseleave"] {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                page.borrow_mut().sim.release();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut p = page.borrow_mut();
                    let pos = p.local(touch.client_x(), touch.client_y());
                    p.sim.press(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut p = page.borrow_mut();
                    let pos = p.local(touch.client_x(), touch.client_y());
                    p.sim.pointer_moved(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                page.borrow_mut().sim.release();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(page: Rc<RefCell<Page>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                page.borrow_mut().sim.reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("physics-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut p = page.borrow_mut();
                let enabled = p.sim.toggle_physics();
                p.settings.physics_enabled = enabled;

                if let Some(label) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("physicsBtnText"))
                {
                    let text = if enabled { "Disable physics" } else { "Enable physics" };
                    label.set_text_content(Some(text));
                }

                if let Ok(mut store) = LocalStore::open() {
                    if let Err(e) = p.settings.save(&mut store) {
                        log::warn!("Could not save settings: {}", e);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(page: Rc<RefCell<Page>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(page);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(page: Rc<RefCell<Page>>) {
        let again = {
            let mut guard = page.borrow_mut();
            let p = &mut *guard;
            let sim = &mut p.sim;
            let again = p.frame_loop.frame(|| sim.tick());
            if again {
                p.render();
            }
            again
        };

        if again {
            request_animation_frame(page);
        } else {
            log::info!("Slime loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_slime::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mini Arcade (native) starting...");
    log::info!("Browser hosting requires a wasm32 build; running headless demos");

    demo::slime();
    demo::runner();
    demo::woodfish();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use mini_arcade::frame_loop::FrameLoop;
    use mini_arcade::platform::{self, MemoryStore};
    use mini_arcade::runner::{RunnerEvent, RunnerInput, RunnerState, tick as runner_tick};
    use mini_arcade::slime::SlimeSim;
    use mini_arcade::woodfish::{AccountBook, RankingKind, ranking};
    use mini_arcade::{HighScore, Settings};

    /// Stir the slime in a circle for ten seconds of frames
    pub fn slime() {
        let store = MemoryStore::new();
        let settings = Settings::load(&store);
        let mut sim = SlimeSim::new(640.0, 480.0, &settings, platform::time_seed());

        let mut frame_loop = FrameLoop::new();
        let frames = frame_loop.run_for(600, |frame| {
            let angle = frame as f32 * 0.05;
            let cursor = Vec2::new(320.0 + angle.cos() * 150.0, 240.0 + angle.sin() * 100.0);
            match frame {
                0 => sim.press(cursor),
                300 => sim.release(),
                _ => sim.pointer_moved(cursor),
            }
            sim.tick();
        });

        log::info!(
            "Slime: {} frames, kinetic energy {:.3}, {} links",
            frames,
            sim.field.kinetic_energy(),
            sim.links().count()
        );
    }

    /// Let a naive bot jump whenever a cactus gets close
    pub fn runner() {
        let mut store = MemoryStore::new();
        let mut state =
            RunnerState::new(platform::time_seed()).with_high_score(HighScore::load(&store));
        state.start();

        let mut frame_loop = FrameLoop::new();
        let token = frame_loop.token();
        frame_loop.run_for(10_000, |_| {
            let dino_right = state.dino.rect.right();
            let jump = state
                .obstacles
                .iter()
                .any(|o| o.rect.pos.x > dino_right && o.rect.pos.x - dino_right < state.speed * 6.0);
            let input = RunnerInput {
                jump,
                ..Default::default()
            };

            for event in runner_tick(&mut state, &input) {
                match event {
                    RunnerEvent::Collided { score } => {
                        log::info!("Runner: game over with {}", score);
                        token.stop();
                    }
                    RunnerEvent::NewHighScore { score } => {
                        log::info!("Runner: new best {}", score);
                        if let Err(e) = state.high_score.save(&mut store) {
                            log::warn!("Could not save high score: {}", e);
                        }
                    }
                    RunnerEvent::ObstaclePassed { .. } => {}
                }
            }
        });

        log::info!(
            "Runner: score {}, {} frames, best {}",
            state.score,
            state.frame_count,
            state.high_score.best()
        );
    }

    /// A few players knocking the fish
    pub fn woodfish() {
        let mut store = MemoryStore::new();
        let mut book = AccountBook::load(&store);
        let mut rng = Pcg32::seed_from_u64(platform::time_seed());
        let now = platform::now_ms();

        for (name, knocks) in [("ada", 23), ("lin", 41), ("", 0)] {
            if let Err(e) = book.login(name, now) {
                log::warn!("Login rejected: {}", e);
                continue;
            }
            for _ in 0..knocks {
                book.knock();
            }
        }
        book.guest_login(&mut rng, now);
        book.knock();

        if let Err(e) = book.save(&mut store) {
            log::warn!("Could not save accounts: {}", e);
        }

        for (rank, user) in ranking(&book, RankingKind::Daily, now).iter().enumerate() {
            log::info!(
                "Wooden fish #{}: {} - {} knocks (level {})",
                rank + 1,
                user.name,
                user.total_count,
                user.level
            );
        }
    }
}
