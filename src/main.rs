//! Aim Trainer entry point
//!
//! Mounts the trainer on the page and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, MouseEvent};

    use aim_trainer::audio::AudioManager;
    use aim_trainer::{AimGame, AimView, Settings, platform};

    /// Page instance holding the trainer and render caches
    struct Page {
        game: AimGame<AudioManager>,
        // Last rendered ids, to avoid rebuilding DOM every frame
        rendered_explosions: Vec<u32>,
        rendered_results: Option<(bool, usize, f64)>,
    }

    impl Page {
        fn new(settings: Settings, seed: u64) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                game: AimGame::new(settings, seed, audio),
                rendered_explosions: Vec::new(),
                rendered_results: None,
            }
        }

        /// Push the current view into the DOM
        fn render(&mut self, document: &Document) {
            let view = self.game.view();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&view.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("clicks") {
                el.set_text_content(Some(&view.total_clicks.to_string()));
            }

            if let Some(target) = element(document, "target") {
                let style = target.style();
                if view.show_target {
                    let _ = style.set_property("display", "block");
                    let _ = style.set_property("left", &format!("{}%", view.target_x));
                    let _ = style.set_property("top", &format!("{}%", view.target_y));
                } else {
                    let _ = style.set_property("display", "none");
                }
            }

            if let Some(el) = document.get_element_by_id("start-btn") {
                let label = if view.round_over { "Play again" } else { "Start" };
                el.set_text_content(Some(label));
            }

            self.render_explosions(document, &view);
            self.render_results(document, &view);
        }

        fn render_explosions(&mut self, document: &Document, view: &AimView) {
            let ids: Vec<u32> = view.explosions.iter().map(|e| e.id).collect();
            if ids == self.rendered_explosions {
                return;
            }
            if let Some(container) = document.get_element_by_id("explosions") {
                let html: String = view
                    .explosions
                    .iter()
                    .map(|e| {
                        format!(
                            "<div class=\"explosion\" style=\"left:{}%;top:{}%\"></div>",
                            e.pos.x, e.pos.y
                        )
                    })
                    .collect();
                container.set_inner_html(&html);
            }
            self.rendered_explosions = ids;
        }

        fn render_results(&mut self, document: &Document, view: &AimView) {
            let newest = self
                .game
                .controller()
                .results()
                .latest()
                .map(|r| r.timestamp_ms)
                .unwrap_or(0.0);
            let key = (view.show_results, view.results_sorted.len(), newest);
            if self.rendered_results == Some(key) {
                return;
            }

            if let Some(panel) = element(document, "results") {
                let display = if view.show_results { "block" } else { "none" };
                let _ = panel.style().set_property("display", display);
            }
            if let Some(body) = document.get_element_by_id("results-body") {
                let rows: String = view
                    .results_sorted
                    .iter()
                    .map(|r| {
                        format!(
                            "<tr><td>{}</td><td>{:.2}%</td><td>{:.2}s</td><td>{:.2}s</td><td>{}</td></tr>",
                            r.score, r.accuracy, r.speed, r.time, r.date
                        )
                    })
                    .collect();
                body.set_inner_html(&rows);
            }
            self.rendered_results = Some(key);
        }
    }

    fn element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    /// Optional JSON override in `data-settings` on the play area
    fn load_settings(document: &Document) -> Settings {
        document
            .get_element_by_id("play-area")
            .and_then(|el| el.get_attribute("data-settings"))
            .map(|json| Settings::from_json(&json))
            .unwrap_or_default()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Aim Trainer starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = load_settings(&document);
        let seed = platform::seed();
        let page = Rc::new(RefCell::new(Page::new(settings, seed)));
        log::info!("Trainer mounted with seed: {}", seed);

        setup_input_handlers(&document, page.clone());
        page.borrow_mut().render(&document);

        request_animation_frame(page);

        log::info!("Aim Trainer running!");
    }

    fn setup_input_handlers(document: &Document, page: Rc<RefCell<Page>>) {
        // Target click - hit (stop so the play area doesn't also see a miss)
        if let Some(target) = document.get_element_by_id("target") {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                page.borrow_mut().game.hit_target(platform::monotonic_ms());
            });
            let _ = target
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Play area click - miss
        if let Some(area) = document.get_element_by_id("play-area") {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                page.borrow_mut().game.miss_target(platform::monotonic_ms());
            });
            let _ = area
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Start button
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut p = page.borrow_mut();
                // First user gesture: allowed to unlock audio now
                p.game.feedback().sink().resume();
                p.game.start_game(platform::monotonic_ms());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Results toggle
        if let Some(btn) = document.get_element_by_id("results-btn") {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                page.borrow_mut().game.toggle_results();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: M toggles mute
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), "m" | "M") {
                    let mut p = page.borrow_mut();
                    let now_muted = p.game.feedback_mut().sink_mut().toggle_muted();
                    log::info!("Muted: {}", now_muted);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
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
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let mut p = page.borrow_mut();
            p.game.update(platform::monotonic_ms());
            p.render(&document);
        }

        request_animation_frame(page);
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
    use aim_trainer::{AimGame, Settings, SilentSink, platform};

    env_logger::init();
    log::info!("Aim Trainer (native) starting...");
    log::info!("Native mode has no display - run with `trunk serve` for the web version");

    // Scripted headless round: a miss, a timeout, then steady hits
    let mut game = AimGame::new(Settings::default(), platform::seed(), SilentSink);
    let mut now = 0.0;
    game.start_game(now);
    now += 250.0;
    game.miss_target(now);
    now += 3000.0;
    game.update(now);
    while !game.view().round_over {
        now += 420.0;
        game.update(now);
        game.hit_target(now);
    }

    for r in game.view().results_sorted {
        println!(
            "score {:>2}  accuracy {:>6.2}%  speed {:.2}s  time {:.2}s  {}",
            r.score, r.accuracy, r.speed, r.time, r.date
        );
    }
}
