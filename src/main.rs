//! Vein Guardian entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Element, EventTarget, HtmlCanvasElement, HtmlImageElement,
        KeyboardEvent, TouchEvent,
    };

    use vein_guardian::consts::*;
    use vein_guardian::render::{self, AssetStore, DrawList, Heart, Shape, palette};
    use vein_guardian::sim::{
        GameEvent, GameState, HAZARD_CATALOG, InputSampler, PICKUP_CATALOG, PointerTarget,
    };
    use vein_guardian::{LoopDriver, Tuning};

    /// Images requested up front; drawn only once loaded
    struct SpriteSheet {
        images: HashMap<&'static str, HtmlImageElement>,
    }

    impl SpriteSheet {
        fn load() -> Result<Self, JsValue> {
            let mut keys: Vec<&'static str> = vec![
                "player-up",
                "player-down",
                "player-left",
                "player-right",
                "heart-full",
                "heart-half",
                render::BACKGROUND_SPRITE,
            ];
            keys.extend(HAZARD_CATALOG.iter().map(|h| h.sprite));
            keys.extend(PICKUP_CATALOG.iter().map(|p| p.sprite));

            let mut images = HashMap::new();
            for key in keys {
                let img = HtmlImageElement::new()?;
                img.set_src(&format!("assets/{}.png", key));
                images.insert(key, img);
            }
            Ok(Self { images })
        }

        fn get(&self, key: &str) -> Option<&HtmlImageElement> {
            self.images.get(key)
        }
    }

    impl AssetStore for SpriteSheet {
        fn is_ready(&self, key: &str) -> bool {
            self.get(key)
                .is_some_and(|img| img.complete() && img.natural_width() > 0)
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputSampler,
        driver: LoopDriver,
        ctx: CanvasRenderingContext2d,
        sprites: SpriteSheet,
        /// Canvas pixels per logical pixel
        scale: f32,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let step = self.driver.frame(time, &mut self.state, &mut self.input);

            for event in self.state.drain_events() {
                self.handle_event(&event);
            }
            if let Some(remaining) = step.remaining {
                set_text("hud-timer", &format!("{:.0}", remaining.ceil()));
            }
            if step.draw {
                let list = render::build_draw_list(&self.state, &self.sprites);
                self.draw(&list);
            }
        }

        fn handle_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::FirstEncounter(hazard) => {
                    log::info!("New pathogen: {:?}", hazard.kind.family());
                }
                GameEvent::ItemCollected(item) => {
                    log::info!("Ate {:?} (+{})", item.kind, item.heal);
                }
                GameEvent::DamageTaken { health, first } => {
                    log::info!("Hit (health {}, first: {})", health, first);
                }
                GameEvent::WallExit => log::info!("Left the vein"),
                GameEvent::Defeated => log::info!("Infected"),
                GameEvent::TimeExpired => {
                    set_text("hud-timer", "0");
                    log::info!("Survived!");
                }
            }
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state.restart(seed);
            self.input.reset();
            self.driver.start();
        }

        fn draw(&self, list: &DrawList) {
            let ctx = &self.ctx;
            let s = self.scale as f64;
            ctx.set_transform(s, 0.0, 0.0, s, 0.0, 0.0).ok();
            ctx.clear_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);

            self.draw_background(list.background_offset);

            // Safe zone: down the left edge, back up the right edge
            ctx.begin_path();
            for (i, p) in list.corridor_left.iter().enumerate() {
                if i == 0 {
                    ctx.move_to(p.x as f64, p.y as f64);
                } else {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
            }
            for p in list.corridor_right.iter().rev() {
                ctx.line_to(p.x as f64, p.y as f64);
            }
            ctx.close_path();
            ctx.set_fill_style_str(&css(palette::SAFE_ZONE));
            ctx.fill();
            ctx.set_line_width(8.0);
            ctx.set_stroke_style_str(&css(palette::BACKGROUND));
            ctx.stroke();

            for cmd in &list.commands {
                ctx.save();
                ctx.set_global_alpha(cmd.alpha as f64);
                ctx.set_shadow_color(&css(cmd.glow));
                ctx.set_shadow_blur(15.0);
                match cmd.shape {
                    Shape::Sprite { key, center, size } => {
                        if let Some(img) = self.sprites.get(key) {
                            draw_fitted(ctx, img, center, size);
                        }
                    }
                    Shape::Circle {
                        center,
                        radius,
                        color,
                    } => {
                        ctx.set_fill_style_str(&css(color));
                        ctx.begin_path();
                        let _ = ctx.arc(
                            center.x as f64,
                            center.y as f64,
                            radius as f64,
                            0.0,
                            std::f64::consts::TAU,
                        );
                        ctx.fill();
                    }
                }
                ctx.restore();
            }

            self.draw_hearts(&list.hearts);
        }

        /// Tiled tissue layer, scrolled by the parallax offset
        fn draw_background(&self, offset: f32) {
            let ctx = &self.ctx;
            let img = self
                .sprites
                .get(render::BACKGROUND_SPRITE)
                .filter(|_| self.sprites.is_ready(render::BACKGROUND_SPRITE));
            let Some(img) = img else {
                ctx.set_fill_style_str(&css(palette::BACKGROUND));
                ctx.fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);
                return;
            };

            // Fit width, keep aspect
            let tile_height =
                GAME_WIDTH * img.natural_height() as f32 / img.natural_width().max(1) as f32;
            for top in render::background_tiles(offset, tile_height) {
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    0.0,
                    top as f64,
                    GAME_WIDTH as f64,
                    tile_height as f64,
                );
            }
        }

        fn draw_hearts(&self, hearts: &[Heart]) {
            let ctx = &self.ctx;
            for (i, heart) in hearts.iter().enumerate() {
                let (key, alpha) = heart.sprite();
                if !self.sprites.is_ready(key) {
                    continue;
                }
                let Some(img) = self.sprites.get(key) else {
                    continue;
                };
                let pos = render::heart_position(i);
                ctx.set_global_alpha(alpha as f64);
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    pos.x as f64,
                    pos.y as f64,
                    render::HEART_SIZE as f64,
                    render::HEART_SIZE as f64,
                );
            }
            ctx.set_global_alpha(1.0);
        }
    }

    /// Keep aspect ratio, fit the larger side to `size`
    fn draw_fitted(
        ctx: &CanvasRenderingContext2d,
        img: &HtmlImageElement,
        center: Vec2,
        size: f32,
    ) {
        let aspect = img.natural_width() as f32 / img.natural_height().max(1) as f32;
        let (w, h) = if aspect > 1.0 {
            (size, size / aspect)
        } else {
            (size * aspect, size)
        };
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            (center.x - w / 2.0) as f64,
            (center.y - h / 2.0) as f64,
            w as f64,
            h as f64,
        );
    }

    fn css(rgb: u32) -> String {
        format!("#{:06x}", rgb)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    /// Registered DOM listeners; removed again on drop
    struct InputBindings {
        target: EventTarget,
        listeners: Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>,
    }

    impl InputBindings {
        fn attach(target: EventTarget, game: Rc<RefCell<Game>>) -> Result<Self, JsValue> {
            let mut bindings = Self {
                target,
                listeners: Vec::new(),
            };

            {
                let game = game.clone();
                bindings.listen("keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    let mut g = game.borrow_mut();
                    if event.code() == "KeyR" && g.state.is_over() {
                        g.restart();
                    } else if g.input.key_down(&event.code()) {
                        event.prevent_default();
                    }
                })?;
            }
            {
                let game = game.clone();
                bindings.listen("keyup", move |event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        game.borrow_mut().input.key_up(&event.code());
                    }
                })?;
            }
            {
                let game = game.clone();
                bindings.listen("touchstart", move |event| {
                    let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    let Some(touch) = touch_event.touches().get(0) else {
                        return;
                    };
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32)
                        / client_scale();
                    let target = pointer_target(&event);
                    if game.borrow_mut().input.drag_start(pos, target) {
                        // Game control: keep the page from scrolling
                        event.prevent_default();
                    }
                })?;
            }
            {
                let game = game.clone();
                bindings.listen("touchmove", move |event| {
                    let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    let Some(touch) = touch_event.touches().get(0) else {
                        return;
                    };
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32)
                        / client_scale();
                    if game.borrow_mut().input.drag_move(pos) {
                        event.prevent_default();
                    }
                })?;
            }
            {
                let game = game.clone();
                bindings.listen("touchend", move |_event| {
                    game.borrow_mut().input.drag_end();
                })?;
            }

            Ok(bindings)
        }

        fn listen(
            &mut self,
            name: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Result<(), JsValue> {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
            self.target
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            self.listeners.push((name, closure));
            Ok(())
        }
    }

    impl Drop for InputBindings {
        fn drop(&mut self) {
            for (name, closure) in &self.listeners {
                let _ = self
                    .target
                    .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            log::info!("Detached {} input listeners", self.listeners.len());
        }
    }

    /// Touches on buttons, inputs and links belong to the UI
    fn pointer_target(event: &web_sys::Event) -> PointerTarget {
        match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
            Some(el) => {
                let inside_button = el.closest("button").ok().flatten().is_some();
                PointerTarget::from_tag(&el.tag_name(), inside_button)
            }
            None => PointerTarget::Playfield,
        }
    }

    /// Client (CSS) pixels per logical game pixel
    fn client_scale() -> f32 {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .map(|el| el.client_width() as f32 / GAME_WIDTH)
            .filter(|s| *s > 0.0)
            .unwrap_or(1.0)
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Request frames until the driver goes idle, then drop the input listeners
    fn start_loop(game: Rc<RefCell<Game>>, bindings: InputBindings) {
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        let mut bindings = Some(bindings);
        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            game.borrow_mut().frame(time);
            if !game.borrow().driver.is_active() {
                bindings.take();
                return;
            }
            if let (Some(w), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }));
        if let (Some(w), Some(cb)) = (web_sys::window(), g.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Vein Guardian starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio() as f32;
        canvas.set_width((GAME_WIDTH * dpr) as u32);
        canvas.set_height((GAME_HEIGHT * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let tuning = Tuning::default();
        let seed = js_sys::Date::now() as u64;
        let mut driver = LoopDriver::new(tuning.max_frame_dt);
        driver.start();

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(tuning, seed),
            input: InputSampler::new(),
            driver,
            ctx,
            sprites: SpriteSheet::load()?,
            scale: dpr,
        }));

        let bindings = InputBindings::attach(window.into(), game.clone())?;
        start_loop(game, bindings);

        log::info!("Vein Guardian running (seed {})", seed);
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
    log::info!("Vein Guardian (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| vein_guardian::Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => vein_guardian::Tuning::default(),
    };

    let outcome = headless::run(tuning);
    println!("Run finished: {:?}", outcome);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use vein_guardian::sim::{GameEvent, GameState, InputAction, InputSampler, Outcome};
    use vein_guardian::{LoopDriver, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Safety net if the run somehow never ends
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Steer toward the corridor centre at the player's height
    fn autopilot(state: &GameState, input: &mut InputSampler) {
        let center = state.corridor.bounds_at(state.player.pos.y).center;
        let dx = center - state.player.pos.x;
        input.set_action(InputAction::MoveLeft, dx < -4.0);
        input.set_action(InputAction::MoveRight, dx > 4.0);
    }

    pub fn run(tuning: Tuning) -> Option<Outcome> {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        let mut driver = LoopDriver::new(tuning.max_frame_dt);
        let mut state = GameState::new(tuning, seed);
        let mut input = InputSampler::new();
        driver.start();

        let mut time = 0.0;
        for _ in 0..MAX_FRAMES {
            autopilot(&state, &mut input);
            driver.frame(time, &mut state, &mut input);
            for event in state.drain_events() {
                match event {
                    GameEvent::FirstEncounter(h) => log::info!("Encountered {}", h.kind.as_str()),
                    GameEvent::ItemCollected(p) => log::info!("Collected {:?}", p.kind),
                    GameEvent::DamageTaken { health, .. } => log::info!("Hit, health {}", health),
                    other => log::info!("{:?}", other),
                }
            }
            if !driver.is_running() && driver.frames() > 1 {
                break;
            }
            time += FRAME_MS;
        }

        driver.stop();
        state.outcome()
    }
}
