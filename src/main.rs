//! Neon Arcade entry point
//!
//! Handles platform-specific initialization and drives the arcade.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent,
        TouchEvent, Window,
    };

    use neon_arcade::consts::SIM_DT;
    use neon_arcade::input::{InputEvent, Key, PointerKind, UiButton};
    use neon_arcade::renderer::{Frame, canvas};
    use neon_arcade::sim::Viewport;
    use neon_arcade::{Arcade, GameKey, SnakeSpeed, platform};

    /// Everything the animation frame callback needs
    struct Host {
        arcade: Arcade,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        frame: Frame,
        last_time: f64,
    }

    impl Host {
        /// Match the backing store to the element size and device pixel ratio
        fn fit_canvas(&mut self, window: &Window) {
            let dpr = window.device_pixel_ratio();
            let css_w = self.canvas.client_width().max(1) as f64;
            let css_h = self.canvas.client_height().max(1) as f64;
            self.canvas.set_width((css_w * dpr) as u32);
            self.canvas.set_height((css_h * dpr) as u32);
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            let viewport = Viewport::new(css_w as f32, css_h as f32);
            self.arcade.resize(viewport);
            log::debug!("Canvas resized to {}x{} (dpr {})", css_w, css_h, dpr);
        }

        fn on_frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.arcade.frame(dt);
            self.arcade.draw(&mut self.frame);
            canvas::paint(&self.ctx, &self.frame);
        }

        fn playing(&self, key: GameKey) -> bool {
            self.arcade.shell().is_some_and(|s| s.key() == key)
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }
        log::info!("Neon Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let viewport = Viewport::new(canvas.client_width() as f32, canvas.client_height() as f32);
        let arcade = Arcade::new(platform::default_store(), viewport);
        let host = Rc::new(RefCell::new(Host {
            arcade,
            canvas: canvas.clone(),
            ctx,
            frame: Frame::new(viewport),
            last_time: 0.0,
        }));
        host.borrow_mut().fit_canvas(&window);

        setup_resize(&window, host.clone())?;
        setup_keyboard(&window, host.clone())?;
        setup_pointer(&window, &canvas, host.clone())?;
        setup_text_shim(&document, &canvas, host.clone())?;
        setup_buttons(&document, host.clone())?;

        request_animation_frame(host);
        log::info!("Neon Arcade running!");
        Ok(())
    }

    fn setup_resize(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().fit_canvas(&win);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_keyboard(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Letters typed into the text shim arrive through its input event
                let from_shim = event
                    .target()
                    .is_some_and(|t| t.dyn_ref::<HtmlInputElement>().is_some());
                let Some(key) = Key::from_dom(&event.key()) else {
                    return;
                };
                if from_shim && matches!(key, Key::Char(_)) {
                    return;
                }
                if matches!(key, Key::Left | Key::Right | Key::Up | Key::Down | Key::Space) {
                    event.prevent_default();
                }
                host.borrow_mut().arcade.push_input(InputEvent::KeyDown(key));
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom(&event.key()) {
                host.borrow_mut().arcade.push_input(InputEvent::KeyUp(key));
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// First touch position in canvas-local CSS pixels
    fn touch_point(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_pointer(window: &Window, canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = (event.offset_x() as f32, event.offset_y() as f32);
                host.borrow_mut().arcade.push_input(InputEvent::PointerMove {
                    x,
                    y,
                    kind: PointerKind::Mouse,
                });
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = (event.offset_x() as f32, event.offset_y() as f32);
                host.borrow_mut().arcade.push_input(InputEvent::PointerDown {
                    x,
                    y,
                    kind: PointerKind::Mouse,
                });
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                host.borrow_mut().arcade.push_input(InputEvent::PointerUp {
                    kind: PointerKind::Mouse,
                });
            });
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let host = host.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_point(&canvas_clone, &event) {
                    host.borrow_mut().arcade.push_input(InputEvent::PointerDown {
                        x,
                        y,
                        kind: PointerKind::Touch,
                    });
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let host = host.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_point(&canvas_clone, &event) {
                    host.borrow_mut().arcade.push_input(InputEvent::PointerMove {
                        x,
                        y,
                        kind: PointerKind::Touch,
                    });
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
            host.borrow_mut().arcade.push_input(InputEvent::PointerUp {
                kind: PointerKind::Touch,
            });
        });
        canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Hidden input that brings up the soft keyboard for the typing game
    fn setup_text_shim(document: &Document, canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let Some(shim) = document
            .get_element_by_id("text-shim")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::warn!("No #text-shim input; soft keyboard typing disabled");
            return Ok(());
        };

        {
            let host = host.clone();
            let shim_clone = shim.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let text = shim_clone.value();
                shim_clone.set_value("");
                if !text.is_empty() {
                    host.borrow_mut().arcade.push_input(InputEvent::Text(text));
                }
            });
            shim.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if host.borrow().playing(GameKey::Type) {
                let _ = shim.focus();
            }
        });
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Optional on-screen buttons (snake pad and speed, slide hint)
    fn setup_buttons(document: &Document, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let buttons = [
            ("btn-up", UiButton::Pad(Key::Up)),
            ("btn-down", UiButton::Pad(Key::Down)),
            ("btn-left", UiButton::Pad(Key::Left)),
            ("btn-right", UiButton::Pad(Key::Right)),
            ("btn-speed-normal", UiButton::Speed(SnakeSpeed::Normal)),
            ("btn-speed-medium", UiButton::Speed(SnakeSpeed::Medium)),
            ("btn-speed-high", UiButton::Speed(SnakeSpeed::High)),
            ("btn-solve", UiButton::Solve),
        ];
        for (id, button) in buttons {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                host.borrow_mut().arcade.push_input(InputEvent::Button(button));
            });
            el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            host.borrow_mut().on_frame(time);
            request_animation_frame(host);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulated seconds each game gets in the headless demo
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SECONDS: u32 = 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_arcade::{demo, platform};

    env_logger::init();
    log::info!("Neon Arcade (native) starting...");
    log::info!("Native mode is a headless demo - build for wasm32 to play in a browser");

    let (_, runs) = demo::run_all(platform::fresh_seed(), DEMO_SECONDS);
    println!("{:<14} {:>8} {:>8} {:>8}", "GAME", "TICKS", "SCORE", "BEST");
    for run in runs {
        println!(
            "{:<14} {:>8} {:>8} {:>8}",
            run.key.metadata().title,
            run.ticks,
            run.score,
            run.best
        );
    }
    log::info!("Demo finished");
}
