//! requestAnimationFrame loop driving animation and rendering.

use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Call `frame(dt_seconds)` once per display refresh until the page goes
/// away. Elapsed time is measured, not assumed, so animation stays stable
/// under dropped frames.
pub fn start_loop(mut frame: impl FnMut(f32) + 'static) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let mut last_instant = Instant::now();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = Instant::now();
        let dt = (now - last_instant).as_secs_f32();
        last_instant = now;
        frame(dt);
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
