//! Entity-indexed interaction wiring.
//!
//! Hover flags live in one table shared between the event layer (writes) and
//! the frame loop (reads); listeners are wired once per entity record at
//! mount and never rebuilt between frames, so adding or removing entities
//! can't leave a closure pointing at a stale index.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type HoverFlags = Rc<RefCell<Vec<bool>>>;

pub fn new_hover_flags(count: usize) -> HoverFlags {
    Rc::new(RefCell::new(vec![false; count]))
}

/// Wire pointer enter/leave for the entity `index` onto its hitbox element.
/// `on_enter` fires on the leading edge only.
pub fn wire_hover(
    element: &web::Element,
    index: usize,
    flags: HoverFlags,
    mut on_enter: impl FnMut() + 'static,
) {
    {
        let flags = flags.clone();
        let closure = Closure::wrap(Box::new(move |_: web::PointerEvent| {
            if let Some(flag) = flags.borrow_mut().get_mut(index) {
                if !*flag {
                    *flag = true;
                    on_enter();
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            element.add_event_listener_with_callback("pointerenter", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_: web::PointerEvent| {
            if let Some(flag) = flags.borrow_mut().get_mut(index) {
                *flag = false;
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            element.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
