//! DOM-only carousel with a spring-driven caret.

use crate::audio::SoundFx;
use crate::{dom, js_err};
use chart_core::{
    CarouselState, Spring, CAROUSEL_ITEM_WIDTH, SPRING_CAROUSEL_CARET,
};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct Carousel {
    state: Rc<RefCell<CarouselState>>,
    // set by the buttons, consumed on the next tick once the target item
    // has been pre-rendered
    intent_pending: Rc<RefCell<bool>>,
    spring: Spring,
    document: web::Document,
    track: web::Element,
    items: Vec<(i32, web::Element)>,
    root: web::Element,
}

impl Carousel {
    pub fn mount(
        document: &web::Document,
        parent: &web::Element,
        fx: Rc<SoundFx>,
    ) -> anyhow::Result<Self> {
        let root = dom::create_styled_element(
            document,
            "div",
            "display:inline-block;width:800px;height:600px;overflow:hidden",
        )
        .map_err(js_err)?;
        parent.append_child(&root).map_err(js_err)?;

        let column = dom::create_styled_element(
            document,
            "div",
            "display:flex;flex-direction:column;width:100%;height:100%;align-items:center",
        )
        .map_err(js_err)?;
        root.append_child(&column).map_err(js_err)?;

        let track = dom::create_styled_element(
            document,
            "div",
            "position:relative;flex:1;margin-bottom:10px;width:100%",
        )
        .map_err(js_err)?;
        column.append_child(&track).map_err(js_err)?;

        let button_row =
            dom::create_styled_element(document, "div", "display:flex").map_err(js_err)?;
        column.append_child(&button_row).map_err(js_err)?;

        let state = Rc::new(RefCell::new(CarouselState::new()));
        let intent_pending = Rc::new(RefCell::new(false));

        for (glyph, delta) in [("\u{2039}", -1i32), ("\u{203a}", 1i32)] {
            let button = dom::create_styled_element(
                document,
                "button",
                "display:flex;justify-content:center;width:80px;margin:0 10px;\
                 padding:15px 0;background:rgba(255, 255, 255, 0.3);border:0;\
                 border-radius:3px;color:#fff;\
                 text-shadow:0 1px 6px rgba(0, 0, 0, 0.2);\
                 font-family:Michroma, Arial, sans-serif;font-size:24px;cursor:pointer",
            )
            .map_err(js_err)?;
            button.set_text_content(Some(glyph));
            button_row.append_child(&button).map_err(js_err)?;

            let state = state.clone();
            let pending = intent_pending.clone();
            let fx = fx.clone();
            dom::add_click_listener(&button, move || {
                // pre-render the target item first; the caret advances next tick
                state.borrow_mut().start_intent(delta);
                *pending.borrow_mut() = true;
                fx.bump();
            });
        }

        let mut carousel = Self {
            state,
            intent_pending,
            spring: Spring::new(0.0, SPRING_CAROUSEL_CARET),
            document: document.clone(),
            track,
            items: Vec::new(),
            root,
        };
        carousel.rebuild_items()?;
        Ok(carousel)
    }

    // One DOM node per pre-rendered slot; rebuilt when the range changes.
    fn rebuild_items(&mut self) -> anyhow::Result<()> {
        for (_, el) in self.items.drain(..) {
            el.remove();
        }
        let positions: Vec<i32> = self.state.borrow().positions().collect();
        for position in positions {
            let item = dom::create_styled_element(
                &self.document,
                "div",
                "position:absolute;top:0;bottom:0;background:rgba(255, 255, 255, 0.2);\
                 border-radius:3px",
            )
            .map_err(js_err)?;
            item.set_attribute("data-position", &position.to_string())
                .map_err(js_err)?;
            self.track.append_child(&item).map_err(js_err)?;
            self.items.push((position, item));
        }
        Ok(())
    }

    pub fn tick(&mut self, dt_sec: f32) {
        if *self.intent_pending.borrow() {
            *self.intent_pending.borrow_mut() = false;
            // the widened range renders before the caret advances toward it
            if self.rebuild_items().is_err() {
                log::error!("[carousel] item rebuild failed");
            }
            let target = self.state.borrow_mut().commit_display();
            self.spring.set_target(target);
        }

        let came_to_rest = self.spring.step(dt_sec);

        // snap exactly once per settle: clobber everything off-caret
        if came_to_rest {
            self.state.borrow_mut().settle();
            if self.rebuild_items().is_err() {
                log::error!("[carousel] item rebuild failed");
            }
        }

        let caret_x = self.spring.value();
        for (position, el) in &self.items {
            let left = CarouselState::item_left(*position, caret_x);
            let _ = el.set_attribute(
                "style",
                &format!(
                    "position:absolute;top:0;bottom:0;left:50%;\
                     margin-left:{}px;width:{}px;\
                     background:rgba(255, 255, 255, 0.2);border-radius:3px",
                    left - CAROUSEL_ITEM_WIDTH / 2.0,
                    CAROUSEL_ITEM_WIDTH
                ),
            );
        }
    }

    pub fn unmount(&mut self) {
        for (_, el) in self.items.drain(..) {
            el.remove();
        }
        self.root.remove();
    }
}
