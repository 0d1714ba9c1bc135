use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn create_styled_element(
    document: &web::Document,
    tag: &str,
    style: &str,
) -> Result<web::Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_attribute("style", style)?;
    Ok(el)
}

#[inline]
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_body_background(document: &web::Document, css_color: &str) {
    if let Some(body) = document.body() {
        let _ = body.set_attribute("style", &format!("margin:0;background:{css_color}"));
    }
}
