#![cfg(target_arch = "wasm32")]
//! Web front-end for the animated 3D chart widgets.
//!
//! Boots the demo stage: a bar chart and a pie chart rendered through WebGPU
//! with CSS-overlay labels driven by the same camera, plus a DOM carousel.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod audio;
mod composer;
mod dom;
mod events;
mod frame;
mod lifecycle;
mod overlay;
mod render;
mod widgets;

pub use composer::SceneComposer;
pub use lifecycle::SurfacePhase;
pub use widgets::bar_chart::{BarChart3d, BarChartConfig};
pub use widgets::carousel::Carousel;
pub use widgets::pie_chart::{PieChart3d, PieChartConfig};

pub(crate) fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("chart-web starting");

    spawn_local(async move {
        if let Err(e) = widgets::stage::boot().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}
