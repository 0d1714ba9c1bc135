//! Demo stage: palette choice, mock data and widget mounting.

use crate::audio::SoundFx;
use crate::widgets::bar_chart::{BarChart3d, BarChartConfig};
use crate::widgets::carousel::Carousel;
use crate::widgets::pie_chart::{PieChart3d, PieChartConfig};
use crate::{dom, frame};
use chart_core::{Color, Palette};
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

// Five-color palettes in ColourLovers order:
// background, label, highlight, base, secondary.
const PALETTES: [[&str; 5]; 3] = [
    ["#69d2e7", "#a7dbd8", "#e0e4cc", "#f38630", "#fa6900"],
    ["#fe4365", "#fc9d9a", "#f9cdad", "#c8c8a9", "#83af9b"],
    ["#ecd078", "#d95b43", "#c02942", "#542437", "#53777a"],
];

pub async fn boot() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let stage = match document.get_element_by_id("demo") {
        Some(el) => el,
        None => document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?
            .into(),
    };

    let hex = PALETTES[1];
    let palette = Palette::from_hex(hex[3], hex[4], hex[2], hex[1])?;
    let background = Color::from_hex(hex[0])?;
    dom::set_body_background(&document, hex[0]);

    let fx = Rc::new(SoundFx::new());
    let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);

    let bar = BarChart3d::mount(
        &document,
        &stage,
        &mock_series(&mut rng),
        BarChartConfig {
            width: 640.0,
            height: 480.0,
            palette,
            background,
            x_label: "Stuff".to_string(),
            y_label: "Things".to_string(),
        },
        fx.clone(),
    )
    .await?;

    let pie = PieChart3d::mount(
        &document,
        &stage,
        &mock_fractions(&mut rng),
        PieChartConfig {
            width: 640.0,
            height: 480.0,
            palette,
            background,
        },
        fx.clone(),
    )
    .await?;

    let carousel = Carousel::mount(&document, &stage, fx)?;

    // single frame loop ticks every widget from one dt
    let widgets = Rc::new(RefCell::new((bar, pie, carousel)));
    frame::start_loop(move |dt| {
        let mut w = widgets.borrow_mut();
        w.0.tick(dt);
        w.1.tick(dt);
        w.2.tick(dt);
    });

    log::info!("demo stage ready");
    Ok(())
}

// 3 to 12 bars of uniform noise, like a data feed would hand us.
fn mock_series(rng: &mut StdRng) -> Vec<f64> {
    let count = 3 + rng.gen_range(0..10);
    (0..count).map(|_| rng.gen::<f64>()).collect()
}

// A handful of slice fractions that sum below a full turn.
fn mock_fractions(rng: &mut StdRng) -> Vec<f64> {
    let count = 3 + rng.gen_range(0..3);
    let raw: Vec<f64> = (0..count).map(|_| 0.2 + rng.gen::<f64>()).collect();
    let total: f64 = raw.iter().sum();
    raw.iter().map(|v| v / total * 0.95).collect()
}
