//! 3D pie chart widget: GPU wedges with a reveal animation and per-slice
//! hover separation.

use crate::audio::SoundFx;
use crate::composer::SceneComposer;
use crate::events::{self, HoverFlags};
use crate::overlay::OverlayLayer;
use crate::{dom, js_err};
use chart_core::{
    coerce_values, pie_slices, wedge_instances, Animator, CameraState, Palette, SceneColors,
    SliceLayout, Spring, PIE_CAMERA_DISTANCE, PIE_CAMERA_LIFT, PIE_HOVER_SPACING, PIE_RADIUS,
    SPRING_PIE_REVEAL, SPRING_PIE_SPACING,
};
use glam::{Vec2, Vec3};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct PieChartConfig {
    pub width: f32,
    pub height: f32,
    pub palette: Palette,
    pub background: chart_core::Color,
}

pub struct PieChart3d {
    slices: Vec<SliceLayout>,
    camera: CameraState,
    viewport: Vec2,
    colors: SceneColors,
    animator: Animator,
    reveal_handle: usize,
    spacing_handles: Vec<usize>,
    hover: HoverFlags,
    composer: SceneComposer,
    overlay: OverlayLayer,
    label_nodes: Vec<usize>,
    root: web::Element,
}

impl PieChart3d {
    pub async fn mount(
        document: &web::Document,
        parent: &web::Element,
        values: &[f64],
        config: PieChartConfig,
        fx: Rc<SoundFx>,
    ) -> anyhow::Result<Self> {
        let values = coerce_values(values)?;
        let viewport = Vec2::new(config.width, config.height);
        let camera = CameraState::for_viewport(
            viewport.x,
            viewport.y,
            PIE_CAMERA_DISTANCE,
            Vec3::new(0.0, 0.0, PIE_CAMERA_LIFT),
        )?;
        let slices = pie_slices(&values);

        let root = dom::create_styled_element(
            document,
            "div",
            &format!(
                "position:relative;display:inline-block;width:{}px;height:{}px;overflow:hidden",
                config.width, config.height
            ),
        )
        .map_err(js_err)?;
        parent.append_child(&root).map_err(js_err)?;

        let canvas = document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        canvas.set_width(config.width as u32);
        canvas.set_height(config.height as u32);
        canvas
            .set_attribute(
                "style",
                "position:absolute;top:0;left:0;width:100%;height:100%",
            )
            .map_err(js_err)?;
        root.append_child(&canvas).map_err(js_err)?;

        let mut overlay =
            OverlayLayer::new(document, &root, &camera.scene_transform(viewport)).map_err(js_err)?;

        // per-slice labels double as hover hitboxes
        let label_css = config.palette.label.to_css();
        let hover = events::new_hover_flags(values.len());
        let mut label_nodes = Vec::with_capacity(values.len());
        for (index, (slice, value)) in slices.iter().zip(&values).enumerate() {
            let node = overlay
                .push_node(
                    document,
                    "span",
                    &slice_label_transform(slice, 0.0),
                    &format!(
                        "white-space:nowrap;font-family:Michroma, Arial, sans-serif;\
                         line-height:1;font-size:24px;color:{label_css}"
                    ),
                )
                .map_err(js_err)?;
            overlay.set_text(node, &format!("{}%", (value * 100.0).round()));
            let fx = fx.clone();
            events::wire_hover(overlay.element(node), index, hover.clone(), move || fx.bump());
            label_nodes.push(node);
        }

        let mut animator = Animator::new();
        let reveal_handle = animator.push(Spring::with_target(0.0, 1.0, SPRING_PIE_REVEAL));
        let spacing_handles = values
            .iter()
            .map(|_| animator.push(Spring::new(0.0, SPRING_PIE_SPACING)))
            .collect();

        let mut composer = SceneComposer::new();
        composer.attach(&canvas).await;

        Ok(Self {
            slices,
            camera,
            viewport,
            colors: SceneColors {
                base: config.palette.base,
                secondary: config.palette.secondary,
                highlight: config.palette.highlight,
                clear: config.background,
            },
            animator,
            reveal_handle,
            spacing_handles,
            hover,
            composer,
            overlay,
            label_nodes,
            root,
        })
    }

    pub fn tick(&mut self, dt_sec: f32) {
        {
            let hover = self.hover.borrow();
            for (index, &handle) in self.spacing_handles.iter().enumerate() {
                let target = if hover.get(index).copied().unwrap_or(false) {
                    PIE_HOVER_SPACING
                } else {
                    0.0
                };
                self.animator.spring_mut(handle).set_target(target);
            }
        }
        self.animator.advance(dt_sec);

        let reveal = self.animator.value(self.reveal_handle);
        let spacings: Vec<f32> = self
            .spacing_handles
            .iter()
            .map(|&h| self.animator.value(h))
            .collect();
        let instances = wedge_instances(&self.slices, reveal, &spacings);

        self.overlay
            .set_scene_transform(&self.camera.scene_transform(self.viewport));
        for (index, &node) in self.label_nodes.iter().enumerate() {
            let height = self.slices[index].height_at(reveal);
            self.overlay
                .set_model_transform(node, &slice_label_transform(&self.slices[index], height));
        }

        self.composer.frame(&self.camera, &self.colors, &instances);
    }

    pub fn unmount(&mut self) {
        self.composer.detach();
        self.overlay.clear();
        self.root.remove();
    }
}

// Label sits just past the outer rim at the slice's mid-angle, riding the
// animated slice height.
fn slice_label_transform(slice: &SliceLayout, height: f32) -> String {
    format!(
        "translate3d(0px, 0px, {height}px) rotate({}rad) translate({}px, 0px)",
        slice.mid_angle(),
        PIE_RADIUS + 10.0
    )
}
