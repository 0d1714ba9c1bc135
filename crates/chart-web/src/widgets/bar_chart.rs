//! 3D bar chart widget: GPU bars, CSS-overlay labels and hover hitboxes.

use crate::audio::SoundFx;
use crate::composer::SceneComposer;
use crate::events::{self, HoverFlags};
use crate::overlay::OverlayLayer;
use crate::{dom, js_err};
use chart_core::{
    bar_instances, coerce_values, Animator, BarLayout, CameraState, Palette, SceneColors, Spring,
    BAR_CAMERA_DISTANCE, BAR_CAMERA_LIFT, BAR_EXTRA_RADIUS, CHART_AREA_HEIGHT, CHART_AREA_WIDTH,
    SPRING_BAR_RADIUS, SPRING_BAR_VALUE,
};
use glam::{Vec2, Vec3};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct BarChartConfig {
    pub width: f32,
    pub height: f32,
    pub palette: Palette,
    pub background: chart_core::Color,
    pub x_label: String,
    pub y_label: String,
}

pub struct BarChart3d {
    layout: BarLayout,
    camera: CameraState,
    viewport: Vec2,
    colors: SceneColors,
    animator: Animator,
    value_handles: Vec<usize>,
    radius_handles: Vec<usize>,
    hover: HoverFlags,
    composer: SceneComposer,
    overlay: OverlayLayer,
    bar_label_nodes: Vec<usize>,
    root: web::Element,
}

impl BarChart3d {
    pub async fn mount(
        document: &web::Document,
        parent: &web::Element,
        values: &[f64],
        config: BarChartConfig,
        fx: Rc<SoundFx>,
    ) -> anyhow::Result<Self> {
        let values = coerce_values(values)?;
        let viewport = Vec2::new(config.width, config.height);
        let camera = CameraState::for_viewport(
            viewport.x,
            viewport.y,
            BAR_CAMERA_DISTANCE,
            Vec3::new(0.0, 0.0, BAR_CAMERA_LIFT),
        )?;
        let layout = BarLayout::new(values.len());

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

        let label_css = config.palette.label.to_css();
        let label_font = "white-space:nowrap;font-family:Michroma, Arial, sans-serif;\
                          line-height:1;letter-spacing:-2px";

        let x_label_node = overlay
            .push_node(
                document,
                "span",
                &format!("translate({}px, -60px)", -CHART_AREA_WIDTH / 2.0 + 10.0),
                &format!("{label_font};font-size:40px;color:{label_css}"),
            )
            .map_err(js_err)?;
        overlay.set_text(x_label_node, &config.x_label);

        let y_label_node = overlay
            .push_node(
                document,
                "span",
                &format!(
                    "translate({}px, -40px) rotateX(90deg) rotateZ(90deg)",
                    CHART_AREA_WIDTH / 2.0 + 10.0
                ),
                &format!("{label_font};font-size:48px;color:{label_css}"),
            )
            .map_err(js_err)?;
        overlay.set_text(y_label_node, &config.y_label);

        // hover hitbox plane standing behind the bars, one flex cell per bar
        let hitbox = overlay
            .push_node(
                document,
                "div",
                &format!(
                    "translate3d({}px, -40px, {}px) rotateX(90deg)",
                    -CHART_AREA_WIDTH / 2.0,
                    CHART_AREA_HEIGHT
                ),
                &format!(
                    "display:flex;width:{CHART_AREA_WIDTH}px;height:{CHART_AREA_HEIGHT}px"
                ),
            )
            .map_err(js_err)?;

        let hover = events::new_hover_flags(values.len());
        for index in 0..values.len() {
            let cell = dom::create_styled_element(document, "span", "display:block;flex:1")
                .map_err(js_err)?;
            overlay
                .element(hitbox)
                .append_child(&cell)
                .map_err(js_err)?;
            let fx = fx.clone();
            events::wire_hover(&cell, index, hover.clone(), move || fx.bump());
        }

        // per-bar value labels riding the animated bar tops
        let mut bar_label_nodes = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            let top = layout.top_center(index, 0.0);
            let node = overlay
                .push_node(
                    document,
                    "span",
                    &format!("translate3d({}px, {}px, 0px)", top.x, top.y),
                    &format!("{label_font};font-size:20px;color:{label_css}"),
                )
                .map_err(js_err)?;
            overlay.set_text(node, &format!("{}%", (value * 100.0).round()));
            bar_label_nodes.push(node);
        }

        let mut animator = Animator::new();
        let value_handles = values
            .iter()
            .map(|&v| animator.push(Spring::with_target(0.0, v, SPRING_BAR_VALUE)))
            .collect();
        let radius_handles = values
            .iter()
            .map(|_| animator.push(Spring::new(0.0, SPRING_BAR_RADIUS)))
            .collect();

        let mut composer = SceneComposer::new();
        composer.attach(&canvas).await;

        Ok(Self {
            layout,
            camera,
            viewport,
            colors: SceneColors {
                base: config.palette.base,
                secondary: config.palette.secondary,
                highlight: config.palette.highlight,
                clear: config.background,
            },
            animator,
            value_handles,
            radius_handles,
            hover,
            composer,
            overlay,
            bar_label_nodes,
            root,
        })
    }

    /// One animation/render tick. Springs advance as a single batch before
    /// anything reads them, so draws and overlay placement always see one
    /// consistent snapshot.
    pub fn tick(&mut self, dt_sec: f32) {
        {
            let hover = self.hover.borrow();
            for (index, &handle) in self.radius_handles.iter().enumerate() {
                let target = if hover.get(index).copied().unwrap_or(false) {
                    BAR_EXTRA_RADIUS
                } else {
                    0.0
                };
                self.animator.spring_mut(handle).set_target(target);
            }
        }
        self.animator.advance(dt_sec);

        let animated: Vec<f32> = self
            .value_handles
            .iter()
            .map(|&h| self.animator.value(h))
            .collect();
        let radii: Vec<f32> = self
            .radius_handles
            .iter()
            .map(|&h| self.animator.value(h))
            .collect();
        let instances = bar_instances(&self.layout, &animated, &radii);

        // camera first, then GPU draws and DOM placement from the same matrix
        self.overlay
            .set_scene_transform(&self.camera.scene_transform(self.viewport));
        for (index, &node) in self.bar_label_nodes.iter().enumerate() {
            let top = self.layout.top_center(index, instances[index].height);
            self.overlay.set_model_transform(
                node,
                &format!("translate3d({}px, {}px, {}px)", top.x, top.y, top.z),
            );
        }

        self.composer.frame(&self.camera, &self.colors, &instances);
    }

    /// Detach mid-animation: the GPU context is released now and later ticks
    /// become no-ops.
    pub fn unmount(&mut self) {
        self.composer.detach();
        self.overlay.clear();
        self.root.remove();
    }
}
