//! CSS-positioned overlay nodes sharing the chart camera.
//!
//! The layer root carries the scene transform (pixel centering, y-flip and
//! the camera `matrix3d`); every node under it only needs its own model
//! transform. Node lifecycle is 1:1 with the owning widget's entities.

use chart_core::{node_transform, overlay_style};
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct OverlayLayer {
    root: web::Element,
    // element plus its non-transform style, kept for per-frame rewrites
    nodes: Vec<(web::Element, String)>,
}

impl OverlayLayer {
    pub fn new(
        document: &web::Document,
        parent: &web::Element,
        scene_transform: &str,
    ) -> Result<Self, JsValue> {
        let root = document.create_element("div")?;
        root.set_attribute(
            "style",
            &format!(
                "position:absolute;top:0;left:0;width:0;height:0;z-index:1;\
                 transform-style:preserve-3d;transform:{scene_transform}"
            ),
        )?;
        parent.append_child(&root)?;
        Ok(Self {
            root,
            nodes: Vec::new(),
        })
    }

    /// Update the camera-derived container transform for this frame.
    pub fn set_scene_transform(&self, scene_transform: &str) {
        let _ = self.root.set_attribute(
            "style",
            &format!(
                "position:absolute;top:0;left:0;width:0;height:0;z-index:1;\
                 transform-style:preserve-3d;transform:{scene_transform}"
            ),
        );
    }

    /// Add one node; returns its stable index. `extra_style` carries font,
    /// color and layout and is preserved across transform updates.
    pub fn push_node(
        &mut self,
        document: &web::Document,
        tag: &str,
        model_transform: &str,
        extra_style: &str,
    ) -> Result<usize, JsValue> {
        let node = document.create_element(tag)?;
        node.set_attribute(
            "style",
            &overlay_style(&node_transform(model_transform), extra_style),
        )?;
        self.root.append_child(&node)?;
        self.nodes.push((node, extra_style.to_string()));
        Ok(self.nodes.len() - 1)
    }

    pub fn element(&self, index: usize) -> &web::Element {
        &self.nodes[index].0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Re-aim a node for the current animated frame.
    pub fn set_model_transform(&self, index: usize, model_transform: &str) {
        let (node, extra) = &self.nodes[index];
        let _ = node.set_attribute(
            "style",
            &overlay_style(&node_transform(model_transform), extra),
        );
    }

    pub fn set_text(&self, index: usize, text: &str) {
        self.nodes[index].0.set_text_content(Some(text));
    }

    /// Tear the whole layer out of the DOM.
    pub fn clear(&mut self) {
        for (node, _) in self.nodes.drain(..) {
            node.remove();
        }
        self.root.remove();
    }
}
