//! Scene composer: exclusive owner of one GPU surface and its lifecycle.

use crate::lifecycle::{PhaseTracker, SurfacePhase};
use crate::render::GpuState;
use chart_core::{CameraState, DrawInstance, SceneColors};
use web_sys as web;

pub struct SceneComposer {
    tracker: PhaseTracker,
    gpu: Option<GpuState<'static>>,
}

impl SceneComposer {
    pub fn new() -> Self {
        Self {
            tracker: PhaseTracker::new(),
            gpu: None,
        }
    }

    pub fn phase(&self) -> SurfacePhase {
        self.tracker.phase()
    }

    /// Acquire the GPU context for `canvas`: exactly once per surface, plus
    /// retries after a failure. Failure is a state transition, never a panic
    /// into render code.
    pub async fn attach(&mut self, canvas: &web::HtmlCanvasElement) {
        if !self.tracker.can_attach() {
            log::warn!("[composer] attach ignored in phase {:?}", self.phase());
            return;
        }
        // leak a canvas clone to satisfy 'static lifetime for surface
        let leaked: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
        match GpuState::new(leaked).await {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.tracker.mark_ready();
            }
            Err(e) => {
                log::error!("WebGPU init error: {e:?}");
                self.tracker.mark_failed();
            }
        }
    }

    /// Release the GPU context now, even mid-animation. Every later frame is
    /// a no-op.
    pub fn detach(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.destroy();
        }
        self.tracker.mark_destroyed();
    }

    /// Draw one frame from a consistent snapshot of animated values. Without
    /// a live context this skips silently; DOM overlays are unaffected.
    pub fn frame(&mut self, camera: &CameraState, colors: &SceneColors, instances: &[DrawInstance]) {
        if !self.tracker.should_draw() {
            return;
        }
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let matrix = camera.matrix();
        match gpu.render(&matrix, colors, instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::warn!("[composer] surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[composer] surface out of memory, releasing context");
                if let Some(gpu) = self.gpu.take() {
                    gpu.destroy();
                }
                self.tracker.mark_failed();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new()
    }
}
