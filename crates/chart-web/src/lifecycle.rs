// Surface lifecycle, kept free of platform types so it is host-testable.

/// Composer surface state. The GPU context exists only in `Ready`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfacePhase {
    /// No GPU context yet; draw calls are skipped (a no-op, not an error).
    Uninitialized,
    /// Context, pipelines and meshes are live.
    Ready,
    /// Context acquisition or the surface itself failed; the host may retry
    /// by reattaching.
    Failed,
    /// Surface detached and the context released. Terminal.
    Destroyed,
}

/// Legal-transition bookkeeping for one surface instance.
#[derive(Clone, Copy, Debug)]
pub struct PhaseTracker {
    phase: SurfacePhase,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            phase: SurfacePhase::Uninitialized,
        }
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// Context acquisition is allowed exactly once per surface, plus retries
    /// after a failure.
    pub fn can_attach(&self) -> bool {
        matches!(
            self.phase,
            SurfacePhase::Uninitialized | SurfacePhase::Failed
        )
    }

    pub fn should_draw(&self) -> bool {
        self.phase == SurfacePhase::Ready
    }

    pub fn mark_ready(&mut self) {
        debug_assert!(self.can_attach(), "attach from {:?}", self.phase);
        self.phase = SurfacePhase::Ready;
    }

    pub fn mark_failed(&mut self) {
        if self.phase != SurfacePhase::Destroyed {
            self.phase = SurfacePhase::Failed;
        }
    }

    /// Detaching is valid from any phase and never un-destroys.
    pub fn mark_destroyed(&mut self) {
        self.phase = SurfacePhase::Destroyed;
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
