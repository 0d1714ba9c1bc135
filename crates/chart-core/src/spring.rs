//! Damped-spring animation over accumulated time.
//!
//! Each animated scalar is a damped harmonic oscillator integrated with
//! semi-implicit Euler at a fixed substep, so behavior stays stable under
//! variable frame timing and a zero-length tick changes nothing.

/// Stiffness/damping pair for one oscillator (per-second units).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self { stiffness, damping }
    }
}

/// Displacement/velocity threshold below which a spring counts as settled.
pub const REST_EPSILON: f32 = 1e-3;

const SUBSTEP_SEC: f32 = 1.0 / 120.0;
const MAX_FRAME_SEC: f32 = 0.25; // dropped-frame clamp; springs stay time-accumulated

#[derive(Clone, Copy, Debug)]
pub struct Spring {
    current: f32,
    velocity: f32,
    target: f32,
    config: SpringConfig,
    resting: bool,
}

impl Spring {
    /// A spring born already settled at `initial`.
    pub fn new(initial: f32, config: SpringConfig) -> Self {
        Self {
            current: initial,
            velocity: 0.0,
            target: initial,
            config,
            resting: true,
        }
    }

    /// A spring that starts at `initial` and immediately animates to `target`.
    pub fn with_target(initial: f32, target: f32, config: SpringConfig) -> Self {
        let mut s = Self::new(initial, config);
        s.set_target(target);
        s
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        if (self.target - self.current).abs() >= REST_EPSILON {
            self.resting = false;
        }
    }

    /// Pin the spring to `value` with no motion.
    pub fn snap_to(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
        self.resting = true;
    }

    /// Advance by `dt_sec` seconds. Returns `true` only on the tick where the
    /// spring comes to rest, so dependent re-layout can fire exactly once.
    pub fn step(&mut self, dt_sec: f32) -> bool {
        if dt_sec <= 0.0 || !dt_sec.is_finite() || self.resting {
            return false;
        }
        let mut remaining = dt_sec.min(MAX_FRAME_SEC);
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP_SEC);
            let accel = self.config.stiffness * (self.target - self.current)
                - self.config.damping * self.velocity;
            self.velocity += accel * h;
            self.current += self.velocity * h;
            remaining -= h;
        }
        if self.velocity.abs() < REST_EPSILON && (self.target - self.current).abs() < REST_EPSILON {
            self.current = self.target;
            self.velocity = 0.0;
            self.resting = true;
            return true;
        }
        false
    }
}

/// All springs belonging to one widget, advanced as a single batch per tick
/// so a frame never observes a partially updated set.
#[derive(Default)]
pub struct Animator {
    springs: Vec<Spring>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spring and get back its stable handle.
    pub fn push(&mut self, spring: Spring) -> usize {
        self.springs.push(spring);
        self.springs.len() - 1
    }

    /// Drop all springs; used when the owning entity set is replaced.
    pub fn clear(&mut self) {
        self.springs.clear();
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn value(&self, handle: usize) -> f32 {
        self.springs[handle].value()
    }

    pub fn spring(&self, handle: usize) -> &Spring {
        &self.springs[handle]
    }

    pub fn spring_mut(&mut self, handle: usize) -> &mut Spring {
        &mut self.springs[handle]
    }

    pub fn all_resting(&self) -> bool {
        self.springs.iter().all(Spring::is_resting)
    }

    /// Step every spring by `dt_sec` in one atomic batch. Returns the handles
    /// that came to rest during this tick.
    pub fn advance(&mut self, dt_sec: f32) -> Vec<usize> {
        let mut rested = Vec::new();
        for (i, s) in self.springs.iter_mut().enumerate() {
            if s.step(dt_sec) {
                rested.push(i);
            }
        }
        rested
    }
}
