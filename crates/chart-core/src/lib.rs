//! Platform-independent engine for the animated 3D chart widgets.
//!
//! Everything here is pure math and state: the camera/projection engine, the
//! procedural bar and wedge meshes, spring animation, series coercion and the
//! chart layout rules. The web frontend consumes these types to drive WebGPU
//! draw calls and CSS-transformed overlay nodes from one shared camera.

pub mod camera;
pub mod color;
pub mod constants;
pub mod error;
pub mod layout;
pub mod mesh;
pub mod scene;
pub mod series;
pub mod spring;

pub static SCENE_WGSL: &str = include_str!("../shaders/chart.wgsl");

pub use camera::*;
pub use color::*;
pub use constants::*;
pub use error::*;
pub use layout::*;
pub use mesh::*;
pub use scene::*;
pub use series::*;
pub use spring::*;
