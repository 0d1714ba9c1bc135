//! Perspective orbit camera shared by the GPU and the DOM overlay.
//!
//! One [`CameraState`] value is projected two ways each frame: as a raw
//! column-major matrix bound as a GPU uniform, and as the equivalent CSS
//! `matrix3d(...)` string applied to DOM overlay nodes. Both derive from the
//! same [`CameraState::matrix`] call, so the two pipelines cannot drift.

use crate::constants::{CAMERA_FAR_FACTOR, CAMERA_FOV, CAMERA_NEAR, CAMERA_PITCH, CAMERA_YAW};
use crate::error::ConfigError;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Camera description derived each frame from the viewport and fixed orbit
/// constants. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub center: Vec3,
}

impl CameraState {
    /// Standard chart orbit for a viewport, looking at `center` from
    /// `distance` away.
    pub fn for_viewport(
        width: f32,
        height: f32,
        distance: f32,
        center: Vec3,
    ) -> Result<Self, ConfigError> {
        if !(width > 0.0) || !(height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        if !(distance > 0.0) || !distance.is_finite() {
            return Err(ConfigError::DegenerateCamera {
                name: "distance",
                value: distance,
            });
        }
        Ok(Self {
            fov_y: CAMERA_FOV,
            aspect: width / height,
            near: CAMERA_NEAR,
            far: distance * CAMERA_FAR_FACTOR,
            distance,
            pitch: CAMERA_PITCH,
            yaw: CAMERA_YAW,
            center,
        })
    }

    /// Combined projection-view matrix:
    /// `Perspective · Translate(0,0,-distance) · RotateX(pitch) · RotateZ(yaw)
    /// · Translate(-center)`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * Mat4::from_rotation_x(self.pitch)
            * Mat4::from_rotation_z(self.yaw)
            * Mat4::from_translation(-self.center)
    }

    /// The same matrix serialized for DOM placement, column-major as CSS
    /// expects.
    pub fn css_matrix3d(&self) -> String {
        let m = self.matrix().to_cols_array();
        let joined = m
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("matrix3d({joined})")
    }

    /// Transform for the overlay container that maps CSS pixel space onto the
    /// GPU device coordinate range (origin centered, y flipped), then applies
    /// the camera.
    pub fn scene_transform(&self, viewport: Vec2) -> String {
        format!(
            "translate({}px, {}px) scale({}, {}) {}",
            viewport.x / 2.0,
            viewport.y / 2.0,
            viewport.x / 2.0,
            -viewport.y / 2.0,
            self.css_matrix3d()
        )
    }

    /// Project a world-space point to viewport pixels using the standard
    /// device-to-screen convention (x,y in [-1,1], pixel center at
    /// viewport/2, y flipped). Returns `None` for points at or behind the
    /// eye plane.
    pub fn project_px(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.matrix() * Vec4::from((point, 1.0));
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}
