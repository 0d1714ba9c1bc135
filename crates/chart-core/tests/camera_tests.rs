// Host-side tests for the camera/projection engine: the GPU matrix and its
// CSS `matrix3d` twin must agree pixel-for-pixel.

use chart_core::{CameraState, ConfigError};
use glam::{Mat4, Vec2, Vec3, Vec4};

fn camera() -> CameraState {
    CameraState::for_viewport(640.0, 480.0, 1200.0, Vec3::new(0.0, 0.0, 150.0))
        .expect("valid camera")
}

fn parse_matrix3d(css: &str) -> Mat4 {
    let inner = css
        .strip_prefix("matrix3d(")
        .and_then(|s| s.strip_suffix(')'))
        .expect("matrix3d wrapper");
    let values: Vec<f32> = inner
        .split(',')
        .map(|t| t.trim().parse::<f32>().expect("float component"))
        .collect();
    assert_eq!(values.len(), 16, "matrix3d must carry 16 components");
    let mut cols = [0.0f32; 16];
    cols.copy_from_slice(&values);
    Mat4::from_cols_array(&cols)
}

// Emulate the DOM transform pipeline: the matrix3d is applied to the
// homogeneous point, divided by w, then the container's
// translate(w/2, h/2) scale(w/2, -h/2) maps device coordinates to pixels.
fn css_project(m: &Mat4, p: Vec3, viewport: Vec2) -> Vec2 {
    let clip = *m * Vec4::from((p, 1.0));
    let x = clip.x / clip.w;
    let y = clip.y / clip.w;
    Vec2::new(
        viewport.x / 2.0 + viewport.x / 2.0 * x,
        viewport.y / 2.0 - viewport.y / 2.0 * y,
    )
}

#[test]
fn gpu_and_css_projections_agree_within_half_pixel() {
    let cam = camera();
    let viewport = Vec2::new(640.0, 480.0);
    let parsed = parse_matrix3d(&cam.css_matrix3d());

    let samples = [
        Vec3::new(0.0, 0.0, 150.0),
        Vec3::new(-250.0, 0.0, 0.0),
        Vec3::new(250.0, -40.0, 300.0),
        Vec3::new(120.0, 80.0, 10.0),
        Vec3::new(-30.0, 200.0, 290.0),
    ];
    for p in samples {
        let gpu = cam.project_px(p, viewport).expect("in front of camera");
        let css = css_project(&parsed, p, viewport);
        assert!(
            (gpu - css).length() < 0.5,
            "projection drift at {p:?}: gpu={gpu:?} css={css:?}"
        );
    }
}

#[test]
fn orbit_center_projects_to_viewport_center() {
    // The orbit center goes through the rotations at the origin, so it must
    // land exactly mid-viewport.
    let cam = camera();
    let viewport = Vec2::new(640.0, 480.0);
    let px = cam
        .project_px(Vec3::new(0.0, 0.0, 150.0), viewport)
        .expect("center visible");
    assert!((px.x - 320.0).abs() < 1e-3, "x was {}", px.x);
    assert!((px.y - 240.0).abs() < 1e-3, "y was {}", px.y);
}

#[test]
fn css_matrix_has_sixteen_components_in_column_major_order() {
    let cam = camera();
    let parsed = parse_matrix3d(&cam.css_matrix3d());
    let direct = cam.matrix();
    for (a, b) in parsed
        .to_cols_array()
        .iter()
        .zip(direct.to_cols_array().iter())
    {
        assert!((a - b).abs() < 1e-4, "serialized {a} vs computed {b}");
    }
}

#[test]
fn scene_transform_centers_and_flips_before_the_camera() {
    let cam = camera();
    let t = cam.scene_transform(Vec2::new(640.0, 480.0));
    assert!(t.starts_with("translate(320px, 240px) scale(320, -240) matrix3d("));
}

#[test]
fn rejects_nonpositive_viewport() {
    for (w, h) in [(0.0, 480.0), (640.0, 0.0), (-640.0, 480.0), (640.0, -1.0)] {
        let err = CameraState::for_viewport(w, h, 1200.0, Vec3::ZERO).unwrap_err();
        assert_eq!(err, ConfigError::InvalidViewport { width: w, height: h });
    }
}

#[test]
fn rejects_degenerate_distance() {
    for d in [0.0, -1.0, f32::NAN] {
        let err = CameraState::for_viewport(640.0, 480.0, d, Vec3::ZERO).unwrap_err();
        assert!(matches!(err, ConfigError::DegenerateCamera { name: "distance", .. }));
    }
}

#[test]
fn matrix_components_are_always_finite() {
    let cam = camera();
    assert!(cam.matrix().to_cols_array().iter().all(|v| v.is_finite()));
}

#[test]
fn points_behind_the_eye_do_not_project() {
    let cam = camera();
    let viewport = Vec2::new(640.0, 480.0);
    // far behind the orbit distance along the view axis
    assert!(cam.project_px(Vec3::new(0.0, 0.0, 1e6), viewport).is_none());
}
