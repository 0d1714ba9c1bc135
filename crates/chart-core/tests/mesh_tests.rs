// Host-side tests for the procedural strip meshes: vertex counts must match
// the draw-call formulas exactly, or rendering corrupts.

use chart_core::{
    bar_mesh, wedge_mesh, wedge_segment_count, wedge_vertex_count, BAR_VERTEX_COUNT,
};

#[test]
fn bar_strip_has_exactly_sixteen_vertices() {
    let mesh = bar_mesh();
    assert_eq!(mesh.vertex_count(), BAR_VERTEX_COUNT);
    assert_eq!(mesh.vertices().len(), 16);
}

#[test]
fn bar_strip_covers_only_the_three_visible_faces() {
    let mesh = bar_mesh();
    // normals point left, front and up only; back/right/bottom are omitted
    for v in mesh.vertices() {
        let n = v.normal;
        assert!(
            n == [-1.0, 0.0, 0.0] || n == [0.0, -1.0, 0.0] || n == [0.0, 0.0, 1.0],
            "unexpected normal {n:?}"
        );
    }
}

#[test]
fn bar_positions_stay_in_unit_box() {
    for v in bar_mesh().vertices() {
        let [x, y, z] = v.position;
        assert!((-1.0..=1.0).contains(&x));
        assert!((-1.0..=1.0).contains(&y));
        assert!((0.0..=1.0).contains(&z));
    }
}

#[test]
fn segment_count_scales_with_angular_span() {
    assert_eq!(wedge_segment_count(0.0), 1);
    assert_eq!(wedge_segment_count(0.01), 1);
    assert_eq!(wedge_segment_count(1.0 / 64.0), 1);
    assert_eq!(wedge_segment_count(0.25), 16);
    assert_eq!(wedge_segment_count(0.5), 32);
    assert_eq!(wedge_segment_count(1.0), 64);
}

#[test]
fn segment_count_never_drops_below_one() {
    // a zero-span or junk value still needs a drawable sliver
    assert_eq!(wedge_segment_count(-1.0), 1);
    assert_eq!(wedge_segment_count(f32::NAN), 1);
}

#[test]
fn wedge_vertex_count_matches_formula_across_spans() {
    for step in 1..=64 {
        let value = step as f32 / 64.0;
        let segments = wedge_segment_count(value);
        let mesh = wedge_mesh(segments);
        assert_eq!(
            mesh.vertex_count(),
            wedge_vertex_count(segments),
            "mismatch at value {value}"
        );
        assert_eq!(mesh.vertex_count(), 6 * segments + 16);
    }
}

#[test]
fn wedge_parameters_stay_in_unit_ranges() {
    let mesh = wedge_mesh(7);
    for v in mesh.vertices() {
        let [x, y, z] = v.position;
        assert!((0.0..=1.0).contains(&x), "radial {x}");
        assert!((0.0..=1.0).contains(&y), "angular {y}");
        assert!((0.0..=1.0).contains(&z), "height {z}");
    }
}

#[test]
fn wedge_normals_are_unit_length() {
    for v in wedge_mesh(5).vertices() {
        let [x, y, z] = v.normal;
        let len = (x * x + y * y + z * z).sqrt();
        assert!((len - 1.0).abs() < 1e-6);
    }
}

#[test]
fn wedge_top_face_sits_at_full_height() {
    let segments = 9;
    let mesh = wedge_mesh(segments);
    // last 2s + 2 vertices form the top face
    let top = &mesh.vertices()[mesh.vertices().len() - (2 * segments as usize + 2)..];
    for v in top {
        assert_eq!(v.position[2], 1.0);
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn mesh_bytes_are_densely_packed() {
    let mesh = bar_mesh();
    // 6 floats per vertex, 4 bytes each
    assert_eq!(mesh.as_bytes().len(), mesh.vertices().len() * 24);
}
