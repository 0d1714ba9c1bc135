//! Procedural triangle-strip meshes for bars and pie wedges.
//!
//! Buffers are flattened as two-vertex batches with degenerate connector
//! vertices bridging faces that are not strip-contiguous. The vertex count of
//! every buffer must exactly match the count handed to the draw call; the
//! formulas here are the single source of truth for both sides.

use crate::constants::WEDGE_SEGMENTS_PER_TURN;
use bytemuck::{Pod, Zeroable};

/// One strip vertex: unit-space position plus face normal, laid out for
/// direct GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Static vertex data for one primitive instance.
#[derive(Clone, Debug)]
pub struct MeshBuffer {
    vertices: Vec<Vertex>,
}

impl MeshBuffer {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

/// Vertices in the fixed bar strip: three 4-vertex faces plus two degenerate
/// connector pairs.
pub const BAR_VERTEX_COUNT: u32 = 16;

/// Rectangular prism over the unit footprint x,y in [-1,1], z in [0,1].
///
/// Only the left, front and top faces are emitted; the back, right and bottom
/// faces are never visible from the fixed camera orbit and are omitted on
/// purpose.
pub fn bar_mesh() -> MeshBuffer {
    const L: [f32; 3] = [-1.0, 0.0, 0.0];
    const F: [f32; 3] = [0.0, -1.0, 0.0];
    const T: [f32; 3] = [0.0, 0.0, 1.0];

    let vertices = vec![
        // left face
        v([-1.0, 1.0, 0.0], L),
        v([-1.0, -1.0, 0.0], L),
        v([-1.0, 1.0, 1.0], L),
        v([-1.0, -1.0, 1.0], L),
        // degen connector
        v([-1.0, -1.0, 1.0], L),
        v([-1.0, -1.0, 0.0], F),
        // front face
        v([-1.0, -1.0, 0.0], F),
        v([1.0, -1.0, 0.0], F),
        v([-1.0, -1.0, 1.0], F),
        v([1.0, -1.0, 1.0], F),
        // degen connector
        v([1.0, -1.0, 1.0], F),
        v([-1.0, -1.0, 1.0], T),
        // top face
        v([-1.0, -1.0, 1.0], T),
        v([1.0, -1.0, 1.0], T),
        v([-1.0, 1.0, 1.0], T),
        v([1.0, 1.0, 1.0], T),
    ];
    debug_assert_eq!(vertices.len() as u32, BAR_VERTEX_COUNT);
    MeshBuffer { vertices }
}

/// Segments needed for a wedge spanning `value` of a full turn: 64 per turn,
/// at least one.
pub fn wedge_segment_count(value: f32) -> u32 {
    ((value * WEDGE_SEGMENTS_PER_TURN).ceil() as u32).max(1)
}

/// Vertices in a wedge strip with the given segment count: three curved faces
/// of `2s + 2` vertices each, two flat 4-vertex faces and one 2-vertex
/// connector.
pub fn wedge_vertex_count(segments: u32) -> u32 {
    6 * segments + 16
}

/// Annular wedge in unit parameter space: x is radial (0 inner, 1 outer),
/// y is the angular fraction (0 start, 1 end), z is height. The vertex shader
/// bends the strip around the azimuth.
pub fn wedge_mesh(segments: u32) -> MeshBuffer {
    let segments = segments.max(1);
    let s = segments as f32;

    const INNER: [f32; 3] = [-1.0, 0.0, 0.0];
    const START: [f32; 3] = [0.0, -1.0, 0.0];
    const OUTER: [f32; 3] = [1.0, 0.0, 0.0];
    const END: [f32; 3] = [0.0, 1.0, 0.0];
    const TOP: [f32; 3] = [0.0, 0.0, 1.0];

    let mut vertices = Vec::with_capacity(wedge_vertex_count(segments) as usize);

    // inner face, swept from the end azimuth back to the start
    for i in 0..segments {
        let t = 1.0 - i as f32 / s;
        vertices.push(v([0.0, t, 1.0], INNER));
        vertices.push(v([0.0, t, 0.0], INNER));
    }
    vertices.push(v([0.0, 0.0, 1.0], INNER));
    vertices.push(v([0.0, 0.0, 0.0], INNER));

    // start face
    vertices.push(v([0.0, 0.0, 1.0], START));
    vertices.push(v([0.0, 0.0, 0.0], START));
    vertices.push(v([1.0, 0.0, 1.0], START));
    vertices.push(v([1.0, 0.0, 0.0], START));

    // outer face
    for i in 0..segments {
        let t = i as f32 / s;
        vertices.push(v([1.0, t, 1.0], OUTER));
        vertices.push(v([1.0, t, 0.0], OUTER));
    }
    vertices.push(v([1.0, 1.0, 1.0], OUTER));
    vertices.push(v([1.0, 1.0, 0.0], OUTER));

    // end face
    vertices.push(v([1.0, 1.0, 1.0], END));
    vertices.push(v([1.0, 1.0, 0.0], END));
    vertices.push(v([0.0, 1.0, 1.0], END));
    vertices.push(v([0.0, 1.0, 0.0], END));

    // degen connector into the top face
    vertices.push(v([0.0, 1.0, 0.0], END));
    vertices.push(v([0.0, 0.0, 1.0], TOP));

    // top face
    for i in 0..segments {
        let t = i as f32 / s;
        vertices.push(v([0.0, t, 1.0], TOP));
        vertices.push(v([1.0, t, 1.0], TOP));
    }
    vertices.push(v([0.0, 1.0, 1.0], TOP));
    vertices.push(v([1.0, 1.0, 1.0], TOP));

    debug_assert_eq!(vertices.len() as u32, wedge_vertex_count(segments));
    MeshBuffer { vertices }
}
