//! The fixed scene: triangle geometry, shader sources and colors.
//!
//! Also provides CPU-side helpers to predict the rendered image, used to
//! check readbacks pixel by pixel.

use glam::{Vec2, Vec4};

/// Triangle vertices in clip space, 3 floats per vertex, tightly packed.
pub const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0,
];

/// Floats per vertex for attribute location 0.
pub const COMPONENTS_PER_VERTEX: i32 = 3;

/// Number of vertices in one draw.
pub const VERTEX_COUNT: i32 = 3;

/// Color the target is cleared to before drawing.
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.2, 0.3, 0.3, 1.0);

/// Constant output of the fragment stage.
pub const FRAGMENT_COLOR: Vec4 = Vec4::new(1.0, 0.5, 0.2, 1.0);

/// GLSL 3.30 core vertex shader: position passes through with w = 1.
pub const VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

/// GLSL 3.30 core fragment shader: constant opaque orange.
pub const FRAGMENT_SHADER: &str = r#"#version 330 core
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
"#;

/// Converts a normalized color to 8-bit channels the way a UNORM8 color
/// buffer stores it.
pub fn to_rgba8(color: Vec4) -> [u8; 4] {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
    [
        c.x.round() as u8,
        c.y.round() as u8,
        c.z.round() as u8,
        c.w.round() as u8,
    ]
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

/// Signed distance-like coverage of the pixel centered at `(x, y)`, in
/// pixels. Positive inside the triangle, negative outside.
///
/// `y` counts rows from the bottom, matching GL readback order.
pub fn coverage(width: u32, height: u32, x: u32, y: u32) -> f32 {
    let size = Vec2::new(width as f32, height as f32);
    let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
    let corners = [0, 1, 2].map(|i| {
        let ndc = Vec2::new(TRIANGLE_VERTICES[i * 3], TRIANGLE_VERTICES[i * 3 + 1]);
        (ndc + Vec2::ONE) * 0.5 * size
    });

    let mut nearest = f32::INFINITY;
    for i in 0..3 {
        let a = corners[i];
        let b = corners[(i + 1) % 3];
        let dist = edge(a, b, center) / (b - a).length();
        nearest = nearest.min(dist);
    }
    nearest
}

/// Expected RGBA8 color of pixel `(x, y)`, or `None` when the pixel center
/// lies within `margin` pixels of an edge and rasterization may go either
/// way.
pub fn expected_pixel(width: u32, height: u32, x: u32, y: u32, margin: f32) -> Option<[u8; 4]> {
    let d = coverage(width, height, x, y);
    if d > margin {
        Some(to_rgba8(FRAGMENT_COLOR))
    } else if d < -margin {
        Some(to_rgba8(CLEAR_COLOR))
    } else {
        None
    }
}
