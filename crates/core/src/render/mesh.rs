//! GPU-side triangle: vertex array, vertex buffer and shader program.

use glow::HasContext;

use super::shader::build_program;
use crate::error::RenderError;
use crate::scene::{
    COMPONENTS_PER_VERTEX, FRAGMENT_SHADER, TRIANGLE_VERTICES, VERTEX_COUNT, VERTEX_SHADER,
};

/// The GL objects needed to draw the triangle.
///
/// Not released on drop: GL objects must be deleted while the context is
/// still current, so the owner calls [`TriangleMesh::destroy`] before the
/// session goes away.
pub struct TriangleMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    program: glow::Program,
}

impl TriangleMesh {
    /// Uploads the vertices once with `STATIC_DRAW`, describes attribute 0
    /// as three tightly packed floats, and builds the shader program.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Shader` if the shaders fail to compile or link,
    /// or `RenderError::GlObject` if the vertex array or buffer cannot be
    /// created. Objects created before the failure are deleted.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context) -> Result<Self, RenderError> {
        let program = build_program(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        // SAFETY: a context is current; every handle below comes from it and
        // is deleted on the failing paths.
        unsafe {
            let vao = match gl.create_vertex_array() {
                Ok(vao) => vao,
                Err(reason) => {
                    gl.delete_program(program);
                    return Err(create_error("vertex array", reason));
                }
            };
            gl.bind_vertex_array(Some(vao));

            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(reason) => {
                    gl.bind_vertex_array(None);
                    gl.delete_vertex_array(vao);
                    gl.delete_program(program);
                    return Err(create_error("vertex buffer", reason));
                }
            };
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(TRIANGLE_VERTICES.as_slice()),
                glow::STATIC_DRAW,
            );

            let stride = COMPONENTS_PER_VERTEX * std::mem::size_of::<f32>() as i32;
            gl.vertex_attrib_pointer_f32(0, COMPONENTS_PER_VERTEX, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);

            log::debug!("uploaded {} vertices", VERTEX_COUNT);
            Ok(Self { vao, vbo, program })
        }
    }

    /// Sets the viewport, clears to `clear`, and draws the triangle once.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context, width: u32, height: u32, clear: [f32; 4]) {
        // SAFETY: the handles are live objects of the current context.
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
            gl.clear_color(clear[0], clear[1], clear[2], clear[3]);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, VERTEX_COUNT);
        }
    }

    /// Deletes the vertex array, the vertex buffer and the program, in that
    /// order.
    #[allow(unsafe_code)]
    pub fn destroy(self, gl: &glow::Context) {
        // SAFETY: the handles are live objects of the current context and
        // `self` is consumed, so none is used again.
        unsafe {
            gl.bind_vertex_array(None);
            gl.use_program(None);
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_program(self.program);
        }
        log::debug!("deleted triangle GL objects");
    }
}

fn create_error(object: &'static str, reason: String) -> RenderError {
    RenderError::GlObject { object, reason }
}
