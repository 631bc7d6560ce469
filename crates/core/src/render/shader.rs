//! Shader compilation and program linking.
//!
//! Compile and link status are always checked; a failure carries the
//! driver's info log, and for compile failures the numbered GLSL source.
//! Shader objects never outlive [`build_program`]: they are deleted as
//! soon as the program is linked (or on the failing path).

use std::fmt;

use glow::HasContext;
use thiserror::Error;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL shader type constant for this stage.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors from building the triangle's shader program.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// The driver refused to create a shader or program object.
    #[error("failed to create {object}: {reason}")]
    Create { object: &'static str, reason: String },

    /// A stage failed to compile.
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    /// The program failed to link.
    #[error("shader program failed to link:\n{0}")]
    Link(String),
}

/// Prefixes each line of `source` with its right-aligned line number and
/// appends the driver `log` after a blank line.
///
/// Driver logs cite line numbers, so this puts both side by side.
pub fn numbered_source(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();

    let mut out = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    if !log.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(log.trim_end());
    }
    out
}

/// Compiles one stage.
///
/// # Errors
///
/// Returns `ShaderError::Create` or `ShaderError::Compile`; the shader
/// object is deleted on the failing path.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    // SAFETY: a context is current; the shader handle comes from the same
    // context and is deleted on every failing path.
    unsafe {
        let shader = gl
            .create_shader(stage.gl_type())
            .map_err(|reason| ShaderError::Create {
                object: "shader",
                reason,
            })?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if gl.get_shader_compile_status(shader) {
            log::debug!("compiled {stage} shader");
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            Err(ShaderError::Compile {
                stage,
                log: numbered_source(source, &log),
            })
        }
    }
}

/// Compiles both stages, links them, and deletes the shader objects.
///
/// # Errors
///
/// Returns the first compile or link failure. No shader or program object
/// is left behind on error.
#[allow(unsafe_code)]
pub fn build_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, ShaderError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_src)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: `vertex` was created by this context above.
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    // SAFETY: both shaders are valid handles from this context. They are
    // detached and deleted right after linking; the program keeps its own
    // linked binary.
    unsafe {
        let program = match gl.create_program() {
            Ok(p) => p,
            Err(reason) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ShaderError::Create {
                    object: "program",
                    reason,
                });
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if gl.get_program_link_status(program) {
            log::debug!("linked shader program");
            Ok(program)
        } else {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            Err(ShaderError::Link(log))
        }
    }
}
