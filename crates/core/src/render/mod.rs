//! Headless OpenGL rendering over EGL.
//!
//! This module is only available when the `render` feature is enabled.
//!
//! # Module overview
//!
//! - [`backend`] -- The EGL calls a session makes, as a trait.
//! - [`egl`] -- `khronos-egl` implementation and the fixed attribute lists.
//! - [`session`] -- Display, context, surface and current binding guards.
//! - [`shader`] -- Shader compilation and program linking.
//! - [`mesh`] -- Triangle vertex array, buffer and program.
//! - [`capture`] -- Color-buffer readback.
//! - [`pipeline`] -- One full run, from session to bitmap.

pub mod backend;
pub mod capture;
pub mod egl;
#[cfg(test)]
pub(crate) mod fake;
pub mod mesh;
pub mod pipeline;
pub mod session;
pub mod shader;

pub use backend::DisplayBackend;
pub use egl::Egl;
pub use mesh::TriangleMesh;
pub use pipeline::{render, render_with};
pub use session::Session;
pub use shader::{build_program, compile_shader, numbered_source, ShaderError, ShaderStage};
