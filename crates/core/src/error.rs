//! Error types for the egl-triangle core.

use thiserror::Error;

#[cfg(feature = "render")]
use crate::render::ShaderError;

/// Errors produced while acquiring the EGL session, rendering, or writing
/// the bitmap.
///
/// Every variant is terminal: by the time one is returned, every handle
/// acquired before the failing step has already been released.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The EGL shared library could not be loaded.
    #[error("failed to load the EGL library: {0}")]
    LibraryLoad(String),

    /// `eglGetDisplay` returned no display.
    #[error("failed to get EGL display")]
    NoDisplay,

    /// `eglInitialize` failed.
    #[error("failed to initialize EGL: {0}")]
    DisplayInit(String),

    /// `eglBindAPI(EGL_OPENGL_API)` failed.
    #[error("failed to bind OpenGL API: {0}")]
    BindApi(String),

    /// `eglChooseConfig` itself failed.
    #[error("failed to choose EGL configuration: {0}")]
    ChooseConfig(String),

    /// `eglChooseConfig` succeeded but matched zero configurations.
    #[error("failed to choose EGL configuration: no matching configuration")]
    NoMatchingConfig,

    /// `eglCreateContext` failed.
    #[error("failed to create EGL context: {0}")]
    CreateContext(String),

    /// `eglCreatePbufferSurface` failed.
    #[error("failed to create EGL surface: {0}")]
    CreateSurface(String),

    /// `eglMakeCurrent` failed.
    #[error("failed to make EGL context current: {0}")]
    MakeCurrent(String),

    /// One or more GL entry points did not resolve through the loader.
    #[error("failed to load OpenGL functions: unresolved {0}")]
    Loader(String),

    /// A shader stage failed to compile or the program failed to link.
    #[cfg(feature = "render")]
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// The driver refused to create a vertex array or buffer.
    #[error("failed to create {object}: {reason}")]
    GlObject { object: &'static str, reason: String },

    /// The bitmap could not be written.
    #[error("i/o error: {0}")]
    Io(String),

    /// Width or height was zero or too large for a 32-bit bitmap.
    #[error("invalid dimensions {width}x{height}: must be non-zero and fit a 32-bit BMP")]
    InvalidDimensions { width: u32, height: u32 },
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e.to_string())
    }
}
