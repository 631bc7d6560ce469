//! CLI errors and their exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 9:  libEGL could not be loaded
//! - 10: no EGL display
//! - 11: eglInitialize failed
//! - 12: eglBindAPI failed
//! - 13: no usable EGL configuration
//! - 14: context creation failed
//! - 15: pbuffer creation failed
//! - 16: eglMakeCurrent failed
//! - 17: GL entry points did not resolve
//! - 18: shader or GL object setup failed
//! - 19: bitmap could not be written
//! - 20: invalid --width/--height
//! - 21: JSON report could not be serialized

use egl_triangle_core::RenderError;
use std::fmt;

/// Errors produced by a CLI run.
pub enum CliError {
    /// Any failure of the render pipeline.
    Render(RenderError),
    /// The JSON report could not be produced.
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(e) => match e {
                RenderError::LibraryLoad(_) => 9,
                RenderError::NoDisplay => 10,
                RenderError::DisplayInit(_) => 11,
                RenderError::BindApi(_) => 12,
                RenderError::ChooseConfig(_) | RenderError::NoMatchingConfig => 13,
                RenderError::CreateContext(_) => 14,
                RenderError::CreateSurface(_) => 15,
                RenderError::MakeCurrent(_) => 16,
                RenderError::Loader(_) => 17,
                RenderError::Shader(_) | RenderError::GlObject { .. } => 18,
                RenderError::Io(_) => 19,
                RenderError::InvalidDimensions { .. } => 20,
            },
            CliError::Serialization(_) => 21,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Render(e) => write!(f, "{e}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        CliError::Render(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
