#![deny(unsafe_code)]
//! Core of egl-triangle: draws one triangle into an offscreen EGL pbuffer
//! and saves the readback as a 32-bit BMP.
//!
//! The `config`, `scene`, `bmp` and `report` modules are pure and always
//! available. GPU access lives in `render`, behind the `render` feature.

pub mod bmp;
pub mod config;
pub mod error;
pub mod report;
pub mod scene;

#[cfg(feature = "render")]
pub mod render;

pub use config::RenderConfig;
pub use error::RenderError;
pub use report::RenderReport;
