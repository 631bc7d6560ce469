//! The display-API seam.
//!
//! [`DisplayBackend`] covers exactly the EGL calls a headless session
//! makes. The production implementation is [`crate::render::egl::Egl`];
//! tests substitute a recording fake so that acquisition failures and
//! release ordering can be checked without a driver.

use std::ffi::c_void;

/// The subset of EGL needed to open and close an offscreen GL session.
///
/// Failures carry the driver's error as a string; the session maps them to
/// the matching [`crate::RenderError`] kind.
pub trait DisplayBackend {
    type Display: Copy;
    type Config: Copy;
    type Context: Copy;
    type Surface: Copy;

    /// `eglGetDisplay(EGL_DEFAULT_DISPLAY)`.
    fn default_display(&self) -> Option<Self::Display>;

    /// `eglInitialize`, returning the negotiated `(major, minor)`.
    fn initialize(&self, display: Self::Display) -> Result<(i32, i32), String>;

    /// `eglBindAPI(EGL_OPENGL_API)`.
    fn bind_opengl_api(&self) -> Result<(), String>;

    /// `eglChooseConfig` keeping only the first match. `Ok(None)` means
    /// zero configurations matched.
    fn choose_config(
        &self,
        display: Self::Display,
        attribs: &[i32],
    ) -> Result<Option<Self::Config>, String>;

    fn create_context(
        &self,
        display: Self::Display,
        config: Self::Config,
        attribs: &[i32],
    ) -> Result<Self::Context, String>;

    fn create_pbuffer_surface(
        &self,
        display: Self::Display,
        config: Self::Config,
        attribs: &[i32],
    ) -> Result<Self::Surface, String>;

    /// Binds `surface` as draw and read target with `context`, or unbinds
    /// everything when `target` is `None`.
    fn make_current(
        &self,
        display: Self::Display,
        target: Option<(Self::Surface, Self::Context)>,
    ) -> Result<(), String>;

    /// `eglGetProcAddress`; null when the symbol does not resolve.
    fn proc_address(&self, name: &str) -> *const c_void;

    fn destroy_surface(&self, display: Self::Display, surface: Self::Surface)
        -> Result<(), String>;

    fn destroy_context(&self, display: Self::Display, context: Self::Context)
        -> Result<(), String>;

    fn terminate(&self, display: Self::Display) -> Result<(), String>;
}
