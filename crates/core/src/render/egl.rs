//! EGL backend over `khronos-egl`, plus the fixed attribute lists.
//!
//! libEGL is loaded at runtime, so a machine without it fails with
//! `RenderError::LibraryLoad` instead of failing to link.

use std::ffi::c_void;

use khronos_egl as egl;

use super::backend::DisplayBackend;
use crate::error::RenderError;

// EGL_KHR_create_context, core in EGL 1.5.
const CONTEXT_MAJOR_VERSION: egl::Int = 0x3098;
const CONTEXT_MINOR_VERSION: egl::Int = 0x30FB;
const CONTEXT_OPENGL_PROFILE_MASK: egl::Int = 0x30FD;
const CONTEXT_OPENGL_CORE_PROFILE_BIT: egl::Int = 0x0000_0001;

/// Requested GL context version.
pub const GL_VERSION: (i32, i32) = (3, 3);

/// Pbuffer-capable config with RGBA8 color, 24-bit depth and 8-bit stencil.
pub fn config_attribs() -> [egl::Int; 15] {
    [
        egl::SURFACE_TYPE,
        egl::PBUFFER_BIT,
        egl::RED_SIZE,
        8,
        egl::GREEN_SIZE,
        8,
        egl::BLUE_SIZE,
        8,
        egl::ALPHA_SIZE,
        8,
        egl::DEPTH_SIZE,
        24,
        egl::STENCIL_SIZE,
        8,
        egl::NONE,
    ]
}

/// OpenGL core-profile context of the given version.
pub fn context_attribs((major, minor): (i32, i32)) -> [egl::Int; 7] {
    [
        CONTEXT_MAJOR_VERSION,
        major,
        CONTEXT_MINOR_VERSION,
        minor,
        CONTEXT_OPENGL_PROFILE_MASK,
        CONTEXT_OPENGL_CORE_PROFILE_BIT,
        egl::NONE,
    ]
}

/// Fixed-size pbuffer.
pub fn pbuffer_attribs(width: u32, height: u32) -> [egl::Int; 5] {
    [
        egl::WIDTH,
        width as egl::Int,
        egl::HEIGHT,
        height as egl::Int,
        egl::NONE,
    ]
}

/// Dynamically loaded EGL 1.4 entry points.
pub struct Egl {
    instance: egl::DynamicInstance<egl::EGL1_4>,
}

impl Egl {
    /// Loads libEGL and resolves the EGL 1.4 entry points.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::LibraryLoad` if the library or any required
    /// symbol is missing.
    #[allow(unsafe_code)]
    pub fn load() -> Result<Self, RenderError> {
        // SAFETY: loading libEGL runs its initializers; the library is a
        // system graphics driver and stays loaded for the instance lifetime.
        let instance = unsafe { egl::DynamicInstance::<egl::EGL1_4>::load_required() }
            .map_err(|e| RenderError::LibraryLoad(e.to_string()))?;
        log::debug!("loaded libEGL");
        Ok(Self { instance })
    }
}

impl DisplayBackend for Egl {
    type Display = egl::Display;
    type Config = egl::Config;
    type Context = egl::Context;
    type Surface = egl::Surface;

    #[allow(unsafe_code)]
    fn default_display(&self) -> Option<egl::Display> {
        // SAFETY: EGL_DEFAULT_DISPLAY is always a valid native display id.
        unsafe { self.instance.get_display(egl::DEFAULT_DISPLAY) }
    }

    fn initialize(&self, display: egl::Display) -> Result<(i32, i32), String> {
        self.instance.initialize(display).map_err(|e| e.to_string())
    }

    fn bind_opengl_api(&self) -> Result<(), String> {
        self.instance
            .bind_api(egl::OPENGL_API)
            .map_err(|e| e.to_string())
    }

    fn choose_config(
        &self,
        display: egl::Display,
        attribs: &[i32],
    ) -> Result<Option<egl::Config>, String> {
        self.instance
            .choose_first_config(display, attribs)
            .map_err(|e| e.to_string())
    }

    fn create_context(
        &self,
        display: egl::Display,
        config: egl::Config,
        attribs: &[i32],
    ) -> Result<egl::Context, String> {
        self.instance
            .create_context(display, config, None, attribs)
            .map_err(|e| e.to_string())
    }

    fn create_pbuffer_surface(
        &self,
        display: egl::Display,
        config: egl::Config,
        attribs: &[i32],
    ) -> Result<egl::Surface, String> {
        self.instance
            .create_pbuffer_surface(display, config, attribs)
            .map_err(|e| e.to_string())
    }

    fn make_current(
        &self,
        display: egl::Display,
        target: Option<(egl::Surface, egl::Context)>,
    ) -> Result<(), String> {
        let (surface, context) = match target {
            Some((s, c)) => (Some(s), Some(c)),
            None => (None, None),
        };
        self.instance
            .make_current(display, surface, surface, context)
            .map_err(|e| e.to_string())
    }

    fn proc_address(&self, name: &str) -> *const c_void {
        self.instance
            .get_proc_address(name)
            .map_or(std::ptr::null(), |f| f as *const c_void)
    }

    fn destroy_surface(&self, display: egl::Display, surface: egl::Surface) -> Result<(), String> {
        self.instance
            .destroy_surface(display, surface)
            .map_err(|e| e.to_string())
    }

    fn destroy_context(&self, display: egl::Display, context: egl::Context) -> Result<(), String> {
        self.instance
            .destroy_context(display, context)
            .map_err(|e| e.to_string())
    }

    fn terminate(&self, display: egl::Display) -> Result<(), String> {
        self.instance.terminate(display).map_err(|e| e.to_string())
    }
}
