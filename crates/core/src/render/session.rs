//! Headless GL session: display, context, pbuffer surface and current
//! binding, each owned by a guard that releases it on drop.
//!
//! Acquisition follows a fixed order (display, initialize, bind API,
//! config, context, surface, make current, entry points). Release is the
//! exact reverse and happens on every exit path: a failed step drops the
//! guards acquired before it, and a finished [`Session`] drops all of them.

use super::backend::DisplayBackend;
use super::egl::{config_attribs, context_attribs, pbuffer_attribs, GL_VERSION};
use crate::config::RenderConfig;
use crate::error::RenderError;

/// GL entry points the renderer calls. All must resolve before any GL call
/// is made.
pub const REQUIRED_GL_SYMBOLS: &[&str] = &[
    "glGetString",
    "glGetStringi",
    "glGetIntegerv",
    "glViewport",
    "glClearColor",
    "glClear",
    "glGenVertexArrays",
    "glBindVertexArray",
    "glDeleteVertexArrays",
    "glGenBuffers",
    "glBindBuffer",
    "glBufferData",
    "glDeleteBuffers",
    "glVertexAttribPointer",
    "glEnableVertexAttribArray",
    "glCreateShader",
    "glShaderSource",
    "glCompileShader",
    "glGetShaderiv",
    "glGetShaderInfoLog",
    "glDeleteShader",
    "glCreateProgram",
    "glAttachShader",
    "glDetachShader",
    "glLinkProgram",
    "glGetProgramiv",
    "glGetProgramInfoLog",
    "glUseProgram",
    "glDeleteProgram",
    "glDrawArrays",
    "glReadPixels",
];

struct DisplayGuard<'a, B: DisplayBackend> {
    backend: &'a B,
    display: B::Display,
}

impl<B: DisplayBackend> Drop for DisplayGuard<'_, B> {
    fn drop(&mut self) {
        match self.backend.terminate(self.display) {
            Ok(()) => log::debug!("terminated EGL display"),
            Err(e) => log::warn!("eglTerminate failed: {e}"),
        }
    }
}

struct ContextGuard<'a, B: DisplayBackend> {
    backend: &'a B,
    display: B::Display,
    context: B::Context,
}

impl<B: DisplayBackend> Drop for ContextGuard<'_, B> {
    fn drop(&mut self) {
        match self.backend.destroy_context(self.display, self.context) {
            Ok(()) => log::debug!("destroyed EGL context"),
            Err(e) => log::warn!("eglDestroyContext failed: {e}"),
        }
    }
}

struct SurfaceGuard<'a, B: DisplayBackend> {
    backend: &'a B,
    display: B::Display,
    surface: B::Surface,
}

impl<B: DisplayBackend> Drop for SurfaceGuard<'_, B> {
    fn drop(&mut self) {
        match self.backend.destroy_surface(self.display, self.surface) {
            Ok(()) => log::debug!("destroyed pbuffer surface"),
            Err(e) => log::warn!("eglDestroySurface failed: {e}"),
        }
    }
}

struct CurrentGuard<'a, B: DisplayBackend> {
    backend: &'a B,
    display: B::Display,
}

impl<B: DisplayBackend> Drop for CurrentGuard<'_, B> {
    fn drop(&mut self) {
        match self.backend.make_current(self.display, None) {
            Ok(()) => log::debug!("released current context"),
            Err(e) => log::warn!("eglMakeCurrent(none) failed: {e}"),
        }
    }
}

/// A current OpenGL 3.3 core context rendering into an offscreen pbuffer.
///
/// Dropping the session releases, in order: the current binding, the
/// surface, the context, the display. GL objects created through
/// [`Session::load_gl`] must be deleted before that.
pub struct Session<'a, B: DisplayBackend> {
    // Field order is drop order.
    current: CurrentGuard<'a, B>,
    _surface: SurfaceGuard<'a, B>,
    _context: ContextGuard<'a, B>,
    _display: DisplayGuard<'a, B>,
    version: (i32, i32),
    width: u32,
    height: u32,
}

impl<'a, B: DisplayBackend> Session<'a, B> {
    /// Opens the session for a `config.width` x `config.height` pbuffer.
    ///
    /// # Errors
    ///
    /// Returns the `RenderError` kind of the first step that fails. Every
    /// handle acquired before that step is released before returning.
    pub fn open(backend: &'a B, config: &RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;

        let display = backend.default_display().ok_or(RenderError::NoDisplay)?;
        let version = backend
            .initialize(display)
            .map_err(RenderError::DisplayInit)?;
        let display = DisplayGuard { backend, display };
        log::info!("EGL {}.{} initialized", version.0, version.1);

        backend.bind_opengl_api().map_err(RenderError::BindApi)?;

        let egl_config = backend
            .choose_config(display.display, &config_attribs())
            .map_err(RenderError::ChooseConfig)?
            .ok_or(RenderError::NoMatchingConfig)?;
        log::debug!("chose pbuffer config");

        let context = backend
            .create_context(display.display, egl_config, &context_attribs(GL_VERSION))
            .map_err(RenderError::CreateContext)?;
        let context = ContextGuard {
            backend,
            display: display.display,
            context,
        };
        log::debug!("created GL {}.{} core context", GL_VERSION.0, GL_VERSION.1);

        let surface = backend
            .create_pbuffer_surface(
                display.display,
                egl_config,
                &pbuffer_attribs(config.width, config.height),
            )
            .map_err(RenderError::CreateSurface)?;
        let surface = SurfaceGuard {
            backend,
            display: display.display,
            surface,
        };
        log::debug!("created {}x{} pbuffer", config.width, config.height);

        backend
            .make_current(display.display, Some((surface.surface, context.context)))
            .map_err(RenderError::MakeCurrent)?;
        let current = CurrentGuard {
            backend,
            display: display.display,
        };

        let missing: Vec<&str> = REQUIRED_GL_SYMBOLS
            .iter()
            .copied()
            .filter(|name| backend.proc_address(name).is_null())
            .collect();
        if !missing.is_empty() {
            return Err(RenderError::Loader(missing.join(", ")));
        }
        log::debug!("resolved {} GL entry points", REQUIRED_GL_SYMBOLS.len());

        Ok(Self {
            current,
            _surface: surface,
            _context: context,
            _display: display,
            version,
            width: config.width,
            height: config.height,
        })
    }

    /// The EGL version negotiated by `eglInitialize`.
    pub fn version(&self) -> (i32, i32) {
        self.version
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Builds a `glow::Context` whose entry points are resolved against
    /// this session's current context.
    #[allow(unsafe_code)]
    pub fn load_gl(&self) -> glow::Context {
        let backend = self.current.backend;
        // SAFETY: the context is current on this thread for the lifetime of
        // `self`, and `open` verified every entry point the renderer calls.
        unsafe { glow::Context::from_loader_function(|name| backend.proc_address(name)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fake::{Call, FakeEgl};

    const ACQUIRE: [Call; 7] = [
        Call::GetDisplay,
        Call::Initialize,
        Call::BindApi,
        Call::ChooseConfig,
        Call::CreateContext,
        Call::CreateSurface,
        Call::MakeCurrent,
    ];

    fn open(egl: &FakeEgl) -> Result<Session<'_, FakeEgl>, RenderError> {
        Session::open(egl, &RenderConfig::default())
    }

    #[test]
    fn open_acquires_in_order_and_reports_version() {
        let egl = FakeEgl::default();
        let session = open(&egl).unwrap();

        assert_eq!(session.version(), (1, 5));
        assert_eq!((session.width(), session.height()), (640, 480));
        assert_eq!(egl.calls(), ACQUIRE.to_vec());
    }

    #[test]
    fn drop_releases_everything_in_reverse_order() {
        let egl = FakeEgl::default();
        drop(open(&egl).unwrap());

        let mut expected = ACQUIRE.to_vec();
        expected.extend([
            Call::ReleaseCurrent,
            Call::DestroySurface,
            Call::DestroyContext,
            Call::Terminate,
        ]);
        assert_eq!(egl.calls(), expected);
    }

    #[test]
    fn missing_display_acquires_nothing() {
        let egl = FakeEgl::failing_at(Call::GetDisplay);
        assert!(matches!(open(&egl), Err(RenderError::NoDisplay)));
        assert_eq!(egl.calls(), vec![Call::GetDisplay]);
    }

    #[test]
    fn failed_initialize_does_not_terminate() {
        let egl = FakeEgl::failing_at(Call::Initialize);
        assert!(matches!(open(&egl), Err(RenderError::DisplayInit(_))));
        assert_eq!(egl.calls(), vec![Call::GetDisplay, Call::Initialize]);
    }

    #[test]
    fn failed_bind_api_terminates_display() {
        let egl = FakeEgl::failing_at(Call::BindApi);
        assert!(matches!(open(&egl), Err(RenderError::BindApi(_))));
        assert_eq!(egl.calls().last(), Some(&Call::Terminate));
    }

    #[test]
    fn zero_configs_stops_before_any_context() {
        let egl = FakeEgl {
            zero_configs: true,
            ..FakeEgl::default()
        };
        assert!(matches!(open(&egl), Err(RenderError::NoMatchingConfig)));
        assert_eq!(
            egl.calls(),
            vec![
                Call::GetDisplay,
                Call::Initialize,
                Call::BindApi,
                Call::ChooseConfig,
                Call::Terminate,
            ]
        );
    }

    #[test]
    fn choose_config_error_is_reported() {
        let egl = FakeEgl::failing_at(Call::ChooseConfig);
        assert!(matches!(open(&egl), Err(RenderError::ChooseConfig(_))));
        assert!(!egl.calls().contains(&Call::CreateContext));
    }

    #[test]
    fn failed_context_terminates_display_only() {
        let egl = FakeEgl::failing_at(Call::CreateContext);
        assert!(matches!(open(&egl), Err(RenderError::CreateContext(_))));
        assert_eq!(&egl.calls()[5..], &[Call::Terminate]);
    }

    #[test]
    fn failed_surface_destroys_context_then_display() {
        let egl = FakeEgl::failing_at(Call::CreateSurface);
        assert!(matches!(open(&egl), Err(RenderError::CreateSurface(_))));
        assert_eq!(
            &egl.calls()[6..],
            &[Call::DestroyContext, Call::Terminate]
        );
    }

    #[test]
    fn failed_activation_releases_surface_and_context() {
        let egl = FakeEgl::failing_at(Call::MakeCurrent);
        assert!(matches!(open(&egl), Err(RenderError::MakeCurrent(_))));
        assert_eq!(
            &egl.calls()[7..],
            &[Call::DestroySurface, Call::DestroyContext, Call::Terminate]
        );
    }

    #[test]
    fn unresolved_entry_point_unwinds_everything() {
        let egl = FakeEgl {
            missing_symbol: Some("glReadPixels"),
            ..FakeEgl::default()
        };
        let err = open(&egl).err().unwrap();

        assert!(matches!(err, RenderError::Loader(ref names) if names == "glReadPixels"));
        assert_eq!(
            &egl.calls()[7..],
            &[
                Call::ReleaseCurrent,
                Call::DestroySurface,
                Call::DestroyContext,
                Call::Terminate,
            ]
        );
    }

    #[test]
    fn failing_release_still_releases_the_rest() {
        let egl = FakeEgl::failing_at(Call::DestroySurface);
        drop(open(&egl).unwrap());
        assert_eq!(
            &egl.calls()[7..],
            &[
                Call::ReleaseCurrent,
                Call::DestroySurface,
                Call::DestroyContext,
                Call::Terminate,
            ]
        );
    }

    #[test]
    fn invalid_dimensions_touch_nothing() {
        let egl = FakeEgl::default();
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            Session::open(&egl, &config),
            Err(RenderError::InvalidDimensions { .. })
        ));
        assert!(egl.calls().is_empty());
    }
}
