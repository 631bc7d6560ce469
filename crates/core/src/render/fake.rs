//! Recording stand-in for EGL, used by tests that exercise acquisition
//! and release order without a driver.

use std::cell::RefCell;
use std::ffi::c_void;
use std::ptr::NonNull;

use super::backend::DisplayBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    GetDisplay,
    Initialize,
    BindApi,
    ChooseConfig,
    CreateContext,
    CreateSurface,
    MakeCurrent,
    ReleaseCurrent,
    DestroySurface,
    DestroyContext,
    Terminate,
}

#[derive(Default)]
pub(crate) struct FakeEgl {
    pub(crate) calls: RefCell<Vec<Call>>,
    pub(crate) fail_at: Option<Call>,
    pub(crate) zero_configs: bool,
    pub(crate) missing_symbol: Option<&'static str>,
}

impl FakeEgl {
    pub(crate) fn failing_at(step: Call) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    fn step(&self, call: Call) -> Result<(), String> {
        self.calls.borrow_mut().push(call);
        if self.fail_at == Some(call) {
            Err(format!("{call:?} rejected"))
        } else {
            Ok(())
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl DisplayBackend for FakeEgl {
    type Display = u8;
    type Config = u8;
    type Context = u8;
    type Surface = u8;

    fn default_display(&self) -> Option<u8> {
        self.step(Call::GetDisplay).ok().map(|()| 1)
    }

    fn initialize(&self, _display: u8) -> Result<(i32, i32), String> {
        self.step(Call::Initialize).map(|()| (1, 5))
    }

    fn bind_opengl_api(&self) -> Result<(), String> {
        self.step(Call::BindApi)
    }

    fn choose_config(&self, _display: u8, _attribs: &[i32]) -> Result<Option<u8>, String> {
        self.step(Call::ChooseConfig)?;
        Ok((!self.zero_configs).then_some(2))
    }

    fn create_context(&self, _d: u8, _c: u8, _attribs: &[i32]) -> Result<u8, String> {
        self.step(Call::CreateContext).map(|()| 3)
    }

    fn create_pbuffer_surface(&self, _d: u8, _c: u8, _attribs: &[i32]) -> Result<u8, String> {
        self.step(Call::CreateSurface).map(|()| 4)
    }

    fn make_current(&self, _d: u8, target: Option<(u8, u8)>) -> Result<(), String> {
        match target {
            Some(_) => self.step(Call::MakeCurrent),
            None => self.step(Call::ReleaseCurrent),
        }
    }

    fn proc_address(&self, name: &str) -> *const c_void {
        if self.missing_symbol == Some(name) {
            std::ptr::null()
        } else {
            NonNull::<c_void>::dangling().as_ptr()
        }
    }

    fn destroy_surface(&self, _d: u8, _s: u8) -> Result<(), String> {
        self.step(Call::DestroySurface)
    }

    fn destroy_context(&self, _d: u8, _c: u8) -> Result<(), String> {
        self.step(Call::DestroyContext)
    }

    fn terminate(&self, _d: u8) -> Result<(), String> {
        self.step(Call::Terminate)
    }
}
