//! Render configuration: target size and output path.

use std::path::PathBuf;

use crate::bmp::HEADER_LEN;
use crate::error::RenderError;

/// Default pbuffer width in pixels.
pub const DEFAULT_WIDTH: u32 = 640;
/// Default pbuffer height in pixels.
pub const DEFAULT_HEIGHT: u32 = 480;
/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "triangle.bmp";

/// What to render and where to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl RenderConfig {
    /// Number of bytes in an RGBA8 readback of the whole surface.
    pub fn pixel_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Checks that the size is non-zero, fits GL's signed sizes, and that
    /// the resulting file size fits the 32-bit BMP size field.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidDimensions` otherwise.
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = RenderError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        if self.width == 0 || self.height == 0 {
            return Err(invalid);
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(invalid);
        }
        let file_len = HEADER_LEN as u64 + u64::from(self.width) * u64::from(self.height) * 4;
        if file_len > u64::from(u32::MAX) {
            return Err(invalid);
        }
        Ok(())
    }
}
