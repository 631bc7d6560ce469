//! Color-buffer readback.

use glow::HasContext;

/// Reads the whole `width` x `height` color buffer as RGBA8.
///
/// Rows come back bottom-up, as GL returns them. Reading into client
/// memory waits for the preceding draw to finish.
#[allow(unsafe_code)]
pub fn read_rgba(gl: &glow::Context, width: u32, height: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; width as usize * height as usize * 4];
    // SAFETY: a context is current and `pixels` holds exactly
    // width * height * 4 bytes, which RGBA/UNSIGNED_BYTE with the default
    // pack alignment of 4 fills without padding.
    unsafe {
        gl.read_pixels(
            0,
            0,
            width as i32,
            height as i32,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelPackData::Slice(Some(pixels.as_mut_slice())),
        );
    }
    log::debug!("read back {} bytes", pixels.len());
    pixels
}
