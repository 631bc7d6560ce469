//! Uncompressed 32-bit BMP encoding of an RGBA8 readback.
//!
//! The file is a 14-byte file header, a 40-byte `BITMAPINFOHEADER`, then
//! the pixel bytes exactly as read back from GL. A positive height makes
//! the rows bottom-up, which is also GL's readback order, so no flip is
//! performed. The channel order is left as RGBA; no color conversion.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::RenderError;

/// Length of the file header.
pub const FILE_HEADER_LEN: usize = 14;
/// Length of the info header.
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the pixel data from the start of the file.
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

const BITS_PER_PIXEL: u16 = 32;

/// Builds the file header for `pixel_len` bytes of pixel data.
///
/// `pixel_len` must come from [`check_len`], which keeps the total file
/// length within `u32`.
pub(crate) fn file_header(pixel_len: u32) -> [u8; FILE_HEADER_LEN] {
    let file_len = HEADER_LEN as u32 + pixel_len;
    let mut header = [0u8; FILE_HEADER_LEN];
    header[0..2].copy_from_slice(b"BM");
    header[2..6].copy_from_slice(&file_len.to_le_bytes());
    // bytes 6..10 are the two reserved u16 fields
    header[10..14].copy_from_slice(&(HEADER_LEN as u32).to_le_bytes());
    header
}

/// Builds the `BITMAPINFOHEADER` for a `width` x `height` 32-bit image.
///
/// Compression, image size, resolution and palette fields stay zero.
pub fn info_header(width: u32, height: u32) -> [u8; INFO_HEADER_LEN] {
    let mut header = [0u8; INFO_HEADER_LEN];
    header[0..4].copy_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    header[4..8].copy_from_slice(&width.to_le_bytes());
    header[8..12].copy_from_slice(&height.to_le_bytes());
    header[12..14].copy_from_slice(&1u16.to_le_bytes());
    header[14..16].copy_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    header
}

/// Checks that `len` is `width * height * 4` and that the whole file fits
/// the header's 32-bit size field. Returns the pixel length.
fn check_len(width: u32, height: u32, len: usize) -> Result<u32, RenderError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(RenderError::InvalidDimensions { width, height })?;
    if len != expected {
        return Err(RenderError::Io(format!(
            "RGBA buffer size mismatch: expected {expected} bytes, got {len}"
        )));
    }
    if u32::try_from(HEADER_LEN + expected).is_err() {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(expected as u32)
}

/// Writes a complete bitmap to `out` as three writes: file header, info
/// header, pixels.
///
/// # Errors
///
/// Returns `RenderError::Io` if `pixels` is not `width * height * 4` bytes
/// long (nothing is written in that case) or if a write fails.
pub fn write_bmp<W: Write>(
    out: &mut W,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<(), RenderError> {
    let pixel_len = check_len(width, height, pixels.len())?;

    out.write_all(&file_header(pixel_len))?;
    out.write_all(&info_header(width, height))?;
    out.write_all(pixels)?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes the bitmap to it.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns `RenderError::Io` on a size mismatch, or if the file cannot be
/// created or written, and `RenderError::InvalidDimensions` if the file
/// would exceed 4 GiB. Both length checks run before the file is touched.
pub fn save_bmp(path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<u64, RenderError> {
    let pixel_len = check_len(width, height, pixels.len())?;

    let mut file = File::create(path)
        .map_err(|e| RenderError::Io(format!("cannot create {}: {e}", path.display())))?;
    write_bmp(&mut file, width, height, pixels)?;

    log::info!("wrote {} ({width}x{height})", path.display());
    Ok(HEADER_LEN as u64 + u64::from(pixel_len))
}
