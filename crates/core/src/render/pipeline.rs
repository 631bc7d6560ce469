//! The whole run: open the session, draw, read back, write the bitmap,
//! release everything.

use super::backend::DisplayBackend;
use super::capture::read_rgba;
use super::egl::Egl;
use super::mesh::TriangleMesh;
use super::session::Session;
use crate::bmp::save_bmp;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::report::RenderReport;
use crate::scene::CLEAR_COLOR;

/// Renders the triangle with the system EGL and writes `config.output`.
///
/// # Errors
///
/// Returns the first failing step's `RenderError`. Resources acquired up to
/// that point are released; no file is written unless rendering succeeded.
pub fn render(config: &RenderConfig) -> Result<RenderReport, RenderError> {
    config.validate()?;
    let egl = Egl::load()?;
    render_with(&egl, config)
}

/// Like [`render`], over any display backend.
///
/// GL objects are deleted before the session is dropped; the session then
/// releases the current binding, surface, context and display.
pub fn render_with<B: DisplayBackend>(
    backend: &B,
    config: &RenderConfig,
) -> Result<RenderReport, RenderError> {
    let session = Session::open(backend, config)?;
    let (width, height) = (session.width(), session.height());
    let gl = session.load_gl();

    let mesh = TriangleMesh::new(&gl)?;
    mesh.draw(&gl, width, height, CLEAR_COLOR.to_array());
    let pixels = read_rgba(&gl, width, height);
    mesh.destroy(&gl);

    let bytes_written = save_bmp(&config.output, width, height, &pixels)?;

    Ok(RenderReport {
        egl_version: session.version(),
        width,
        height,
        output: config.output.clone(),
        bytes_written,
    })
}
