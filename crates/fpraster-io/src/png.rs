//! PNG output.
//!
//! Rendering happens fully in memory and the file is only written once the
//! image is encoded, so a failed render never leaves a partial file behind.

use std::fs;
use std::path::Path;

use tiny_skia::Pixmap;

use fpraster_core::{Footprint, LayerStack};
use fpraster_renderer::{render, RenderOptions, RenderSummary};

use crate::error::IoError;
use crate::profile::RenderProfile;

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, IoError> {
    pixmap
        .encode_png()
        .map_err(|e| IoError::Encode(e.to_string()))
}

pub fn write_png(pixmap: &Pixmap, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    let bytes = encode_png(pixmap)?;
    fs::write(path, &bytes)?;
    log::info!(
        "wrote {}x{} PNG to {} ({} bytes)",
        pixmap.width(),
        pixmap.height(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Render `footprint` and write it to `path` as PNG.
pub fn render_to_file(
    footprint: &Footprint,
    stack: &LayerStack,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<RenderSummary, IoError> {
    let rendering = render(footprint, stack, options)?;
    write_png(&rendering.pixmap, path)?;
    Ok(rendering.summary)
}

/// [`render_to_file`] with the settings of a saved profile.
pub fn render_with_profile(
    footprint: &Footprint,
    profile: &RenderProfile,
    path: impl AsRef<Path>,
) -> Result<RenderSummary, IoError> {
    log::debug!("rendering '{}' with profile '{}'", footprint.name, profile.name);
    render_to_file(footprint, &profile.layers, &profile.options, path)
}
