//! Image output.

use std::path::Path;

use anyhow::{bail, Context, Result};
use glint_renderer::{color_to_rgba, DisplayBuffer};
use image::{Rgba, RgbaImage};

/// Convert the display to an 8-bit image with the first row at the top.
pub fn to_rgba_image(display: &DisplayBuffer) -> RgbaImage {
    let height = display.height();
    RgbaImage::from_fn(display.width(), height, |x, y| {
        Rgba(color_to_rgba(display.get(x, height - 1 - y)))
    })
}

/// Save the display as a gamma-corrected PNG.
pub fn save_image_as_png(display: &DisplayBuffer, path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        bail!("Unsupported output extension for {}, only .png is supported", path.display());
    }

    to_rgba_image(display)
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Saved {}x{} image to {}", display.width(), display.height(), path.display());
    Ok(())
}
