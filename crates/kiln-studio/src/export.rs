use std::path::Path;

use anyhow::{Context, Result};
use kiln_raster::prelude::*;

/// Writes a single-sample color buffer as 8-bit straight-alpha RGBA.
pub fn write_png(path: &Path, buffer: &Buffer2d<Color>) -> Result<()> {
    let mut bytes = Vec::with_capacity(buffer.width() * buffer.height() * 4);
    for (_, color) in buffer.iter_pixels() {
        bytes.extend_from_slice(&color.clamped().to_straight_rgba8());
    }

    let width = u32::try_from(buffer.width()).context("image too wide for PNG")?;
    let height = u32::try_from(buffer.height()).context("image too tall for PNG")?;

    image::save_buffer_with_format(path, &bytes, width, height, image::ExtendedColorType::Rgba8, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::debug!("encoded {} bytes of pixel data", bytes.len());
    Ok(())
}
