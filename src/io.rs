//! Decoding and encoding through the `image` crate.
//!
//! The matcher itself never touches files; these helpers sit at the edge.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::pixel::PixelBuffer;

/// Decodes `path` and converts it to RGBA, whatever its stored layout.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let img = image::open(path)?;
    let color = img.color();
    let rgba = img.to_rgba8();
    debug!(
        path = %path.display(),
        width = rgba.width(),
        height = rgba.height(),
        ?color,
        "decoded image"
    );
    Ok(PixelBuffer::from(rgba))
}

/// Encodes an RGBA buffer; the format follows the file extension.
pub fn save<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();
    let img = buffer.to_rgba_image()?;
    img.save(path)?;
    debug!(path = %path.display(), "wrote image");
    Ok(())
}
