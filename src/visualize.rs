use tracing::debug;

use crate::error::{Error, Result};
use crate::estimator::DisparityMap;
use crate::pixel::PixelBuffer;

/// Renders disparities as opaque gray levels: `round(d / S * 255)` in R, G
/// and B, 255 in A.
///
/// A disparity that scales outside `[0, 255]` means the estimator broke its
/// bound; rendering then fails instead of clamping.
pub fn render_disparity(map: &DisparityMap, search_distance: u32) -> Result<PixelBuffer> {
    if search_distance == 0 {
        return Err(Error::InvalidConfiguration(
            "cannot scale disparities by a search distance of 0".to_string(),
        ));
    }

    let width = map.width();
    let height = map.height();
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for ((y, x), &disparity) in map.values().indexed_iter() {
        let scaled = disparity as f64 / search_distance as f64 * 255.0;
        if !(0.0..=255.0).contains(&scaled) {
            return Err(Error::InvariantViolation {
                x: x as u32,
                y: y as u32,
                disparity,
                search_distance,
                scaled,
            });
        }
        let level = scaled.round() as u8;
        data.extend_from_slice(&[level, level, level, 255]);
    }
    debug!(width, height, search_distance, "rendered disparity image");

    PixelBuffer::new(width, height, 4, data)
}
