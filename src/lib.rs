//! Block matching disparity estimation for rectified stereo pairs.
//!
//! ```no_run
//! use depthmap::{compute_depth_map, io, MatchConfig};
//!
//! let left = io::load_rgba("left.png").unwrap();
//! let right = io::load_rgba("right.png").unwrap();
//! let depth = compute_depth_map(&left, &right, &MatchConfig::default()).unwrap();
//! io::save("depth.png", &depth).unwrap();
//! ```

extern crate image;
extern crate ndarray;

pub mod config;
pub mod error;
pub mod estimator;
pub mod io;
pub mod pixel;
pub mod similarity;
pub mod visualize;

pub use config::{MatchConfig, DEFAULT_SEARCH_PROPORTION, DEFAULT_WINDOW_RADIUS};
pub use error::{Error, Result};
pub use estimator::{check_stereo_pair, BlockMatcher, DisparityMap};
pub use pixel::{PixelBuffer, RGBA_CHANNELS};
pub use similarity::{patch_distance, OffsetSpan, Window};
pub use visualize::render_disparity;

/// Disparities of `left` against `right`, along with the search distance
/// derived from `config` for this image width.
///
/// The stereo pair and the configuration are both validated before any
/// matching starts.
pub fn compute_disp(
    left: &PixelBuffer,
    right: &PixelBuffer,
    config: &MatchConfig,
) -> Result<(DisparityMap, u32)> {
    check_stereo_pair(left, right)?;
    let matcher = config.matcher_for(left.width())?;
    let disparities = matcher.compute(left, right)?;
    Ok((disparities, matcher.search_distance))
}

/// Full pipeline: match the pair and render the disparities as a gray image.
pub fn compute_depth_map(
    left: &PixelBuffer,
    right: &PixelBuffer,
    config: &MatchConfig,
) -> Result<PixelBuffer> {
    let (disparities, search_distance) = compute_disp(left, right, config)?;
    render_disparity(&disparities, search_distance)
}
