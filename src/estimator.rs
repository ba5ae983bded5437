use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::DEFAULT_WINDOW_RADIUS;
use crate::error::{Error, Result};
use crate::pixel::{PixelBuffer, RGBA_CHANNELS};
use crate::similarity::patch_distance;

/// Best match index used when a pixel has no candidate to its left.
const NO_MATCH: i64 = -1;

/// One horizontal disparity per pixel, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisparityMap {
    values: Array2<i32>,
}

impl DisparityMap {
    /// Wraps row-major disparities. `values.len()` must equal `width * height`.
    pub fn from_values(width: u32, height: u32, values: Vec<i32>) -> Result<Self> {
        let values = Array2::from_shape_vec((height as usize, width as usize), values)
            .map_err(|e| {
                Error::ShapeMismatch(format!("disparities for {}x{}: {}", width, height, e))
            })?;
        Ok(DisparityMap { values })
    }

    pub fn width(&self) -> u32 {
        self.values.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.values.nrows() as u32
    }

    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.values[(y, x)]
    }

    /// Disparities indexed as `(row, column)`.
    pub fn values(&self) -> ArrayView2<'_, i32> {
        self.values.view()
    }

    /// Smallest and largest disparity, `None` for an empty map.
    pub fn min_max(&self) -> Option<(i32, i32)> {
        self.values.iter().fold(None, |acc, &d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }
}

/// Fails unless both buffers are RGBA and share width and height.
pub fn check_stereo_pair(left: &PixelBuffer, right: &PixelBuffer) -> Result<()> {
    if !left.same_shape(right) {
        return Err(Error::ShapeMismatch(format!(
            "left image is {} but right image is {}",
            left.shape_string(),
            right.shape_string()
        )));
    }
    if left.channels() != RGBA_CHANNELS {
        return Err(Error::ShapeMismatch(format!(
            "expected {} channels, got {}",
            RGBA_CHANNELS,
            left.channels()
        )));
    }
    Ok(())
}

/// Brute-force block matcher over a rectified stereo pair.
///
/// For every left pixel `(x, y)` the matcher scans right pixels
/// `x - search_distance ..= x - 1` on the same row and keeps the one whose
/// patch is least distant. The earliest candidate wins ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMatcher {
    pub window_radius: u32,
    pub search_distance: u32,
}

impl BlockMatcher {
    pub fn new(search_distance: u32) -> Self {
        BlockMatcher {
            window_radius: DEFAULT_WINDOW_RADIUS,
            search_distance,
        }
    }

    pub fn with_window_radius(mut self, radius: u32) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn compute(&self, left: &PixelBuffer, right: &PixelBuffer) -> Result<DisparityMap> {
        check_stereo_pair(left, right)?;

        let width = left.width() as usize;
        let height = left.height() as usize;
        info!(
            width,
            height,
            search_distance = self.search_distance,
            window_radius = self.window_radius,
            "computing disparities"
        );

        let mut disparities = vec![0i32; width * height];
        if width > 0 {
            let rows_done = AtomicUsize::new(0);
            disparities
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, px) in row.iter_mut().enumerate() {
                        *px = self.find_best_disparity(left, right, x, y);
                    }
                    let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % 10 == 0 {
                        debug!("{}% done calculating", 100 * done / height);
                    }
                });
        }

        let map = DisparityMap::from_values(left.width(), left.height(), disparities)?;
        if let Some((lo, hi)) = map.min_max() {
            info!(min = lo, max = hi, "disparities computed");
        }
        Ok(map)
    }

    /// Disparity of left pixel `(x, y)`.
    ///
    /// Column 0 has no candidate to its left (nor does any column when the
    /// search distance is 0). The match index then stays at -1 and the
    /// disparity comes out as `x + 1`.
    fn find_best_disparity(&self, left: &PixelBuffer, right: &PixelBuffer, x: usize, y: usize) -> i32 {
        let radius = self.window_radius as usize;
        let first = x.saturating_sub(self.search_distance as usize);

        let mut best: Option<(f64, usize)> = None;
        for x_right in first..x {
            let diff = patch_distance(left, right, (x, y), (x_right, y), radius);
            let improves = match best {
                None => true,
                Some((min_diff, _)) => diff < min_diff,
            };
            if improves {
                best = Some((diff, x_right));
            }
        }

        let best_x_right = best.map_or(NO_MATCH, |(_, x_right)| x_right as i64);
        (best_x_right - x as i64).abs() as i32
    }
}
