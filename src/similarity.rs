use crate::pixel::PixelBuffer;

/// Inclusive range of offsets `start..=end` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetSpan {
    pub start: isize,
    pub end: isize,
}

impl OffsetSpan {
    /// Offsets `d` in `[-radius, radius]` for which both `a + d` and `b + d`
    /// stay inside `[0, len)`.
    pub fn clipped(a: usize, b: usize, len: usize, radius: usize) -> Self {
        let last = len - 1;
        let start = radius.min(a.min(b));
        let end = radius.min((last - a).min(last - b));
        OffsetSpan {
            start: -(start as isize),
            end: end as isize,
        }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Intersection of the windows centred on a left and a right pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x: OffsetSpan,
    pub y: OffsetSpan,
}

impl Window {
    pub fn clipped(
        width: usize,
        height: usize,
        (x_left, y_left): (usize, usize),
        (x_right, y_right): (usize, usize),
        radius: usize,
    ) -> Self {
        Window {
            x: OffsetSpan::clipped(x_left, x_right, width, radius),
            y: OffsetSpan::clipped(y_left, y_right, height, radius),
        }
    }

    /// Number of pixel pairs compared over this window.
    pub fn pixel_count(&self) -> usize {
        self.x.len() * self.y.len()
    }
}

/// Euclidean distance in RGB space, alpha ignored.
#[inline]
fn calc_pixel_distance(l: [u8; 3], r: [u8; 3]) -> f64 {
    let d0 = l[0] as i32 - r[0] as i32;
    let d1 = l[1] as i32 - r[1] as i32;
    let d2 = l[2] as i32 - r[2] as i32;
    ((d0 * d0 + d1 * d1 + d2 * d2) as f64).sqrt()
}

#[inline]
fn shift(base: usize, offset: isize) -> usize {
    (base as isize + offset) as usize
}

/// Mean per-pixel RGB distance between the patch around `left_at` in `left`
/// and the patch around `right_at` in `right`. Lower is more similar.
///
/// Both buffers must share a shape and both coordinates must be in bounds.
/// Near the border the window shrinks to the offsets valid for both centres,
/// and the sum is divided by the number of pairs actually compared, so
/// clipped and full windows produce comparable scores.
pub fn patch_distance(
    left: &PixelBuffer,
    right: &PixelBuffer,
    left_at: (usize, usize),
    right_at: (usize, usize),
    radius: usize,
) -> f64 {
    debug_assert!(left.same_shape(right));
    let width = left.width() as usize;
    let height = left.height() as usize;
    debug_assert!(left_at.0 < width && left_at.1 < height);
    debug_assert!(right_at.0 < width && right_at.1 < height);

    let window = Window::clipped(width, height, left_at, right_at, radius);
    let (x_left, y_left) = left_at;
    let (x_right, y_right) = right_at;

    let mut sum = 0.0;
    let mut compared = 0usize;
    for dx in window.x.start..=window.x.end {
        for dy in window.y.start..=window.y.end {
            let l = left.rgb(shift(x_left, dx), shift(y_left, dy));
            let r = right.rgb(shift(x_right, dx), shift(y_right, dy));
            sum += calc_pixel_distance(l, r);
            compared += 1;
        }
    }
    sum / compared as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            [(x * 13) as u8, (y * 29) as u8, ((x + y) * 7) as u8, 255]
        })
    }

    #[test]
    fn test_pixel_distance() {
        assert_eq!(calc_pixel_distance([0, 0, 0], [3, 4, 0]), 5.0);
        assert_eq!(calc_pixel_distance([10, 10, 10], [10, 10, 10]), 0.0);
        assert_eq!(calc_pixel_distance([255, 0, 0], [0, 0, 0]), 255.0);
    }

    #[test]
    fn test_corner_window_is_clipped() {
        let window = Window::clipped(20, 20, (0, 0), (0, 0), 5);
        assert_eq!(window.x, OffsetSpan { start: 0, end: 5 });
        assert_eq!(window.y, OffsetSpan { start: 0, end: 5 });
        assert_eq!(window.pixel_count(), 36);
    }

    #[test]
    fn test_window_uses_intersection_of_both_centres() {
        // left centre near the right edge, right centre near the left edge
        let window = Window::clipped(20, 10, (18, 5), (2, 5), 5);
        assert_eq!(window.x, OffsetSpan { start: -2, end: 1 });
        assert_eq!(window.y, OffsetSpan { start: -5, end: 4 });
        assert_eq!(window.pixel_count(), 4 * 10);
    }

    #[test]
    fn test_interior_window_is_full() {
        let window = Window::clipped(30, 30, (15, 15), (12, 15), 5);
        assert_eq!(window.pixel_count(), 121);
    }

    #[test]
    fn test_single_pixel_image() {
        let window = Window::clipped(1, 1, (0, 0), (0, 0), 5);
        assert_eq!(window.pixel_count(), 1);
        let a = PixelBuffer::filled(1, 1, [0, 0, 0, 255]);
        let b = PixelBuffer::filled(1, 1, [3, 4, 0, 0]);
        assert_eq!(patch_distance(&a, &b, (0, 0), (0, 0), 5), 5.0);
    }

    #[test]
    fn test_identical_patches_score_zero() {
        let img = gradient(16, 12);
        assert_eq!(patch_distance(&img, &img, (7, 6), (7, 6), 5), 0.0);
        assert_eq!(patch_distance(&img, &img, (0, 0), (0, 0), 5), 0.0);
    }

    #[test]
    fn test_mean_not_sum() {
        // every compared pair differs by exactly 5, whatever the window size
        let a = PixelBuffer::filled(12, 12, [0, 0, 0, 255]);
        let b = PixelBuffer::filled(12, 12, [3, 4, 0, 255]);
        assert_eq!(patch_distance(&a, &b, (0, 0), (0, 0), 5), 5.0);
        assert_eq!(patch_distance(&a, &b, (6, 6), (5, 6), 5), 5.0);
        assert_eq!(patch_distance(&a, &b, (11, 11), (0, 11), 2), 5.0);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let a = PixelBuffer::filled(6, 6, [40, 50, 60, 0]);
        let b = PixelBuffer::filled(6, 6, [40, 50, 60, 255]);
        assert_eq!(patch_distance(&a, &b, (3, 3), (2, 3), 2), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = gradient(17, 11);
        let b = PixelBuffer::from_fn(17, 11, |x, y| {
            [(x * y) as u8, (200 - x * 3) as u8, (y * 17) as u8, 255]
        });
        let coords = [(0, 0), (16, 10), (8, 5), (3, 9), (15, 1)];
        for &p in coords.iter() {
            for &q in coords.iter() {
                for radius in 0..4 {
                    assert_eq!(
                        patch_distance(&a, &b, p, q, radius),
                        patch_distance(&b, &a, q, p, radius)
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_radius_compares_centre_only() {
        let a = gradient(8, 8);
        let b = PixelBuffer::filled(8, 8, [0, 0, 0, 255]);
        let expected = calc_pixel_distance(a.rgb(4, 4), [0, 0, 0]);
        assert_eq!(patch_distance(&a, &b, (4, 4), (1, 4), 0), expected);
    }
}
