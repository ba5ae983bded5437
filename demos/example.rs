extern crate depthmap;

use depthmap::{compute_depth_map, io, MatchConfig, PixelBuffer};

/// Square of texture floating `shift` pixels nearer than a textured backdrop.
fn synthetic_pair(width: u32, height: u32, shift: u32) -> (PixelBuffer, PixelBuffer) {
    let texture = |x: u32, y: u32| {
        let v = ((x * 7919 + y * 104_729) % 251) as u8;
        [v, v.wrapping_mul(3), v.wrapping_add(y as u8), 255]
    };
    let inside = |x: u32, y: u32| {
        x >= width / 3 && x < 2 * width / 3 && y >= height / 3 && y < 2 * height / 3
    };
    let left = PixelBuffer::from_fn(width, height, |x, y| texture(x, y));
    let right = PixelBuffer::from_fn(width, height, |x, y| {
        let back = (x + 2).min(width - 1);
        let front = (x + shift).min(width - 1);
        if inside(front, y) {
            texture(front, y)
        } else {
            texture(back, y)
        }
    });
    (left, right)
}

pub fn main() {
    let (limg, rimg) = match (
        std::env::args().nth(1),
        std::env::args().nth(2),
    ) {
        (Some(l), Some(r)) => (io::load_rgba(l).unwrap(), io::load_rgba(r).unwrap()),
        _ => synthetic_pair(128, 96, 12),
    };
    let config = MatchConfig::default().with_window_radius(3);
    let disp_img = compute_depth_map(&limg, &rimg, &config).unwrap();

    disp_img
        .to_rgba_image()
        .unwrap()
        .save("demos/disp.png")
        .unwrap();
}
