use image::RgbaImage;
use ndarray::{Array3, ArrayView1};

use crate::error::{Error, Result};

/// Channel count of every buffer the matcher accepts (R, G, B, A).
pub const RGBA_CHANNELS: u32 = 4;

/// Decoded image stored row-major as `(row, column, channel)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Wraps raw interleaved samples. `data.len()` must equal
    /// `width * height * channels`.
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::BufferLength {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        let shape = (height as usize, width as usize, channels as usize);
        let data = Array3::from_shape_vec(shape, data)
            .map_err(|e| Error::ShapeMismatch(e.to_string()))?;
        Ok(PixelBuffer { data })
    }

    /// A buffer where every pixel holds `value`.
    pub fn filled(width: u32, height: u32, value: [u8; 4]) -> Self {
        let data = Array3::from_shape_fn(
            (height as usize, width as usize, RGBA_CHANNELS as usize),
            |(_, _, c)| value[c],
        );
        PixelBuffer { data }
    }

    /// Builds an RGBA buffer by evaluating `f` at every `(x, y)`.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let mut data = Array3::zeros((height as usize, width as usize, RGBA_CHANNELS as usize));
        for y in 0..height {
            for x in 0..width {
                let px = f(x, y);
                for (c, v) in px.iter().enumerate() {
                    data[(y as usize, x as usize, c)] = *v;
                }
            }
        }
        PixelBuffer { data }
    }

    pub fn width(&self) -> u32 {
        self.data.shape()[1] as u32
    }

    pub fn height(&self) -> u32 {
        self.data.shape()[0] as u32
    }

    pub fn channels(&self) -> u32 {
        self.data.shape()[2] as u32
    }

    /// All channels of pixel `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> ArrayView1<'_, u8> {
        self.data.slice(ndarray::s![y, x, ..])
    }

    /// Red, green and blue samples of pixel `(x, y)`.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        [
            self.data[(y, x, 0)],
            self.data[(y, x, 1)],
            self.data[(y, x, 2)],
        ]
    }

    /// Interleaved samples in row-major order.
    pub fn to_raw_vec(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.data.shape() == other.data.shape()
    }

    pub fn shape_string(&self) -> String {
        format!("{}x{}x{}", self.width(), self.height(), self.channels())
    }

    /// Converts to an `image` buffer for encoding. Fails unless the buffer is RGBA.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        if self.channels() != RGBA_CHANNELS {
            return Err(Error::ShapeMismatch(format!(
                "cannot encode {} channel buffer as RGBA",
                self.channels()
            )));
        }
        RgbaImage::from_raw(self.width(), self.height(), self.to_raw_vec()).ok_or_else(|| {
            Error::ShapeMismatch(format!("buffer {} does not fit an RGBA image", self.shape_string()))
        })
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let shape = (height as usize, width as usize, RGBA_CHANNELS as usize);
        let data = Array3::from_shape_fn(shape, |(y, x, c)| img.get_pixel(x as u32, y as u32).0[c]);
        PixelBuffer { data }
    }
}
