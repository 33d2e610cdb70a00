//! Color and depth targets.
//!
//! Both buffers are row-major with row 0 at the top of the image. Writes
//! outside the buffer are ignored.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::math::Scalar;

/// RGB8 color target backed by an [`image::RgbImage`].
#[derive(Clone, Debug)]
pub struct ImageBuffer {
    image: RgbImage,
}

impl ImageBuffer {
    /// A black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
            *pixel = color;
        }
    }

    pub fn fill(&mut self, color: Rgb<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn clear(&mut self) {
        self.fill(Rgb([0, 0, 0]));
    }

    /// Raw RGB bytes, three per pixel, rows top to bottom.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.image.save_with_format(path, ImageFormat::Png)
    }
}

/// Per-pixel camera-space depth. Smaller is closer; cleared to `+inf`.
#[derive(Clone, Debug)]
pub struct ZBuffer {
    depth: Vec<Scalar>,
    width: u32,
    height: u32,
}

impl ZBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depth: vec![Scalar::INFINITY; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth at `(x, y)`; out-of-bounds reads are infinitely far.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Scalar {
        self.index(x, y)
            .map_or(Scalar::INFINITY, |i| self.depth[i])
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, depth: Scalar) {
        if let Some(i) = self.index(x, y) {
            self.depth[i] = depth;
        }
    }

    /// Stores `depth` if it is not behind the current value. Returns whether
    /// it was stored.
    #[inline]
    pub fn test_and_set(&mut self, x: u32, y: u32, depth: Scalar) -> bool {
        match self.index(x, y) {
            Some(i) if depth <= self.depth[i] => {
                self.depth[i] = depth;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.depth.fill(Scalar::INFINITY);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}
