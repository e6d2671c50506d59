//! Decoding an image and reading the pixel under a display coordinate.

use std::path::Path;

use image::imageops::FilterType;
use image::RgbImage;
use rgb::RGB8;
use tracing::debug;

use crate::error::SampleError;

/// How an image is laid out on the display surface before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Display surface size. `None` keeps the decoded image's own size.
    pub display_size: Option<(u32, u32)>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            display_size: Some((800, 500)),
        }
    }
}

impl ViewConfig {
    /// Default configuration: an 800x500 display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the image at its decoded resolution.
    pub fn native() -> Self {
        Self { display_size: None }
    }

    /// Stretch the image to `width` x `height` before sampling.
    pub fn display_size(mut self, width: u32, height: u32) -> Self {
        self.display_size = Some((width, height));
        self
    }
}

/// An image as shown to the user: decoded, stretched to the display size.
#[derive(Debug, Clone)]
pub struct DisplayImage {
    pixels: RgbImage,
}

impl DisplayImage {
    /// Decode `path` and fit it to the configured display size.
    pub fn open(path: impl AsRef<Path>, config: ViewConfig) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| SampleError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            "decoded image"
        );
        Self::from_rgb_image(decoded.to_rgb8(), config)
    }

    /// Fit an already decoded image to the configured display size.
    pub fn from_rgb_image(decoded: RgbImage, config: ViewConfig) -> Result<Self, SampleError> {
        let pixels = match config.display_size {
            Some((0, _)) | Some((_, 0)) => return Err(SampleError::ZeroDimension),
            Some((w, h)) if (w, h) != decoded.dimensions() => {
                // Bilinear, matching a plain stretch-to-fit viewer.
                image::imageops::resize(&decoded, w, h, FilterType::Triangle)
            }
            _ => decoded,
        };
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(SampleError::ZeroDimension);
        }
        Ok(Self { pixels })
    }

    /// Display width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Display height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The RGB triple at display coordinate `(x, y)`.
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<RGB8, SampleError> {
        if x >= self.width() || y >= self.height() {
            return Err(SampleError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        let [r, g, b] = self.pixels.get_pixel(x, y).0;
        Ok(RGB8::new(r, g, b))
    }
}
