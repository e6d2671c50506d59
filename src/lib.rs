//! Name the color under a point of an image.
//!
//! A [`Palette`] of named reference colors is loaded once (see
//! [`load_palette`]); every lookup returns the entry with the smallest
//! Euclidean distance in RGB space, earlier entries winning exact ties.
//! [`DisplayImage`] turns a decoded image and a display coordinate into the
//! pixel that gets looked up, and [`AppState`] tracks which image is shown.

#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod loader;
pub mod palette;
pub mod sample;
pub mod session;

pub use error::{PaletteError, SampleError, SessionError};
pub use loader::{load_palette, read_palette};
pub use palette::{ColorMatch, Palette, ReferenceColor};
pub use sample::{DisplayImage, ViewConfig};
pub use session::AppState;

use rgb::RGB8;

/// A sampled pixel together with its nearest reference color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Identified<'a> {
    /// The pixel read at the requested coordinate.
    pub pixel: RGB8,
    /// Nearest palette entry to `pixel`.
    pub color: ColorMatch<'a>,
}

impl Identified<'_> {
    /// The sampled pixel as `#RRGGBB`.
    pub fn pixel_hex(&self) -> String {
        color::to_hex(self.pixel)
    }
}

/// Sample `image` at display coordinate `(x, y)` and find its nearest named color.
pub fn identify<'a>(
    palette: &'a Palette,
    image: &DisplayImage,
    x: u32,
    y: u32,
) -> Result<Identified<'a>, SampleError> {
    let pixel = image.pixel_at(x, y)?;
    let color = palette.nearest_rgb(pixel);
    tracing::debug!(x, y, ?pixel, name = color.name(), "identified pixel");
    Ok(Identified { pixel, color })
}
