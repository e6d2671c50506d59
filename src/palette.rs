use rgb::RGB8;
use tracing::debug;

use crate::color::{clamp_rgb, distance, distance_sq, parse_hex};
use crate::error::PaletteError;

/// One named color of the reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceColor {
    display_name: String,
    common_name: String,
    hex: String,
    rgb: RGB8,
}

impl ReferenceColor {
    /// Build an entry. Channels are clamped into `0..=255`; the hex code must
    /// be `#RRGGBB` and is kept as given.
    pub fn new(
        display_name: impl Into<String>,
        common_name: impl Into<String>,
        hex: impl Into<String>,
        r: i64,
        g: i64,
        b: i64,
    ) -> Result<Self, PaletteError> {
        let hex = hex.into();
        if parse_hex(&hex).is_none() {
            return Err(PaletteError::InvalidHex(hex));
        }
        Ok(Self {
            display_name: display_name.into(),
            common_name: common_name.into(),
            hex,
            rgb: clamp_rgb(r, g, b),
        })
    }

    /// Identifier-style name from the first column (e.g. `air_force_blue_raf`).
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Human-readable name; this is what a match reports.
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// Hex code as written in the source, `#RRGGBB`.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Channels, already clamped into `0..=255`.
    pub fn rgb(&self) -> RGB8 {
        self.rgb
    }
}

/// Result of a nearest-color lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatch<'a> {
    /// The matched entry.
    pub color: &'a ReferenceColor,
    /// Its position in the palette.
    pub index: usize,
    /// Euclidean RGB distance from the query.
    pub distance: f32,
}

impl<'a> ColorMatch<'a> {
    /// Common name of the matched entry.
    pub fn name(&self) -> &'a str {
        self.color.common_name()
    }

    /// Hex code of the matched entry.
    pub fn hex(&self) -> &'a str {
        self.color.hex()
    }
}

/// A fixed, non-empty reference palette in source order.
///
/// Read-only after construction, so a shared reference can serve any number
/// of lookups.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<ReferenceColor>,
}

impl Palette {
    /// Build a palette. An empty entry list is a configuration error.
    pub fn new(entries: Vec<ReferenceColor>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::Empty);
        }
        debug!(colors = entries.len(), "reference palette ready");
        Ok(Self { entries })
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[ReferenceColor] {
        &self.entries
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ReferenceColor> {
        self.entries.get(index)
    }

    /// Number of palette entries (at least one).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry nearest to an arbitrary integer triple.
    ///
    /// Each channel is clamped into `0..=255` first, so out-of-range input
    /// behaves exactly like the nearest in-range value.
    pub fn nearest(&self, r: i32, g: i32, b: i32) -> ColorMatch<'_> {
        self.nearest_rgb(clamp_rgb(r.into(), g.into(), b.into()))
    }

    /// Find the entry nearest to an in-range pixel (brute force).
    ///
    /// Earlier entries win exact ties.
    pub fn nearest_rgb(&self, color: RGB8) -> ColorMatch<'_> {
        let index = self.nearest_index(color);
        let entry = &self.entries[index];
        ColorMatch {
            color: entry,
            index,
            distance: distance(color, entry.rgb),
        }
    }

    fn nearest_index(&self, color: RGB8) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, entry) in self.entries.iter().enumerate() {
            let d = distance_sq(color, entry.rgb);
            if d < best_dist {
                best_dist = d;
                best_idx = i;
                if d == 0 {
                    break;
                }
            }
        }

        best_idx
    }

    /// Find the K nearest palette indices for a color.
    /// Returns up to K indices sorted by distance (nearest first); equal
    /// distances keep palette order.
    pub fn k_nearest(&self, r: i32, g: i32, b: i32, k: usize) -> Vec<usize> {
        let color = clamp_rgb(r.into(), g.into(), b.into());
        let mut dists: Vec<(usize, u32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, distance_sq(color, entry.rgb)))
            .collect();

        dists.sort_by_key(|&(_, d)| d);

        dists.into_iter().take(k).map(|(idx, _)| idx).collect()
    }

    /// Distance from a color to a palette entry, or `None` for a bad index.
    pub fn distance(&self, r: i32, g: i32, b: i32, index: usize) -> Option<f32> {
        let color = clamp_rgb(r.into(), g.into(), b.into());
        self.entries.get(index).map(|e| distance(color, e.rgb))
    }
}
