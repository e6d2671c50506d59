//! Reading the reference palette from its CSV source.
//!
//! The source has no header row and six columns per line:
//! `display_name, common_name, hex, R, G, B`. Every row is validated up
//! front; the first bad row aborts the load with its line number.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::PaletteError;
use crate::palette::{Palette, ReferenceColor};

const FIELDS: usize = 6;

#[derive(Debug, Deserialize)]
struct Row {
    display_name: String,
    common_name: String,
    hex: String,
    r: i64,
    g: i64,
    b: i64,
}

/// Load a palette from a CSV file on disk.
pub fn load_palette(path: impl AsRef<Path>) -> Result<Palette, PaletteError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PaletteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading reference palette");
    read_palette(file)
}

/// Parse a palette from any CSV byte source.
pub fn read_palette<R: Read>(source: R) -> Result<Palette, PaletteError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| malformed_from_csv(&e))?;
        let line = record.position().map_or(0, |p| p.line());

        // The csv reader drops empty lines; whitespace-only lines trim down to one empty field.
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() != FIELDS {
            return Err(PaletteError::MalformedRow {
                line,
                reason: format!("expected {FIELDS} fields, found {}", record.len()),
            });
        }

        let row: Row = record.deserialize(None).map_err(|e| PaletteError::MalformedRow {
            line,
            reason: describe_deserialize(&e),
        })?;

        if row.display_name.is_empty() || row.common_name.is_empty() {
            return Err(PaletteError::MalformedRow {
                line,
                reason: "color name is empty".to_string(),
            });
        }

        for (channel, v) in [("R", row.r), ("G", row.g), ("B", row.b)] {
            if !(0..=255).contains(&v) {
                warn!(line, channel, value = v, "channel out of range, clamping");
            }
        }

        let color = ReferenceColor::new(
            row.display_name,
            row.common_name,
            row.hex,
            row.r,
            row.g,
            row.b,
        )
        .map_err(|e| PaletteError::MalformedRow {
            line,
            reason: e.to_string(),
        })?;
        entries.push(color);
    }

    Palette::new(entries)
}

fn malformed_from_csv(e: &csv::Error) -> PaletteError {
    PaletteError::MalformedRow {
        line: e.position().map_or(0, |p| p.line()),
        reason: e.to_string(),
    }
}

fn describe_deserialize(e: &csv::Error) -> String {
    match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(i) => format!("column {}: {}", i + 1, err.kind()),
            None => err.kind().to_string(),
        },
        _ => e.to_string(),
    }
}
