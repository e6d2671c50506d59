//! RGB primitives shared by the matcher and the loader.

use rgb::RGB8;

/// Clamp an arbitrary integer channel value into `0..=255`.
#[inline]
pub fn clamp_channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

/// Clamp three integer channels into an in-range pixel.
pub fn clamp_rgb(r: i64, g: i64, b: i64) -> RGB8 {
    RGB8::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
}

/// Squared Euclidean distance in RGB space.
///
/// Exact and monotone in the true distance, so it is what lookups rank by.
/// The maximum (black to white) is `3 * 255^2`, well within `u32`.
#[inline]
pub fn distance_sq(a: RGB8, b: RGB8) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Euclidean distance in RGB space.
pub fn distance(a: RGB8, b: RGB8) -> f32 {
    (distance_sq(a, b) as f32).sqrt()
}

/// Parse a `#RRGGBB` code. Case insensitive; the `#` is required.
pub fn parse_hex(s: &str) -> Option<RGB8> {
    let digits = s.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(RGB8::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format a pixel as an uppercase `#RRGGBB` code.
pub fn to_hex(c: RGB8) -> String {
    format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_saturates_both_ends() {
        assert_eq!(clamp_channel(-10), 0);
        assert_eq!(clamp_channel(300), 255);
        assert_eq!(clamp_channel(128), 128);
        assert_eq!(clamp_rgb(i64::MIN, 256, 7), RGB8::new(0, 255, 7));
    }

    #[test]
    fn distance_black_white() {
        let black = RGB8::new(0, 0, 0);
        let white = RGB8::new(255, 255, 255);
        assert_eq!(distance_sq(black, white), 3 * 255 * 255);
        assert!((distance(black, white) - 441.672_96).abs() < 1e-3);
        assert_eq!(distance_sq(white, white), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = RGB8::new(12, 200, 33);
        let b = RGB8::new(250, 10, 5);
        assert_eq!(distance_sq(a, b), distance_sq(b, a));
    }

    #[test]
    fn hex_parse() {
        assert_eq!(parse_hex("#FF0000"), Some(RGB8::new(255, 0, 0)));
        assert_eq!(parse_hex("#5d8aa8"), Some(RGB8::new(93, 138, 168)));
        assert_eq!(parse_hex("FF0000"), None);
        assert_eq!(parse_hex("#FF00"), None);
        assert_eq!(parse_hex("#GG0000"), None);
        assert_eq!(parse_hex("#+F0000"), None);
    }

    #[test]
    fn hex_format_is_uppercase() {
        assert_eq!(to_hex(RGB8::new(93, 138, 168)), "#5D8AA8");
        assert_eq!(to_hex(RGB8::new(0, 0, 0)), "#000000");
    }
}
