//! Fixed-precision number formatting for the SVG serializer.
//!
//! Every number written into a document goes through here, so the same
//! `f64` always yields the same text. Negative zero (including values that
//! round to zero from below) prints without a sign.

/// Formats `v` with exactly `decimals` fractional digits.
pub fn fixed(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}

/// One decimal place: coordinates, lengths, radii.
pub fn coord(v: f64) -> String {
    fixed(v, 1)
}

/// Whole number, used for angles and pixel sizes that carry no fraction.
pub fn whole(v: f64) -> String {
    fixed(v, 0)
}

/// `x,y` pair with one decimal each.
pub fn point(x: f64, y: f64) -> String {
    format!("{},{}", coord(x), coord(y))
}
