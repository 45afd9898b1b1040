//! HSLA colors as they appear in shard documents.
//!
//! Shard colors are computed in HSL directly: hues are offsets around a base
//! hue, lightness and alpha are jittered per element. [`Hsla::to_css`] is the
//! only place a color becomes text, with integer hue/saturation/lightness and
//! a three-decimal alpha.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numfmt::fixed;

/// HSL color with alpha. Components are unbounded until formatting.
///
/// `h` is in degrees, `s` and `l` in percent, `a` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    /// Opaque color.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l, a: 1.0 }
    }

    /// Color with explicit alpha.
    pub fn with_alpha(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Fully transparent black, used as the outer gradient stop.
    pub fn transparent() -> Self {
        Self::with_alpha(0.0, 0.0, 0.0, 0.0)
    }

    /// Same color, shifted in hue, saturation and lightness.
    pub fn shifted(self, dh: f64, ds: f64, dl: f64) -> Self {
        Self {
            h: self.h + dh,
            s: self.s + ds,
            l: self.l + dl,
            a: self.a,
        }
    }

    /// Same color with a different alpha.
    pub fn alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS `hsla(H, S%, L%, A)` text.
    ///
    /// Hue is wrapped into [0, 360) and rounded, saturation and lightness are
    /// clamped to [0, 100] and rounded, alpha is clamped to [0, 1].
    pub fn to_css(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            css_hue(self.h),
            percent(self.s),
            percent(self.l),
            fixed(self.a.clamp(0.0, 1.0), 3)
        )
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Normalizes a hue angle to [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    h.rem_euclid(360.0)
}

fn css_hue(h: f64) -> i64 {
    (normalize_hue(h).round() as i64) % 360
}

fn percent(v: f64) -> i64 {
    v.clamp(0.0, 100.0).round() as i64
}
