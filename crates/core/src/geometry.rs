//! Shard geometry: primary crystals on a radial ring, secondary debris near
//! the center.
//!
//! Every builder takes the scene generator by `&mut` and consumes draws in a
//! fixed order. Reordering two `rng` calls here changes every shard and every
//! decoration that follows.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Hsla;
use crate::identifier::Identifier;
use crate::palette::ShardPalette;
use crate::prng::Xorshift32;

/// Whether a shard sits on the main ring or is background debris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShardKind {
    Primary,
    Secondary,
}

/// One crystal polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shard {
    pub kind: ShardKind,
    /// Polygon vertices; index 0 is the apex.
    pub vertices: Vec<DVec2>,
    /// Outer tip of the crystal.
    pub tip: DVec2,
    pub hue: f64,
    pub sat: f64,
    pub lit: f64,
    pub opacity: f64,
    /// Polar angle of the shard's placement, radians.
    pub angle: f64,
    pub length: f64,
}

impl Shard {
    /// Apex vertex (the point the crystal grows from).
    pub fn apex(&self) -> DVec2 {
        self.vertices[0]
    }

    /// Base fill color.
    pub fn color(&self) -> Hsla {
        Hsla::new(self.hue, self.sat, self.lit)
    }
}

/// Number of primary shards: `6 + (b3 mod 7)`, in [6, 12].
pub fn primary_count(id: &Identifier) -> usize {
    6 + usize::from(id.byte(3) % 7)
}

/// Scene center: canvas middle nudged by bytes 4 and 5.
///
/// The nudge of up to ±15.4 px is absolute, not proportional to `size`.
pub fn scene_center(id: &Identifier, size: f64) -> DVec2 {
    DVec2::new(
        size / 2.0 + (f64::from(id.byte(4)) - 128.0) * 0.12,
        size / 2.0 + (f64::from(id.byte(5)) - 128.0) * 0.12,
    )
}

/// Builds a shard polygon from `origin` along `angle`.
///
/// Draw order: base offset, two shoulder widths, first facet gate (and its
/// three draws), second facet gate (and its three draws). Returns the
/// vertices and the tip point.
pub fn shard_vertices(
    rng: &mut Xorshift32,
    origin: DVec2,
    angle: f64,
    length: f64,
    width: f64,
) -> (Vec<DVec2>, DVec2) {
    let axis = DVec2::new(angle.cos(), angle.sin());
    let perp = DVec2::new((angle + FRAC_PI_2).cos(), (angle + FRAC_PI_2).sin());

    let tip = origin + axis * length;
    let base_offset = length * rng.range(0.15, 0.35);
    let mid = origin + axis * base_offset;
    let w1 = width * rng.range(0.5, 1.0);
    let w2 = width * rng.range(0.5, 1.0);

    let mut vertices = vec![
        origin,
        mid + perp * w1,
        tip + perp * (width * 0.03),
        mid - perp * w2,
    ];

    if rng.chance_above(0.3) {
        let facet = facet_point(rng, origin, axis, perp, length, width, (0.35, 0.7), (0.15, 0.45));
        vertices.insert(2, facet);
    }
    if rng.chance_above(0.5) {
        let facet = facet_point(rng, origin, axis, perp, length, width, (0.5, 0.85), (0.1, 0.3));
        vertices.insert(3, facet);
    }

    (vertices, tip)
}

#[allow(clippy::too_many_arguments)]
fn facet_point(
    rng: &mut Xorshift32,
    origin: DVec2,
    axis: DVec2,
    perp: DVec2,
    length: f64,
    width: f64,
    along: (f64, f64),
    spread: (f64, f64),
) -> DVec2 {
    let t = rng.range(along.0, along.1);
    let on_axis = origin + axis * (length * t);
    let side = if rng.chance_above(0.5) { 1.0 } else { -1.0 };
    let offset = width * rng.range(spread.0, spread.1) * side;
    on_axis + perp * offset
}

/// Primary shards evenly spread around `center`, with angular jitter.
pub fn primary_shards(
    rng: &mut Xorshift32,
    palette: &ShardPalette,
    center: DVec2,
    size: f64,
    count: usize,
) -> Vec<Shard> {
    (0..count)
        .map(|i| {
            let angle = (i as f64 / count as f64) * TAU + rng.range(-0.25, 0.25);
            let length = rng.range(size * 0.22, size * 0.44);
            let width = rng.range(size * 0.03, size * 0.09);
            let (vertices, tip) = shard_vertices(rng, center, angle, length, width);

            let hue = if rng.chance_above(0.75) {
                palette.accent_hue + rng.range(-15.0, 15.0)
            } else {
                palette.base_hue + rng.range(-25.0, 25.0)
            };
            let sat = palette.base_sat + rng.range(-15.0, 15.0);
            let lit = rng.range(30.0, 70.0);
            let opacity = rng.range(0.55, 0.9);

            Shard {
                kind: ShardKind::Primary,
                vertices,
                tip,
                hue,
                sat,
                lit,
                opacity,
                angle,
                length,
            }
        })
        .collect()
}

/// Secondary debris shards: `4 + int_range(0, 6)` of them, scattered near
/// `center`, shorter and dimmer than the primaries.
pub fn secondary_shards(
    rng: &mut Xorshift32,
    palette: &ShardPalette,
    center: DVec2,
    size: f64,
) -> Vec<Shard> {
    let count = 4 + rng.int_range(0, 6);
    (0..count)
        .map(|_| {
            let angle = rng.range(0.0, TAU);
            let dist = rng.range(size * 0.03, size * 0.12);
            let origin = center + DVec2::new(angle.cos(), angle.sin()) * dist;
            let length = rng.range(size * 0.08, size * 0.22);
            let width = rng.range(size * 0.015, size * 0.04);
            let axis_angle = angle + rng.range(-0.4, 0.4);
            let (vertices, tip) = shard_vertices(rng, origin, axis_angle, length, width);

            let hue = palette.base_hue + rng.range(-35.0, 35.0);
            let sat = palette.base_sat + rng.range(-20.0, 5.0);
            let lit = rng.range(18.0, 40.0);
            let opacity = rng.range(0.3, 0.55);

            Shard {
                kind: ShardKind::Secondary,
                vertices,
                tip,
                hue,
                sat,
                lit,
                opacity,
                angle,
                length,
            }
        })
        .collect()
}
