//! SVG serialization of a composed [`Scene`].
//!
//! Rendering is pure formatting: no generator draws happen here, so the same
//! scene always serializes to the same bytes.
//!
//! # Module overview
//!
//! - [`defs`] -- Per-shard gradients, shared patterns and the six filters.
//! - [`style`] -- Static animation stylesheet.
//! - [`layers`] -- One element writer per paint layer.

pub mod defs;
pub mod layers;
pub mod style;

use crate::numfmt::whole;
use crate::scene::{LayerKind, Scene, PAINT_ORDER};

pub use defs::{shard_gradient_id, FILTER_IDS};
pub use style::animation_css;

/// Serializes `scene` into a self-contained SVG document.
pub fn render_svg(scene: &Scene) -> String {
    let size = whole(scene.size);
    let mut out = String::with_capacity(64 * 1024);
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {size} {size}\" width=\"{size}\" height=\"{size}\">\n"
    ));
    defs::write_defs(&mut out, scene);
    out.push_str("<style>\n");
    out.push_str(&animation_css(scene.size));
    out.push_str("</style>\n");
    for layer in PAINT_ORDER {
        write_layer(&mut out, scene, layer);
    }
    out.push_str("</svg>\n");
    out
}

fn write_layer(out: &mut String, scene: &Scene, layer: LayerKind) {
    match layer {
        LayerKind::Background => layers::background(out, scene),
        LayerKind::Nebula => layers::nebula(out, scene),
        LayerKind::Stars => layers::stars(out, scene),
        LayerKind::Vignette => layers::vignette(out, scene),
        LayerKind::Shards => layers::shards(out, scene),
        LayerKind::Reflections => layers::reflections(out, scene),
        LayerKind::Cracks => layers::cracks(out, scene),
        LayerKind::Lightning => layers::lightning(out, scene),
        LayerKind::Particles => layers::particles(out, scene),
        LayerKind::Scanlines => layers::scanlines(out, scene),
        LayerKind::CenterBurst => layers::center_burst(out, scene),
        LayerKind::Caption => layers::caption(out, scene),
    }
}

/// Escapes text for use in element content and attribute values.
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
