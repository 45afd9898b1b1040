//! `<defs>` block: per-shard gradients, shared patterns and the six filters.

use crate::color::Hsla;
use crate::numfmt::whole;
use crate::scene::Scene;

/// Filter ids declared in every document.
pub const FILTER_IDS: [&str; 6] = [
    "shardGlow",
    "nebulaBlur",
    "softGlow",
    "crackGlow",
    "hardGlow",
    "lightningGlow",
];

/// Gradient id for the shard at `index`.
pub fn shard_gradient_id(index: usize) -> String {
    format!("sg{index}")
}

/// Writes the full `<defs>` element.
pub fn write_defs(out: &mut String, scene: &Scene) {
    out.push_str("<defs>\n");
    write_shard_gradients(out, scene);
    write_shared(out, scene);
    out.push_str(FILTERS);
    out.push_str("</defs>\n");
}

fn write_shard_gradients(out: &mut String, scene: &Scene) {
    for (i, (shard, angle)) in scene.shards.iter().zip(&scene.gradient_angles).enumerate() {
        let (h, s, l) = (shard.hue, shard.sat, shard.lit);
        let stops = [
            ("0%", Hsla::with_alpha(h, s + 10.0, l + 25.0, 0.9)),
            ("30%", Hsla::new(h, s, l + 10.0)),
            ("70%", Hsla::new(h, s, l)),
            ("100%", Hsla::new(h + 15.0, s - 10.0, l - 20.0)),
        ];
        out.push_str(&format!(
            "<linearGradient id=\"{}\" gradientTransform=\"rotate({})\">\n",
            shard_gradient_id(i),
            whole(*angle)
        ));
        for (offset, color) in stops {
            out.push_str(&format!("<stop offset=\"{offset}\" stop-color=\"{color}\"/>\n"));
        }
        out.push_str("</linearGradient>\n");
    }
}

fn write_shared(out: &mut String, scene: &Scene) {
    let hue = scene.palette.base_hue;
    out.push_str(&format!(
        concat!(
            "<radialGradient id=\"vignette\" cx=\"50%\" cy=\"50%\">\n",
            "<stop offset=\"40%\" stop-color=\"{clear}\"/>\n",
            "<stop offset=\"100%\" stop-color=\"{edge}\"/>\n",
            "</radialGradient>\n",
            "<pattern id=\"scanlines\" width=\"4\" height=\"4\" patternUnits=\"userSpaceOnUse\">\n",
            "<line x1=\"0\" y1=\"0\" x2=\"4\" y2=\"0\" stroke=\"white\" stroke-width=\"0.5\" opacity=\"0.3\"/>\n",
            "</pattern>\n",
            "<radialGradient id=\"burstGrad\" cx=\"50%\" cy=\"50%\">\n",
            "<stop offset=\"0%\" stop-color=\"{b0}\"/>\n",
            "<stop offset=\"20%\" stop-color=\"{b1}\"/>\n",
            "<stop offset=\"50%\" stop-color=\"{b2}\"/>\n",
            "<stop offset=\"100%\" stop-color=\"{clear}\"/>\n",
            "</radialGradient>\n",
        ),
        clear = Hsla::transparent(),
        edge = Hsla::with_alpha(0.0, 0.0, 0.0, 0.7),
        b0 = Hsla::with_alpha(hue, 80.0, 90.0, 0.8),
        b1 = Hsla::with_alpha(hue, 70.0, 70.0, 0.4),
        b2 = Hsla::with_alpha(hue, 50.0, 40.0, 0.1),
    ));
}

const FILTERS: &str = r#"<filter id="shardGlow" x="-30%" y="-30%" width="160%" height="160%">
<feGaussianBlur in="SourceGraphic" stdDeviation="2" result="blur1"/>
<feGaussianBlur in="SourceGraphic" stdDeviation="6" result="blur2"/>
<feMerge><feMergeNode in="blur2"/><feMergeNode in="blur1"/><feMergeNode in="SourceGraphic"/></feMerge>
</filter>
<filter id="nebulaBlur" x="-100%" y="-100%" width="300%" height="300%">
<feGaussianBlur stdDeviation="40"/>
</filter>
<filter id="softGlow" x="-100%" y="-100%" width="300%" height="300%">
<feGaussianBlur stdDeviation="10"/>
</filter>
<filter id="crackGlow" x="-100%" y="-100%" width="300%" height="300%">
<feGaussianBlur stdDeviation="3"/>
</filter>
<filter id="hardGlow" x="-50%" y="-50%" width="200%" height="200%">
<feGaussianBlur stdDeviation="1.5"/>
</filter>
<filter id="lightningGlow" x="-50%" y="-50%" width="200%" height="200%">
<feGaussianBlur in="SourceGraphic" stdDeviation="2" result="blur1"/>
<feGaussianBlur in="SourceGraphic" stdDeviation="5" result="blur2"/>
<feMerge><feMergeNode in="blur2"/><feMergeNode in="blur1"/><feMergeNode in="SourceGraphic"/></feMerge>
</filter>
"#;
