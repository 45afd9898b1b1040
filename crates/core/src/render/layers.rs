//! Element writers, one per [`LayerKind`](crate::scene::LayerKind).

use glam::DVec2;

use crate::color::Hsla;
use crate::numfmt::{coord, fixed, point, whole};
use crate::render::defs::shard_gradient_id;
use crate::render::escape_xml;
use crate::scene::Scene;

const CAPTION_FONT: &str = "'SF Mono', 'Fira Code', monospace";
const CAPTION_MARGIN: f64 = 18.0;
const AUTHOR_MARGIN: f64 = 32.0;

fn points_attr(points: &[DVec2]) -> String {
    points
        .iter()
        .map(|p| point(p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn path_data(points: &[DVec2]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&point(p.x, p.y));
    }
    d
}

fn full_rect(out: &mut String, size: &str, fill: &str, extra: &str) {
    out.push_str(&format!(
        "<rect width=\"{size}\" height=\"{size}\" fill=\"{fill}\"{extra}/>\n"
    ));
}

pub(crate) fn background(out: &mut String, scene: &Scene) {
    let fill = Hsla::new(scene.palette.background_hue(), 12.0, 2.0);
    full_rect(out, &whole(scene.size), &fill.to_css(), "");
}

pub(crate) fn vignette(out: &mut String, scene: &Scene) {
    full_rect(out, &whole(scene.size), "url(#vignette)", "");
}

pub(crate) fn scanlines(out: &mut String, scene: &Scene) {
    full_rect(out, &whole(scene.size), "url(#scanlines)", " opacity=\"0.03\"");
}

pub(crate) fn nebula(out: &mut String, scene: &Scene) {
    out.push_str("<g class=\"nebula-pulse\">\n");
    for cloud in &scene.nebula {
        let (cx, cy) = (coord(cloud.center.x), coord(cloud.center.y));
        let transform = cloud
            .rotation
            .map(|r| format!(" transform=\"rotate({} {cx} {cy})\"", whole(r)))
            .unwrap_or_default();
        out.push_str(&format!(
            "<ellipse cx=\"{cx}\" cy=\"{cy}\" rx=\"{}\" ry=\"{}\"{transform} fill=\"{}\" filter=\"url(#nebulaBlur)\"/>\n",
            coord(cloud.rx),
            coord(cloud.ry),
            cloud.color
        ));
    }
    out.push_str("</g>\n");
}

pub(crate) fn stars(out: &mut String, scene: &Scene) {
    out.push_str("<g>\n");
    for star in &scene.stars {
        let twinkle = star
            .twinkle_delay
            .map(|d| format!(" class=\"twinkle\" style=\"animation-delay:{}s\"", fixed(d, 1)))
            .unwrap_or_default();
        out.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"{twinkle}/>\n",
            coord(star.pos.x),
            coord(star.pos.y),
            coord(star.radius),
            star.color
        ));
    }
    out.push_str("</g>\n");
}

pub(crate) fn shards(out: &mut String, scene: &Scene) {
    let origin = format!("{}px {}px", coord(scene.center.x), coord(scene.center.y));
    out.push_str("<g filter=\"url(#shardGlow)\">\n");
    for (i, shard) in scene.shards.iter().enumerate() {
        let v = &shard.vertices;
        let base = shard.color();
        out.push_str(&format!(
            "<g class=\"shard-spawn\" style=\"animation-delay:{}s; transform-origin:{origin}\" opacity=\"{}\">\n",
            fixed(Scene::shard_delay(i), 2),
            fixed(shard.opacity, 2)
        ));
        out.push_str(&format!(
            "<polygon points=\"{}\" fill=\"url(#{})\" stroke=\"{}\" stroke-width=\"0.6\"/>\n",
            points_attr(v),
            shard_gradient_id(i),
            base.shifted(0.0, 10.0, 30.0).alpha(0.7)
        ));
        out.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.2\" filter=\"url(#hardGlow)\"/>\n",
            path_data(&v[..3]),
            base.shifted(0.0, 0.0, 40.0).alpha(0.4)
        ));
        let mid = v[v.len() / 2];
        out.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"0.7\"/>\n",
            coord(v[0].x),
            coord(v[0].y),
            coord(mid.x),
            coord(mid.y),
            base.shifted(0.0, 0.0, 35.0).alpha(0.25)
        ));
        out.push_str("</g>\n");
    }
    out.push_str("</g>\n");
}

pub(crate) fn reflections(out: &mut String, scene: &Scene) {
    out.push_str("<g>\n");
    for r in &scene.reflections {
        out.push_str(&format!(
            "<polygon points=\"{}\" fill=\"{}\" class=\"reflection-pulse\"/>\n",
            points_attr(&r.points),
            r.color
        ));
    }
    out.push_str("</g>\n");
}

pub(crate) fn cracks(out: &mut String, scene: &Scene) {
    out.push_str("<g opacity=\"0.7\">\n");
    for crack in &scene.cracks {
        let dash = whole(crack.dash);
        out.push_str(&format!(
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"1\" fill=\"none\" filter=\"url(#crackGlow)\" class=\"crack-draw\" style=\"animation-delay:{}s\" stroke-dasharray=\"{dash}\" stroke-dashoffset=\"{dash}\"/>\n",
            path_data(&crack.points),
            crack.color,
            fixed(crack.delay, 2)
        ));
    }
    out.push_str("</g>\n");
}

pub(crate) fn lightning(out: &mut String, scene: &Scene) {
    out.push_str("<g>\n");
    for bolt in &scene.lightning {
        out.push_str(&format!(
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" filter=\"url(#lightningGlow)\" class=\"lightning-flash\" style=\"animation-delay:{}s\"/>\n",
            path_data(&bolt.points),
            bolt.color,
            coord(bolt.stroke_width),
            fixed(bolt.delay, 1)
        ));
    }
    out.push_str("</g>\n");
}

pub(crate) fn particles(out: &mut String, scene: &Scene) {
    out.push_str("<g>\n");
    for p in &scene.particles {
        out.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" filter=\"url(#softGlow)\" class=\"particle-drift\" style=\"--drift:{}px;animation-duration:{}s;animation-delay:{}s\"/>\n",
            coord(p.pos.x),
            coord(p.pos.y),
            coord(p.radius),
            p.color,
            whole(p.drift),
            fixed(p.duration, 1),
            fixed(p.delay, 1)
        ));
    }
    out.push_str("</g>\n");
}

pub(crate) fn center_burst(out: &mut String, scene: &Scene) {
    let (cx, cy) = (coord(scene.center.x), coord(scene.center.y));
    let [outer, mid, core] = scene.burst_radii();
    let hue = scene.palette.base_hue;
    let sat = scene.palette.base_sat;
    out.push_str("<g class=\"burst-fade\">\n");
    out.push_str(&format!(
        "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fill=\"url(#burstGrad)\" filter=\"url(#softGlow)\"/>\n",
        coord(outer)
    ));
    out.push_str(&format!(
        "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fill=\"{}\" filter=\"url(#softGlow)\"/>\n",
        coord(mid),
        Hsla::with_alpha(hue, sat, 80.0, 0.5)
    ));
    out.push_str(&format!(
        "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fill=\"{}\" filter=\"url(#hardGlow)\" class=\"core-pulse\"/>\n",
        coord(core),
        Hsla::with_alpha(hue, sat, 95.0, 0.9)
    ));
    out.push_str("</g>\n");
}

pub(crate) fn caption(out: &mut String, scene: &Scene) {
    let hue = scene.palette.base_hue;
    let x = coord(scene.size - CAPTION_MARGIN);
    out.push_str("<g class=\"meta-fade\">\n");
    out.push_str(&format!(
        "<text x=\"{x}\" y=\"{}\" text-anchor=\"end\" font-family=\"{CAPTION_FONT}\" font-size=\"10\" fill=\"{}\" letter-spacing=\"0.5\">{}</text>\n",
        coord(scene.size - CAPTION_MARGIN),
        Hsla::with_alpha(hue, 40.0, 50.0, 0.7),
        escape_xml(&scene.caption.headline())
    ));
    if let Some(author) = &scene.caption.author {
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{}\" text-anchor=\"end\" font-family=\"{CAPTION_FONT}\" font-size=\"9\" fill=\"{}\" letter-spacing=\"0.5\">{}</text>\n",
            coord(scene.size - AUTHOR_MARGIN),
            Hsla::with_alpha(hue, 30.0, 40.0, 0.5),
            escape_xml(author)
        ));
    }
    out.push_str("</g>\n");
}
