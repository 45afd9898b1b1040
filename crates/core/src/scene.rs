//! Scene composition: every element of a shard piece, before serialization.
//!
//! [`Scene::compose`] seeds one [`Xorshift32`] from the identifier and threads
//! it through the palette, the shard builders and then each decorative stage
//! in this order:
//!
//! 1. starfield
//! 2. nebula
//! 3. per-shard gradient angles
//! 4. reflections
//! 5. energy cracks
//! 6. lightning
//! 7. particles
//!
//! Shard polygons, the center burst and the caption consume no draws. The
//! order above is part of the output contract; see the golden tests in
//! `lib.rs`.
//!
//! Layers paint bottom-to-top in [`PAINT_ORDER`].

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Hsla;
use crate::config::ShardConfig;
use crate::geometry::{primary_count, primary_shards, scene_center, secondary_shards, Shard};
use crate::identifier::Identifier;
use crate::palette::ShardPalette;
use crate::prng::Xorshift32;

/// Maximum title length shown in the caption, in characters.
pub const MAX_TITLE_CHARS: usize = 45;
/// Maximum number of energy cracks.
pub const MAX_CRACKS: usize = 8;
/// Per-index delay of the shard spawn animation, seconds.
pub const SHARD_STAGGER: f64 = 0.12;
/// Center burst ring radii as fractions of the canvas size.
pub const BURST_RATIOS: [f64; 3] = [0.15, 0.06, 0.025];

/// The kind of content a layer paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Background,
    Nebula,
    Stars,
    Vignette,
    Shards,
    Reflections,
    Cracks,
    Lightning,
    Particles,
    Scanlines,
    CenterBurst,
    Caption,
}

/// Bottom-to-top paint order of the document.
pub const PAINT_ORDER: [LayerKind; 12] = [
    LayerKind::Background,
    LayerKind::Nebula,
    LayerKind::Stars,
    LayerKind::Vignette,
    LayerKind::Shards,
    LayerKind::Reflections,
    LayerKind::Cracks,
    LayerKind::Lightning,
    LayerKind::Particles,
    LayerKind::Scanlines,
    LayerKind::CenterBurst,
    LayerKind::Caption,
];

/// Background star; white unless tinted toward the base hue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: DVec2,
    pub radius: f64,
    /// Lightness is fixed at 90; alpha carries the brightness.
    pub color: Hsla,
    /// Twinkle animation delay, when the star twinkles.
    pub twinkle_delay: Option<f64>,
}

/// Soft blurred ellipse behind the shards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NebulaCloud {
    pub center: DVec2,
    /// Horizontal radius.
    pub rx: f64,
    /// Vertical radius.
    pub ry: f64,
    /// Rotation in degrees about the cloud center; `None` for the core glow.
    pub rotation: Option<f64>,
    pub color: Hsla,
}

/// Bright inset polygon over part of a shard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub shard: usize,
    pub points: [DVec2; 3],
    pub color: Hsla,
}

/// Jittered polyline between two shard apexes, drawn in with a dash animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crack {
    pub points: Vec<DVec2>,
    pub color: Hsla,
    pub dash: f64,
    pub delay: f64,
}

/// One flashing lightning stroke: a main bolt or its branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bolt {
    pub points: Vec<DVec2>,
    pub color: Hsla,
    pub stroke_width: f64,
    pub delay: f64,
    pub is_branch: bool,
}

/// Floating mote that drifts upward and fades in a loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec2,
    pub radius: f64,
    pub color: Hsla,
    /// Vertical travel per cycle, pixels.
    pub drift: f64,
    /// Cycle length, seconds.
    pub duration: f64,
    /// Start offset, seconds.
    pub delay: f64,
}

/// Caption text block in the bottom-right corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caption {
    pub short_id: String,
    pub title: Option<String>,
    pub author: Option<String>,
}

impl Caption {
    /// Main caption line: short identifier, then the title if any.
    pub fn headline(&self) -> String {
        match &self.title {
            Some(title) => format!("{} \u{2014} {title}", self.short_id),
            None => self.short_id.clone(),
        }
    }
}

/// Everything needed to serialize one shard piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub size: f64,
    pub center: DVec2,
    pub palette: ShardPalette,
    /// Primary shards followed by secondary shards, in paint order.
    pub shards: Vec<Shard>,
    pub primary_count: usize,
    pub stars: Vec<Star>,
    pub nebula: Vec<NebulaCloud>,
    /// Gradient rotation per shard, degrees, same order as `shards`.
    pub gradient_angles: Vec<f64>,
    pub reflections: Vec<Reflection>,
    pub cracks: Vec<Crack>,
    pub lightning: Vec<Bolt>,
    pub particles: Vec<Particle>,
    pub caption: Caption,
}

impl Scene {
    /// Composes the full scene for an already-validated identifier.
    pub fn compose(id: &Identifier, config: &ShardConfig) -> Self {
        let size = f64::from(config.size);
        let mut rng = Xorshift32::new(id.seed());

        let palette = ShardPalette::derive(id, &config.repo, &mut rng);
        let center = scene_center(id, size);
        let primary_count = primary_count(id);

        let mut shards = primary_shards(&mut rng, &palette, center, size, primary_count);
        shards.extend(secondary_shards(&mut rng, &palette, center, size));

        let stars = starfield(&mut rng, &palette, size);
        let nebula = nebula(&mut rng, &palette, center, size);
        let gradient_angles = shards.iter().map(|_| rng.range(0.0, 360.0)).collect();
        let reflections = reflections(&mut rng, &shards);
        let cracks = cracks(&mut rng, &palette, &shards);
        let lightning = lightning(&mut rng, &palette, &shards, center);
        let particles = particles(&mut rng, &palette, center, size);

        Self {
            size,
            center,
            palette,
            shards,
            primary_count,
            stars,
            nebula,
            gradient_angles,
            reflections,
            cracks,
            lightning,
            particles,
            caption: caption(id, config),
        }
    }

    /// Secondary (debris) shards.
    pub fn secondary_count(&self) -> usize {
        self.shards.len() - self.primary_count
    }

    /// Spawn animation delay for the shard at `index`, seconds.
    pub fn shard_delay(index: usize) -> f64 {
        index as f64 * SHARD_STAGGER
    }

    /// Center burst ring radii, outermost first.
    pub fn burst_radii(&self) -> [f64; 3] {
        BURST_RATIOS.map(|r| self.size * r)
    }
}

fn starfield(rng: &mut Xorshift32, palette: &ShardPalette, size: f64) -> Vec<Star> {
    let count = 80 + rng.int_range(0, 60);
    (0..count)
        .map(|_| {
            let x = rng.range(0.0, size);
            let y = rng.range(0.0, size);
            let radius = rng.range(0.3, 1.8);
            let brightness = rng.range(0.15, 0.7);
            let twinkles = rng.chance_above(0.7);
            let (hue, sat) = if rng.chance_above(0.8) {
                let hue = palette.base_hue + rng.range(-30.0, 30.0);
                (hue, rng.range(20.0, 50.0))
            } else {
                (0.0, 0.0)
            };
            let twinkle_delay = twinkles.then(|| rng.range(0.0, 4.0));
            Star {
                pos: DVec2::new(x, y),
                radius,
                color: Hsla::with_alpha(hue, sat, 90.0, brightness),
                twinkle_delay,
            }
        })
        .collect()
}

fn nebula(rng: &mut Xorshift32, palette: &ShardPalette, center: DVec2, size: f64) -> Vec<NebulaCloud> {
    let count = 3 + rng.int_range(0, 3);
    let mut clouds: Vec<NebulaCloud> = (0..count)
        .map(|_| {
            let x = center.x + rng.range(-size * 0.3, size * 0.3);
            let y = center.y + rng.range(-size * 0.3, size * 0.3);
            let rx = rng.range(size * 0.15, size * 0.4);
            let ry = rng.range(size * 0.1, size * 0.35);
            let rotation = rng.range(0.0, 360.0);
            let hue = if rng.chance_above(0.6) {
                palette.accent_hue
            } else {
                palette.base_hue
            };
            let opacity = rng.range(0.04, 0.12);
            NebulaCloud {
                center: DVec2::new(x, y),
                rx,
                ry,
                rotation: Some(rotation),
                color: Hsla::with_alpha(hue, 40.0, 25.0, opacity),
            }
        })
        .collect();

    for (ratio, sat, lit, alpha) in [(0.18, 50.0, 20.0, 0.08), (0.1, 60.0, 30.0, 0.06)] {
        clouds.push(NebulaCloud {
            center,
            rx: size * ratio,
            ry: size * ratio,
            rotation: None,
            color: Hsla::with_alpha(palette.base_hue, sat, lit, alpha),
        });
    }
    clouds
}

fn reflections(rng: &mut Xorshift32, shards: &[Shard]) -> Vec<Reflection> {
    shards
        .iter()
        .enumerate()
        .filter_map(|(index, shard)| {
            if rng.chance_above(0.5) {
                return None;
            }
            let t = rng.range(0.3, 0.6);
            let apex = shard.apex();
            let points = [0, 1, 2].map(|i| apex + (shard.vertices[i] - apex) * t);
            Some(Reflection {
                shard: index,
                points,
                color: Hsla::with_alpha(shard.hue, shard.sat - 10.0, shard.lit + 35.0, 0.15),
            })
        })
        .collect()
}

fn cracks(rng: &mut Xorshift32, palette: &ShardPalette, shards: &[Shard]) -> Vec<Crack> {
    let count = MAX_CRACKS.min(shards.len().saturating_sub(1));
    (0..count)
        .map(|i| {
            let a = shards[i].apex();
            let b = shards[(i + 1) % shards.len()].apex();
            let steps = 3 + rng.int_range(0, 4);
            let mut points = vec![a];
            for j in 1..=steps {
                let t = j as f64 / (steps + 1) as f64;
                let jx = rng.range(-12.0, 12.0);
                let jy = rng.range(-12.0, 12.0);
                points.push(a + (b - a) * t + DVec2::new(jx, jy));
            }
            points.push(b);

            let hue = if rng.chance_above(0.7) {
                palette.accent_hue
            } else {
                palette.base_hue
            };
            let glow = rng.range(0.3, 0.8);
            let dash = rng.range(100.0, 300.0);
            Crack {
                points,
                color: Hsla::with_alpha(hue, 70.0, 75.0, glow),
                dash,
                delay: 0.8 + i as f64 * 0.1,
            }
        })
        .collect()
}

fn lightning(rng: &mut Xorshift32, palette: &ShardPalette, shards: &[Shard], center: DVec2) -> Vec<Bolt> {
    let count = 2 + rng.int_range(0, 3);
    let last_target = (shards.len() - 1).min(8) as i64;
    let mut bolts = Vec::new();

    for _ in 0..count {
        let target = &shards[rng.int_range(0, last_target) as usize];
        let tip = target.tip;
        let span = tip - center;

        let segments = 4 + rng.int_range(0, 4);
        let mut points = vec![center];
        for j in 1..=segments {
            let t = j as f64 / (segments + 1) as f64;
            let jx = rng.range(-15.0, 15.0);
            let jy = rng.range(-15.0, 15.0);
            points.push(center + span * t + DVec2::new(jx, jy));
        }
        points.push(tip);

        let hue = if rng.chance_above(0.5) {
            palette.accent_hue
        } else {
            palette.base_hue
        };
        let delay = rng.range(1.5, 3.0);
        bolts.push(Bolt {
            points,
            color: Hsla::with_alpha(hue, 80.0, 80.0, 0.7),
            stroke_width: 1.5,
            delay,
            is_branch: false,
        });

        if rng.chance_above(0.4) {
            let from = rng.int_range(1, segments);
            let start = center + span * (from as f64 / (segments + 1) as f64);
            let angle = span.y.atan2(span.x) + rng.range(-0.8, 0.8);
            let len = rng.range(20.0, 60.0);
            let dir = DVec2::new(angle.cos(), angle.sin());
            let kx = rng.range(-8.0, 8.0);
            let ky = rng.range(-8.0, 8.0);
            let kink = start + dir * (len * 0.5) + DVec2::new(kx, ky);
            let end = start + dir * len;
            bolts.push(Bolt {
                points: vec![start, kink, end],
                color: Hsla::with_alpha(hue, 70.0, 75.0, 0.4),
                stroke_width: 0.8,
                delay: delay + 0.1,
                is_branch: true,
            });
        }
    }
    bolts
}

fn particles(rng: &mut Xorshift32, palette: &ShardPalette, center: DVec2, size: f64) -> Vec<Particle> {
    let count = 15 + rng.int_range(0, 20);
    (0..count)
        .map(|_| {
            let angle = rng.range(0.0, TAU);
            let dist = rng.range(size * 0.05, size * 0.45);
            let pos = center + DVec2::new(angle.cos(), angle.sin()) * dist;
            let radius = rng.range(0.5, 3.0);
            let hue = if rng.chance_above(0.7) {
                palette.accent_hue
            } else {
                palette.base_hue + rng.range(-20.0, 20.0)
            };
            let lit = rng.range(55.0, 85.0);
            let alpha = rng.range(0.2, 0.6);
            let drift = rng.range(8.0, 25.0);
            let duration = rng.range(3.0, 7.0);
            let delay = rng.range(0.0, 3.0);
            Particle {
                pos,
                radius,
                color: Hsla::with_alpha(hue, 60.0, lit, alpha),
                drift,
                duration,
                delay,
            }
        })
        .collect()
}

fn caption(id: &Identifier, config: &ShardConfig) -> Caption {
    Caption {
        short_id: id.short(),
        title: config
            .title
            .as_ref()
            .map(|t| t.chars().take(MAX_TITLE_CHARS).collect()),
        author: config.author.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ShardKind;
    use crate::palette::AccentKind;

    const SHA: &str = "e6be659721a6295cd5406462f9eae3532b8adb95";

    fn scene(config: &ShardConfig) -> Scene {
        Scene::compose(&config.validate().unwrap(), config)
    }

    fn agave() -> ShardConfig {
        ShardConfig::new(SHA, "anza-xyz/agave")
    }

    #[test]
    fn paint_order_starts_with_background_and_ends_with_caption() {
        assert_eq!(PAINT_ORDER[0], LayerKind::Background);
        assert_eq!(PAINT_ORDER[PAINT_ORDER.len() - 1], LayerKind::Caption);
        let shards = PAINT_ORDER.iter().position(|&l| l == LayerKind::Shards).unwrap();
        let burst = PAINT_ORDER.iter().position(|&l| l == LayerKind::CenterBurst).unwrap();
        assert!(shards < burst);
    }

    #[test]
    fn compose_is_deterministic() {
        assert_eq!(scene(&agave()), scene(&agave()));
    }

    #[test]
    fn element_counts_are_in_range() {
        let s = scene(&agave());
        assert!((6..=12).contains(&s.primary_count));
        assert!((4..=10).contains(&s.secondary_count()));
        assert!((80..=140).contains(&s.stars.len()));
        assert!((5..=8).contains(&s.nebula.len()));
        assert_eq!(s.gradient_angles.len(), s.shards.len());
        assert!((15..=35).contains(&s.particles.len()));
        assert_eq!(s.cracks.len(), MAX_CRACKS);
        let main_bolts = s.lightning.iter().filter(|b| !b.is_branch).count();
        assert!((2..=4).contains(&main_bolts));
    }

    #[test]
    fn primaries_precede_secondaries() {
        let s = scene(&agave());
        let first_secondary = s
            .shards
            .iter()
            .position(|sh| sh.kind == ShardKind::Secondary)
            .unwrap();
        assert_eq!(first_secondary, s.primary_count);
        assert!(s.shards[first_secondary..]
            .iter()
            .all(|sh| sh.kind == ShardKind::Secondary));
    }

    #[test]
    fn nebula_ends_with_two_core_ellipses_at_center() {
        let s = scene(&agave());
        let cores = &s.nebula[s.nebula.len() - 2..];
        for core in cores {
            assert_eq!(core.center, s.center);
            assert!(core.rotation.is_none());
        }
        assert_eq!(cores[0].rx, s.size * 0.18);
        assert_eq!(cores[1].rx, s.size * 0.1);
    }

    #[test]
    fn reflections_lie_between_apex_and_vertices() {
        let s = scene(&agave());
        for r in &s.reflections {
            let shard = &s.shards[r.shard];
            assert_eq!(r.points[0], shard.apex());
        }
        let mut seen = s.reflections.iter().map(|r| r.shard).collect::<Vec<_>>();
        seen.dedup();
        assert_eq!(seen.len(), s.reflections.len());
    }

    #[test]
    fn cracks_connect_consecutive_apexes() {
        let s = scene(&agave());
        for (i, crack) in s.cracks.iter().enumerate() {
            assert_eq!(crack.points[0], s.shards[i].apex());
            assert_eq!(*crack.points.last().unwrap(), s.shards[i + 1].apex());
            let interior = crack.points.len() - 2;
            assert!((3..=7).contains(&interior), "interior points {interior}");
            assert!((0.8 + i as f64 * 0.1 - crack.delay).abs() < 1e-12);
        }
    }

    #[test]
    fn starfield_draw_count_matches_branches() {
        let palette = ShardPalette {
            base_hue: 200.0,
            accent_hue: 20.0,
            base_sat: 70.0,
            accent_kind: AccentKind::Complementary,
        };
        let (mut tinted, mut twinkling) = (0, 0);
        for seed in 1..40u32 {
            let mut rng = Xorshift32::new(seed);
            let mut replay = rng.clone();
            let stars = starfield(&mut rng, &palette, 500.0);
            // count, then 6 per star, 2 more when tinted, 1 more when twinkling.
            let mut draws = 1;
            for star in &stars {
                draws += 6;
                if star.color.s > 0.0 {
                    tinted += 1;
                    draws += 2;
                }
                if star.twinkle_delay.is_some() {
                    twinkling += 1;
                    draws += 1;
                }
            }
            for _ in 0..draws {
                replay.next_u32();
            }
            assert_eq!(rng.state(), replay.state(), "seed {seed}");
        }
        assert!(tinted > 0 && twinkling > 0);
    }

    #[test]
    fn tinted_stars_stay_near_base_hue() {
        let palette = ShardPalette {
            base_hue: 200.0,
            accent_hue: 20.0,
            base_sat: 70.0,
            accent_kind: AccentKind::Complementary,
        };
        let mut rng = Xorshift32::new(7);
        for star in starfield(&mut rng, &palette, 500.0) {
            if star.color.s > 0.0 {
                assert!((170.0..=230.0).contains(&star.color.h));
                assert!((20.0..=50.0).contains(&star.color.s));
            } else {
                assert_eq!(star.color.h, 0.0);
            }
            if let Some(delay) = star.twinkle_delay {
                assert!((0.0..=4.0).contains(&delay));
            }
        }
    }

    #[test]
    fn lightning_runs_from_center_to_a_shard_tip() {
        let s = scene(&agave());
        let targets: Vec<DVec2> = s.shards.iter().take(9).map(|sh| sh.tip).collect();
        for bolt in s.lightning.iter().filter(|b| !b.is_branch) {
            assert_eq!(bolt.points[0], s.center);
            assert!(targets.contains(bolt.points.last().unwrap()));
        }
        for branch in s.lightning.iter().filter(|b| b.is_branch) {
            assert_eq!(branch.points.len(), 3);
        }
    }

    #[test]
    fn shard_delay_staggers_by_index() {
        assert_eq!(Scene::shard_delay(0), 0.0);
        assert!((Scene::shard_delay(5) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn burst_radii_follow_ratios() {
        let s = scene(&agave().with_size(1000));
        assert_eq!(s.burst_radii(), [150.0, 60.0, 25.0]);
    }

    #[test]
    fn caption_truncates_title_to_45_chars() {
        let long = "x".repeat(80);
        let s = scene(&agave().with_title(long).with_author("nullopcode0"));
        assert_eq!(s.caption.title.as_ref().unwrap().chars().count(), MAX_TITLE_CHARS);
        assert_eq!(s.caption.author.as_deref(), Some("nullopcode0"));
        assert!(s.caption.headline().starts_with("e6be6597 "));
    }

    #[test]
    fn caption_truncation_counts_characters_not_bytes() {
        let title = "\u{00e9}".repeat(50);
        let s = scene(&agave().with_title(title));
        assert_eq!(s.caption.title.unwrap(), "\u{00e9}".repeat(45));
    }

    #[test]
    fn caption_without_title_is_short_id() {
        let s = scene(&agave());
        assert_eq!(s.caption.headline(), "e6be6597");
    }

    #[test]
    fn caption_text_does_not_touch_the_generator() {
        let plain = scene(&agave());
        let captioned = scene(&agave().with_title("t").with_author("a"));
        assert_eq!(plain.particles, captioned.particles);
        assert_eq!(plain.lightning, captioned.lightning);
    }

    #[test]
    fn scene_serializes_to_json() {
        let s = scene(&agave());
        let v = serde_json::to_value(&s).unwrap();
        assert!(v["shards"].is_array());
        assert_eq!(v["primary_count"], s.primary_count);
    }
}
