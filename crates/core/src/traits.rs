//! Collectible traits derived from the identifier and repository only.
//!
//! Nothing here reads the composed scene. The one generator-dependent trait,
//! the palette branch, replays the first draw on a private generator, so
//! revising decorative layers can never change a trait value.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ShardConfig;
use crate::error::ShardError;
use crate::geometry::primary_count;
use crate::identifier::Identifier;
use crate::palette::{accent_kind, base_hue, base_saturation, AccentKind};

/// Generator generation label reported as the first trait.
pub const GENERATOR_VERSION: &str = "v2-crystal";

/// Hue band names with their exclusive upper bounds, in degrees.
const HUE_BANDS: &[(f64, &str)] = &[
    (15.0, "Crimson"),
    (45.0, "Ember"),
    (70.0, "Gold"),
    (150.0, "Verdant"),
    (190.0, "Teal"),
    (250.0, "Azure"),
    (290.0, "Violet"),
    (345.0, "Magenta"),
    (360.0, "Crimson"),
];

/// One name/value attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    pub value: String,
}

impl Trait {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered trait list for `config`.
///
/// # Errors
///
/// Returns [`ShardError`] when the config does not validate.
pub fn extract_traits(config: &ShardConfig) -> Result<Vec<Trait>, ShardError> {
    let id = config.validate()?;
    Ok(traits_for(&id, &config.repo))
}

pub(crate) fn traits_for(id: &Identifier, repo: &str) -> Vec<Trait> {
    let count = primary_count(id);
    let hex = id.to_hex();
    vec![
        Trait::new("Generator", GENERATOR_VERSION),
        Trait::new("Shards", count.to_string()),
        Trait::new("Density", density(count)),
        Trait::new("Hue Band", hue_band(base_hue(id, repo))),
        Trait::new("Palette", palette_name(accent_kind(id))),
        Trait::new("Saturation", saturation_band(base_saturation(id))),
        Trait::new("Complexity", complexity(&hex).to_string()),
        Trait::new("Rarity", rarity(&hex)),
    ]
}

fn density(count: usize) -> &'static str {
    match count {
        0..=7 => "Sparse",
        8..=10 => "Balanced",
        _ => "Dense",
    }
}

/// Named band for a hue in degrees.
pub fn hue_band(hue: f64) -> &'static str {
    let hue = hue.rem_euclid(360.0);
    HUE_BANDS
        .iter()
        .find(|(upper, _)| hue < *upper)
        .map_or("Crimson", |&(_, name)| name)
}

fn palette_name(kind: AccentKind) -> &'static str {
    match kind {
        AccentKind::Analogous => "Analogous",
        AccentKind::Complementary => "Complementary",
    }
}

fn saturation_band(sat: f64) -> &'static str {
    if sat < 65.0 {
        "Muted"
    } else if sat < 80.0 {
        "Vivid"
    } else {
        "Electric"
    }
}

/// Distinct hex digits in the identifier.
fn complexity(hex: &str) -> usize {
    hex.chars().collect::<BTreeSet<_>>().len()
}

fn rarity(hex: &str) -> &'static str {
    match hex.chars().take_while(|&c| c == '0').count() {
        0 => "Common",
        1 => "Uncommon",
        2 => "Rare",
        3 => "Epic",
        _ => "Legendary",
    }
}
