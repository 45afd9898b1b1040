//! Shard palette: base hue, accent hue and base saturation.
//!
//! The base hue comes from the repository name when it is one of a few known
//! projects, otherwise from identifier bytes 0 and 1. The accent is either
//! analogous (30–50° away) or near-complementary (150–210° away), decided by
//! the first draw of the scene generator.

use serde::{Deserialize, Serialize};

use crate::color::normalize_hue;
use crate::identifier::Identifier;
use crate::prng::Xorshift32;

/// Repositories with a fixed signature hue, keyed by lower-case name.
const REPO_HUES: &[(&str, f64)] = &[
    ("agave", 160.0),
    ("solana", 170.0),
    ("anchor", 210.0),
    ("metaplex", 280.0),
];

/// How the accent hue relates to the base hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccentKind {
    /// Accent 30–50° from the base.
    Analogous,
    /// Accent 150–210° from the base.
    Complementary,
}

/// Hues and saturation shared by every element of one scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShardPalette {
    pub base_hue: f64,
    pub accent_hue: f64,
    pub base_sat: f64,
    pub accent_kind: AccentKind,
}

impl ShardPalette {
    /// Derives the palette, consuming one or two draws from `rng`.
    ///
    /// Must be the first consumer of a freshly seeded generator.
    pub fn derive(id: &Identifier, repo: &str, rng: &mut Xorshift32) -> Self {
        let base_hue = base_hue(id, repo);
        let base_sat = base_saturation(id);
        let (accent_kind, accent_hue) = if rng.chance_above(0.5) {
            (
                AccentKind::Analogous,
                (base_hue + 30.0 + rng.range(0.0, 20.0)) % 360.0,
            )
        } else {
            (
                AccentKind::Complementary,
                (base_hue + 150.0 + rng.range(0.0, 60.0)) % 360.0,
            )
        };
        Self {
            base_hue,
            accent_hue,
            base_sat,
            accent_kind,
        }
    }

    /// Hue opposite the base, used for the background fill.
    pub fn background_hue(&self) -> f64 {
        normalize_hue(self.base_hue + 180.0)
    }
}

/// Hue derived from identifier bytes 0 and 1: `((b0 << 8) | b1) mod 360`.
pub fn hash_hue(id: &Identifier) -> f64 {
    let v = (u32::from(id.byte(0)) << 8) | u32::from(id.byte(1));
    (v % 360) as f64
}

/// Signature hue for a known repository, matched on the last path segment.
pub fn repo_hue(repo: &str) -> Option<f64> {
    let key = repo.rsplit('/').next().unwrap_or("").to_lowercase();
    REPO_HUES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|&(_, hue)| hue)
}

/// Base hue: the repository's signature hue, or [`hash_hue`].
pub fn base_hue(id: &Identifier, repo: &str) -> f64 {
    repo_hue(repo).unwrap_or_else(|| hash_hue(id))
}

/// Base saturation in percent: `55 + (b2 mod 35)`.
pub fn base_saturation(id: &Identifier) -> f64 {
    f64::from(55 + id.byte(2) % 35)
}

/// Accent branch for an identifier, without building a scene.
///
/// Seeds a private generator and replays only the first palette draw.
pub fn accent_kind(id: &Identifier) -> AccentKind {
    let mut rng = Xorshift32::new(id.seed());
    if rng.chance_above(0.5) {
        AccentKind::Analogous
    } else {
        AccentKind::Complementary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "e6be659721a6295cd5406462f9eae3532b8adb95";

    fn id(hex: &str) -> Identifier {
        Identifier::parse(hex).unwrap()
    }

    #[test]
    fn known_repos_use_signature_hue() {
        assert_eq!(repo_hue("anza-xyz/agave"), Some(160.0));
        assert_eq!(repo_hue("solana"), Some(170.0));
        assert_eq!(repo_hue("coral-xyz/Anchor"), Some(210.0));
        assert_eq!(repo_hue("metaplex-foundation/METAPLEX"), Some(280.0));
    }

    #[test]
    fn unknown_repo_has_no_signature_hue() {
        assert_eq!(repo_hue("rust-lang/rust"), None);
        assert_eq!(repo_hue(""), None);
        assert_eq!(repo_hue("agave/"), None);
    }

    #[test]
    fn hash_hue_uses_first_two_bytes() {
        // 0xe6be = 59070, 59070 mod 360 = 30.
        assert_eq!(hash_hue(&id(SHA)), 30.0);
    }

    #[test]
    fn signature_hue_overrides_hash_hue_for_zero_identifier() {
        let zero = id(&"0".repeat(40));
        assert_eq!(hash_hue(&zero), 0.0);
        assert_eq!(base_hue(&zero, "anza-xyz/agave"), 160.0);
        assert_eq!(base_hue(&zero, "metaplex"), 280.0);
    }

    #[test]
    fn base_saturation_uses_third_byte() {
        // 0x65 = 101, 101 mod 35 = 31.
        assert_eq!(base_saturation(&id(SHA)), 86.0);
    }

    #[test]
    fn derive_consumes_two_draws_and_matches_accent_kind() {
        let id = id(SHA);
        let mut rng = Xorshift32::new(id.seed());
        let palette = ShardPalette::derive(&id, "anza-xyz/agave", &mut rng);
        let mut replay = Xorshift32::new(id.seed());
        replay.next_u32();
        replay.next_u32();
        assert_eq!(rng.state(), replay.state());
        assert_eq!(palette.accent_kind, accent_kind(&id));
    }

    #[test]
    fn accent_offset_matches_kind() {
        for hex in [SHA, "975d0c3f38a69154c374ce6a95ae577394f05bf1", "2bab970b"] {
            let id = id(hex);
            let mut rng = Xorshift32::new(id.seed());
            let p = ShardPalette::derive(&id, "x", &mut rng);
            let offset = (p.accent_hue - p.base_hue).rem_euclid(360.0);
            match p.accent_kind {
                AccentKind::Analogous => assert!((30.0..=50.0).contains(&offset), "{offset}"),
                AccentKind::Complementary => assert!((150.0..=210.0).contains(&offset), "{offset}"),
            }
        }
    }

    #[test]
    fn background_hue_is_opposite_base() {
        let p = ShardPalette {
            base_hue: 270.0,
            accent_hue: 0.0,
            base_sat: 60.0,
            accent_kind: AccentKind::Analogous,
        };
        assert_eq!(p.background_hue(), 90.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn palette_values_in_range(bytes: [u8; 20], repo in "[a-z/]{0,16}") {
                let id = Identifier::from_bytes(bytes);
                let mut rng = Xorshift32::new(id.seed());
                let p = ShardPalette::derive(&id, &repo, &mut rng);
                prop_assert!((0.0..360.0).contains(&p.base_hue));
                prop_assert!((0.0..360.0).contains(&p.accent_hue));
                prop_assert!((55.0..=89.0).contains(&p.base_sat));
            }
        }
    }
}
