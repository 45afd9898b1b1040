#![deny(unsafe_code)]
//! Core of the commit-shards generator.
//!
//! Turns a commit identifier and a few display parameters into a
//! deterministic SVG crystal piece plus an ordered trait list. Provides the
//! `Xorshift32` PRNG, `Identifier` parsing, the `Hsla` color model, shard
//! geometry, `Scene` composition, the SVG renderer and trait extraction.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod identifier;
pub mod numfmt;
pub mod palette;
pub mod prng;
pub mod render;
pub mod scene;
pub mod traits;

pub use color::Hsla;
pub use config::{ShardConfig, DEFAULT_SIZE};
pub use error::ShardError;
pub use geometry::{Shard, ShardKind};
pub use identifier::Identifier;
pub use palette::{AccentKind, ShardPalette};
pub use prng::Xorshift32;
pub use render::render_svg;
pub use scene::Scene;
pub use traits::{extract_traits, Trait};

use serde::{Deserialize, Serialize};

/// A finished piece: the SVG document and its traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardArt {
    pub document: String,
    pub traits: Vec<Trait>,
}

/// Generates the document and traits for `config`.
///
/// # Errors
///
/// Returns [`ShardError`] before any generation work if the identifier or
/// canvas size is invalid.
#[tracing::instrument(skip_all, fields(repo = %config.repo, size = config.size))]
pub fn generate(config: &ShardConfig) -> Result<ShardArt, ShardError> {
    let id = config.validate()?;
    let scene = Scene::compose(&id, config);
    tracing::debug!(
        id = %id.short(),
        shards = scene.shards.len(),
        stars = scene.stars.len(),
        particles = scene.particles.len(),
        "composed scene"
    );
    Ok(ShardArt {
        document: render_svg(&scene),
        traits: traits::traits_for(&id, &config.repo),
    })
}

/// Composes the scene for `config` without serializing it.
///
/// # Errors
///
/// Same validation as [`generate`].
pub fn compose(config: &ShardConfig) -> Result<Scene, ShardError> {
    let id = config.validate()?;
    Ok(Scene::compose(&id, config))
}
