#![deny(unsafe_code)]
//! WASM bindings for in-browser shard previews.
//!
//! Thin wrappers over `commit-shards-core`; the browser gets the same bytes
//! the CLI writes.

use commit_shards_core::{extract_traits, generate, ShardConfig, ShardError, DEFAULT_SIZE};
use wasm_bindgen::prelude::*;

fn config(
    commit_sha: String,
    repo: String,
    title: Option<String>,
    author: Option<String>,
    size: Option<u32>,
) -> ShardConfig {
    ShardConfig {
        commit_sha,
        repo,
        title,
        author,
        size: size.unwrap_or(DEFAULT_SIZE),
    }
}

fn shard_svg(config: &ShardConfig) -> Result<String, ShardError> {
    generate(config).map(|art| art.document)
}

fn shard_traits_json(config: &ShardConfig) -> Result<String, String> {
    let traits = extract_traits(config).map_err(|e| e.to_string())?;
    serde_json::to_string(&traits).map_err(|e| e.to_string())
}

/// Generates the SVG document for a commit.
#[wasm_bindgen]
pub fn generate_shard_svg(
    commit_sha: String,
    repo: String,
    title: Option<String>,
    author: Option<String>,
    size: Option<u32>,
) -> Result<String, JsError> {
    let config = config(commit_sha, repo, title, author, size);
    shard_svg(&config).map_err(|e| JsError::new(&e.to_string()))
}

/// Trait list for a commit as a JSON array of `{name, value}`.
#[wasm_bindgen]
pub fn extract_shard_traits(commit_sha: String, repo: String) -> Result<String, JsError> {
    let config = ShardConfig::new(commit_sha, repo);
    shard_traits_json(&config).map_err(|e| JsError::new(&e))
}
