//! Per-call generation input.
//!
//! A [`ShardConfig`] captures everything needed to recreate a shard: the
//! commit identifier, the repository it came from, optional caption text and
//! the canvas size. Two equal configs always produce byte-identical output.

use serde::{Deserialize, Serialize};

use crate::error::ShardError;
use crate::identifier::Identifier;

/// Default canvas edge length in pixels.
pub const DEFAULT_SIZE: u32 = 800;

fn default_size() -> u32 {
    DEFAULT_SIZE
}

/// Reproducible specification for one shard.
///
/// `commit_sha` is kept as the caller supplied it; [`ShardConfig::identifier`]
/// validates and normalizes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardConfig {
    pub commit_sha: String,
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "default_size")]
    pub size: u32,
}

impl ShardConfig {
    /// Creates a config with no caption text and the default size.
    pub fn new(commit_sha: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            commit_sha: commit_sha.into(),
            repo: repo.into(),
            title: None,
            author: None,
            size: DEFAULT_SIZE,
        }
    }

    /// Returns the config with the given title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the config with the given author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Returns the config with the given canvas size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Parses and normalizes `commit_sha`.
    pub fn identifier(&self) -> Result<Identifier, ShardError> {
        Identifier::parse(&self.commit_sha)
    }

    /// Validates the whole config and returns the parsed identifier.
    ///
    /// The identifier is checked first, then the canvas size.
    pub fn validate(&self) -> Result<Identifier, ShardError> {
        let id = self.identifier()?;
        if self.size == 0 {
            return Err(ShardError::InvalidCanvasSize);
        }
        Ok(id)
    }
}
