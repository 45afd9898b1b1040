//! Token metadata document handed to the minting flow.
//!
//! Follows the common NFT JSON layout: `name`, `symbol`, `description`, an
//! `attributes` list of `{trait_type, value}` and, once the image has been
//! uploaded, `image` plus `properties.files`.

use commit_shards_core::{ShardConfig, ShardError, Trait};
use serde::{Deserialize, Serialize};

/// Collection symbol shared by every token.
pub const SYMBOL: &str = "COMSHARD";

/// MIME type of the uploaded image.
pub const IMAGE_MIME: &str = "image/svg+xml";

/// One `{trait_type, value}` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

impl From<&Trait> for Attribute {
    fn from(t: &Trait) -> Self {
        Attribute::new(&t.name, &t.value)
    }
}

/// A file entry under `properties.files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFile {
    pub uri: String,
    #[serde(rename = "type")]
    pub mime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub files: Vec<MetadataFile>,
}

/// Token metadata for one shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl TokenMetadata {
    /// Builds metadata for `config`, appending `traits` after the
    /// commit/repo/author attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ShardError`] if the config's identifier is invalid.
    pub fn from_config(config: &ShardConfig, traits: &[Trait]) -> Result<Self, ShardError> {
        let short = config.identifier()?.short();

        let mut attributes = vec![
            Attribute::new("Commit", &short),
            Attribute::new("Repo", &config.repo),
        ];
        if let Some(author) = &config.author {
            attributes.push(Attribute::new("Author", author));
        }
        attributes.extend(traits.iter().map(Attribute::from));

        Ok(Self {
            name: format!("Commit Shard #{short}"),
            symbol: SYMBOL.to_string(),
            description: format!("Commit Shard \u{2014} generative crystal art from {short}"),
            external_url: github_url(&config.repo),
            image: None,
            attributes,
            properties: None,
        })
    }

    /// Returns the metadata pointing at an uploaded image.
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        self.properties = Some(Properties {
            files: vec![MetadataFile {
                uri: uri.clone(),
                mime: IMAGE_MIME.to_string(),
            }],
        });
        self.image = Some(uri);
        self
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `https://github.com/<owner>/<name>` when `repo` has that shape.
fn github_url(repo: &str) -> Option<String> {
    let (owner, name) = repo.split_once('/')?;
    let valid = |s: &str| !s.is_empty() && !s.contains('/') && !s.contains(char::is_whitespace);
    (valid(owner) && valid(name)).then(|| format!("https://github.com/{owner}/{name}"))
}
