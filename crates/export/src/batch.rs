//! Sequential generation over a list of configs.
//!
//! Each config gets its own generator, so results never depend on the order
//! or contents of the other entries.

use std::fs;
use std::path::Path;

use commit_shards_core::{generate, ShardArt, ShardConfig, ShardError};

use crate::error::ExportError;

/// Generates every config in order. A failing entry yields an error in its
/// own slot and does not stop the batch.
pub fn generate_all(configs: &[ShardConfig]) -> Vec<Result<ShardArt, ShardError>> {
    let results: Vec<_> = configs.iter().map(generate).collect();
    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::debug!(total = results.len(), failed, "batch generated");
    results
}

/// Parses a JSON array of configs.
pub fn parse_configs(json: &str) -> Result<Vec<ShardConfig>, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a JSON batch file.
pub fn load_configs(path: &Path) -> Result<Vec<ShardConfig>, ExportError> {
    let text = fs::read_to_string(path)?;
    parse_configs(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_matches_individual_generation() {
        let configs = vec![
            ShardConfig::new("e6be659721a6295cd5406462f9eae3532b8adb95", "anza-xyz/agave"),
            ShardConfig::new("abc123", "x/y").with_title("second"),
            ShardConfig::new("ffffffff", "coral-xyz/anchor").with_size(400),
        ];
        let results = generate_all(&configs);
        assert_eq!(results.len(), 3);
        for (config, result) in configs.iter().zip(&results) {
            assert_eq!(result.as_ref().unwrap(), &generate(config).unwrap());
        }
    }

    #[test]
    fn order_of_entries_does_not_matter() {
        let a = ShardConfig::new("1234abcd", "x/y");
        let b = ShardConfig::new("deadbeef", "x/y");
        let forward = generate_all(&[a.clone(), b.clone()]);
        let backward = generate_all(&[b, a]);
        assert_eq!(forward[0], backward[1]);
        assert_eq!(forward[1], backward[0]);
    }

    #[test]
    fn invalid_entry_fails_only_its_slot() {
        let results = generate_all(&[
            ShardConfig::new("abc", "x/y"),
            ShardConfig::new("zzzz", "x/y"),
            ShardConfig::new("def", "x/y").with_size(0),
            ShardConfig::new("0123", "x/y"),
        ]);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ShardError::InvalidIdentifier(_))));
        assert_eq!(results[2], Err(ShardError::InvalidCanvasSize));
        assert!(results[3].is_ok());
    }

    #[test]
    fn configs_parse_with_defaults() {
        let configs = parse_configs(
            r#"[
                {"commit_sha": "abc123", "repo": "anza-xyz/agave"},
                {"commit_sha": "def456", "repo": "x/y", "title": "t", "author": "a", "size": 400}
            ]"#,
        )
        .unwrap();
        assert_eq!(configs[0], ShardConfig::new("abc123", "anza-xyz/agave"));
        assert_eq!(configs[1].size, 400);
        assert_eq!(configs[1].author.as_deref(), Some("a"));
    }

    #[test]
    fn malformed_batch_is_a_serialization_error() {
        let err = parse_configs(r#"[{"repo": "x/y"}]"#).unwrap_err();
        assert!(matches!(err, ExportError::Serialization(_)));
    }

    #[test]
    fn load_configs_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        fs::write(&path, r#"[{"commit_sha": "abc", "repo": "x/y"}]"#).unwrap();
        assert_eq!(load_configs(&path).unwrap().len(), 1);
        assert!(matches!(load_configs(&dir.path().join("missing.json")), Err(ExportError::Io(_))));
    }
}
