//! Error types for the commit-shards core.

use thiserror::Error;

/// Errors produced while validating a [`ShardConfig`](crate::config::ShardConfig).
///
/// Generation itself is total: once a config passes validation, every stage
/// runs to completion without failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardError {
    /// The identifier was empty or contained a non-hex character.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The canvas size was zero.
    #[error("invalid canvas size: size must be positive")]
    InvalidCanvasSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_identifier_includes_reason() {
        let err = ShardError::InvalidIdentifier("non-hex character 'z' at 0".into());
        let msg = format!("{err}");
        assert!(msg.contains("non-hex"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_canvas_size_displays_readable_message() {
        let msg = ShardError::InvalidCanvasSize.to_string();
        assert!(msg.contains("positive"), "got: {msg}");
    }

    #[test]
    fn shard_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShardError>();
    }

    #[test]
    fn shard_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<ShardError>();
    }
}
