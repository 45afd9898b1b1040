#![deny(unsafe_code)]
//! Export layer for commit-shards: token metadata, file snapshots and batch
//! generation.
//!
//! Sits between `commit-shards-core` (pure generation, no I/O) and the CLI.
//! PNG output is feature-gated behind `png` (default on) so that builds which
//! only need SVG and JSON do not pull in the rasterizer.

pub mod batch;
pub mod error;
pub mod metadata;
pub mod snapshot;

pub use batch::{generate_all, load_configs, parse_configs};
pub use error::ExportError;
pub use metadata::{Attribute, TokenMetadata};
