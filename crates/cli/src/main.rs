#![deny(unsafe_code)]
//! CLI binary for the commit-shards generator.
//!
//! Subcommands:
//! - `generate <sha>` -- write one shard SVG (optionally metadata and PNG)
//! - `traits <sha>` -- print the trait list
//! - `batch <configs.json>` -- generate every config in a JSON file

mod error;

use clap::{Parser, Subcommand};
use commit_shards_core::{extract_traits, generate, ShardArt, ShardConfig, DEFAULT_SIZE};
use commit_shards_export::{batch, snapshot, TokenMetadata};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "commit-shards", about = "Deterministic crystal art from commit hashes")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one shard and write `shard-<short>.svg`.
    Generate {
        /// Commit identifier (hex, up to 40 digits are significant).
        sha: String,

        /// Repository the commit belongs to (e.g. "anza-xyz/agave").
        #[arg(short, long, default_value = "")]
        repo: String,

        /// Caption title.
        #[arg(short, long)]
        title: Option<String>,

        /// Caption author line.
        #[arg(short, long)]
        author: Option<String>,

        /// Canvas edge length in pixels.
        #[arg(short, long, default_value_t = DEFAULT_SIZE)]
        size: u32,

        /// Output directory.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Also write token metadata JSON.
        #[arg(long)]
        metadata: bool,

        /// Also write a rasterized PNG.
        #[arg(long)]
        png: bool,
    },
    /// Print the trait list for a commit.
    Traits {
        /// Commit identifier.
        sha: String,

        /// Repository the commit belongs to.
        #[arg(short, long, default_value = "")]
        repo: String,
    },
    /// Generate every config in a JSON array file.
    Batch {
        /// Path to a JSON array of configs.
        configs: PathBuf,

        /// Output directory.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

/// Paths written for one shard.
struct Written {
    svg: PathBuf,
    metadata: Option<PathBuf>,
    png: Option<PathBuf>,
}

fn write_outputs(
    config: &ShardConfig,
    art: &ShardArt,
    out_dir: &Path,
    metadata: bool,
    png: bool,
) -> Result<Written, CliError> {
    let short = config.identifier()?.short();
    let svg = snapshot::write_svg(out_dir, art, &short)?;
    let metadata = if metadata {
        let meta = TokenMetadata::from_config(config, &art.traits)?;
        Some(snapshot::write_metadata(out_dir, &meta, &short)?)
    } else {
        None
    };
    let png = if png { Some(write_png(out_dir, art, &short)?) } else { None };
    Ok(Written { svg, metadata, png })
}

#[cfg(feature = "png")]
fn write_png(out_dir: &Path, art: &ShardArt, short: &str) -> Result<PathBuf, CliError> {
    Ok(snapshot::write_png(out_dir, art, short)?)
}

#[cfg(not(feature = "png"))]
fn write_png(_out_dir: &Path, _art: &ShardArt, _short: &str) -> Result<PathBuf, CliError> {
    Err(CliError::Input("built without PNG support".into()))
}

fn display(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.display().to_string())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate {
            sha,
            repo,
            title,
            author,
            size,
            out_dir,
            metadata,
            png,
        } => {
            let config = ShardConfig {
                commit_sha: sha,
                repo,
                title,
                author,
                size,
            };
            let art = generate(&config)?;
            let written = write_outputs(&config, &art, &out_dir, metadata, png)?;

            if cli.json {
                let info = serde_json::json!({
                    "commit_sha": config.commit_sha,
                    "size": config.size,
                    "svg": written.svg.display().to_string(),
                    "metadata": display(&written.metadata),
                    "png": display(&written.png),
                    "traits": art.traits,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "generated {} ({}x{}) -> {}",
                    config.commit_sha,
                    config.size,
                    config.size,
                    written.svg.display()
                );
                for extra in [&written.metadata, &written.png].into_iter().flatten() {
                    eprintln!("  also wrote {}", extra.display());
                }
            }
        }
        Command::Traits { sha, repo } => {
            let traits = extract_traits(&ShardConfig::new(sha, repo))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&traits)?);
            } else {
                for t in &traits {
                    println!("{}: {}", t.name, t.value);
                }
            }
        }
        Command::Batch { configs, out_dir } => {
            let text = std::fs::read_to_string(&configs)
                .map_err(|e| CliError::Input(format!("cannot read {}: {e}", configs.display())))?;
            let configs = batch::parse_configs(&text)
                .map_err(|e| CliError::Input(format!("invalid batch file: {e}")))?;

            let mut report = Vec::with_capacity(configs.len());
            let mut first_failure = None;
            for (config, result) in configs.iter().zip(batch::generate_all(&configs)) {
                match result {
                    Ok(art) => {
                        let written = write_outputs(config, &art, &out_dir, true, false)?;
                        report.push(serde_json::json!({
                            "commit_sha": config.commit_sha,
                            "svg": written.svg.display().to_string(),
                            "metadata": display(&written.metadata),
                        }));
                        if !cli.json {
                            eprintln!("{} -> {}", config.commit_sha, written.svg.display());
                        }
                    }
                    Err(e) => {
                        report.push(serde_json::json!({
                            "commit_sha": config.commit_sha,
                            "error": e.to_string(),
                        }));
                        if !cli.json {
                            eprintln!("{}: {e}", config.commit_sha);
                        }
                        first_failure.get_or_insert(e);
                    }
                }
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            if let Some(e) = first_failure {
                return Err(e.into());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
