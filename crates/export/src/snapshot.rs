//! File snapshots of a generated shard: `.svg`, `.json` and, with the `png`
//! feature (default on), a rasterized `.png`.
//!
//! Files are named `shard-<short>.<ext>` inside the target directory, which is
//! created if missing.

use std::fs;
use std::path::{Path, PathBuf};

use commit_shards_core::ShardArt;

use crate::error::ExportError;
use crate::metadata::TokenMetadata;

/// Path of the snapshot with `extension` for identifier prefix `short`.
pub fn snapshot_path(dir: &Path, short: &str, extension: &str) -> PathBuf {
    dir.join(format!("shard-{short}.{extension}"))
}

fn write_file(dir: &Path, short: &str, extension: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = snapshot_path(dir, short, extension);
    fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote snapshot");
    Ok(path)
}

/// Writes the SVG document. Returns the written path.
pub fn write_svg(dir: &Path, art: &ShardArt, short: &str) -> Result<PathBuf, ExportError> {
    write_file(dir, short, "svg", art.document.as_bytes())
}

/// Writes pretty-printed token metadata. Returns the written path.
pub fn write_metadata(dir: &Path, metadata: &TokenMetadata, short: &str) -> Result<PathBuf, ExportError> {
    let json = metadata.to_json()?;
    write_file(dir, short, "json", json.as_bytes())
}

/// Rasterizes an SVG document at its declared size into straight-alpha RGBA.
///
/// Returns `ExportError::Raster` if the document does not parse or has no
/// drawable area.
#[cfg(feature = "png")]
pub fn rasterize(document: &str) -> Result<image::RgbaImage, ExportError> {
    use resvg::{tiny_skia, usvg};

    let tree = usvg::Tree::from_str(document, &usvg::Options::default())
        .map_err(|e| ExportError::Raster(e.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Raster("failed to allocate pixmap".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    image::RgbaImage::from_raw(size.width(), size.height(), rgba)
        .ok_or_else(|| ExportError::Raster("RGBA buffer size mismatch".into()))
}

/// Rasterizes the document and writes it as PNG. Returns the written path.
#[cfg(feature = "png")]
pub fn write_png(dir: &Path, art: &ShardArt, short: &str) -> Result<PathBuf, ExportError> {
    let img = rasterize(&art.document)?;
    fs::create_dir_all(dir)?;
    let path = snapshot_path(dir, short, "png");
    img.save(&path).map_err(|e| ExportError::Io(e.to_string()))?;
    tracing::debug!(path = %path.display(), width = img.width(), "wrote png snapshot");
    Ok(path)
}
