use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use image::{DynamicImage, ImageError, ImageFormat};

use crate::alpha_bleed;
use crate::error::{IconError, Result};
use crate::resize::ImageResizer;

/// Name the packers read: `<size>.png`.
pub fn raster_path(png_dir: &Path, size: u32) -> PathBuf {
    png_dir.join(format!("{size}.png"))
}

/// Name of the delivered raster: `<size>x<size>.png`.
pub fn final_raster_path(png_dir: &Path, size: u32) -> PathBuf {
    png_dir.join(format!("{size}x{size}.png"))
}

/// Decodes the source image, alpha-bleeding it first when asked to.
pub fn load_source(input: &Path, bleed: bool) -> Result<DynamicImage> {
    let img = image::open(input).map_err(|source| IconError::ImageProcessing {
        path: input.to_path_buf(),
        source,
    })?;

    if !bleed {
        return Ok(img);
    }
    let mut rgba = img.into_rgba8();
    alpha_bleed::alpha_bleed(&mut rgba);
    Ok(DynamicImage::ImageRgba8(rgba))
}

/// Writes `png_dir/<size>.png` for every size and returns the paths in
/// `sizes` order. The source is decoded once; each size is resized and
/// encoded on its own blocking worker, and every worker is joined before
/// returning.
pub async fn generate_rasters(
    resizer: Arc<dyn ImageResizer>,
    input: &Path,
    png_dir: &Path,
    sizes: &[u32],
    bleed: bool,
    verbose: bool,
) -> Result<Vec<PathBuf>> {
    let input_path = input.to_path_buf();
    let source = tokio::task::spawn_blocking(move || load_source(&input_path, bleed))
        .await
        .map_err(|e| join_failure(input, e))??;
    let source = Arc::new(source);

    let handles: Vec<_> = sizes
        .iter()
        .map(|&size| {
            let resizer = Arc::clone(&resizer);
            let source = Arc::clone(&source);
            let path = raster_path(png_dir, size);
            tokio::task::spawn_blocking(move || write_raster(resizer.as_ref(), &source, size, path))
        })
        .collect();

    let mut written = Vec::with_capacity(handles.len());
    for (handle, &size) in handles.into_iter().zip(sizes) {
        let path = handle
            .await
            .map_err(|e| join_failure(&raster_path(png_dir, size), e))??;
        if verbose {
            println!("{} Wrote {}", "✓".green(), path.display());
        }
        written.push(path);
    }

    Ok(written)
}

fn write_raster(
    resizer: &dyn ImageResizer,
    source: &DynamicImage,
    size: u32,
    path: PathBuf,
) -> Result<PathBuf> {
    let resized = resizer.resize(source, size);
    resized
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| IconError::ImageProcessing {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

fn join_failure(path: &Path, err: tokio::task::JoinError) -> IconError {
    IconError::ImageProcessing {
        path: path.to_path_buf(),
        source: ImageError::IoError(io::Error::other(err)),
    }
}

/// Renames every `<size>.png` to `<size>x<size>.png`, replacing leftovers
/// from an earlier run. Must run after packing: the packers only look for
/// the bare numeric names.
pub fn normalize_raster_names(png_dir: &Path, sizes: &[u32], verbose: bool) -> Result<Vec<PathBuf>> {
    let mut renamed = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let from = raster_path(png_dir, size);
        let to = final_raster_path(png_dir, size);
        std::fs::rename(&from, &to).map_err(|e| IconError::io(&from, e))?;
        if verbose {
            println!("{} Renamed {} to {}", "✓".green(), from.display(), to.display());
        }
        renamed.push(to);
    }
    Ok(renamed)
}
