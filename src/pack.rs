use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use icns::{IconFamily, IconType, PixelFormat};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::RgbaImage;

use crate::error::{IconError, Result};
use crate::raster::raster_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Ico,
    Icns,
}

impl ContainerKind {
    pub fn extension(self) -> &'static str {
        match self {
            ContainerKind::Ico => "ico",
            ContainerKind::Icns => "icns",
        }
    }

    /// Raster sizes the container is built from, smallest first.
    pub fn source_sizes(self) -> &'static [u32] {
        match self {
            ContainerKind::Ico => ICO_SIZES,
            ContainerKind::Icns => &[16, 32, 64, 128, 256, 512, 1024],
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Ico => write!(f, "ICO"),
            ContainerKind::Icns => write!(f, "ICNS"),
        }
    }
}

/// Packs a directory of `<size>.png` rasters into a single icon container.
pub trait IconPacker: Send + Sync {
    /// Writes `dest_dir/<name>.<ext>` from the rasters in `sizes` and returns
    /// its path.
    fn pack(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        kind: ContainerKind,
        name: &str,
        sizes: &[u32],
        verbose: bool,
    ) -> Result<PathBuf>;
}

// ICO directory entries top out at 256px.
const ICO_SIZES: &[u32] = &[16, 24, 32, 48, 64, 128, 256];

/// (source raster size, ICNS slot). Retina slots reuse the next size up.
const ICNS_ENTRIES: &[(u32, IconType)] = &[
    (16, IconType::RGBA32_16x16),
    (32, IconType::RGBA32_16x16_2x),
    (32, IconType::RGBA32_32x32),
    (64, IconType::RGBA32_32x32_2x),
    (64, IconType::RGBA32_64x64),
    (128, IconType::RGBA32_128x128),
    (256, IconType::RGBA32_128x128_2x),
    (256, IconType::RGBA32_256x256),
    (512, IconType::RGBA32_256x256_2x),
    (512, IconType::RGBA32_512x512),
    (1024, IconType::RGBA32_512x512_2x),
];

/// Encodes containers in-process with the `ico` and `icns` crates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePacker;

impl IconPacker for NativePacker {
    fn pack(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        kind: ContainerKind,
        name: &str,
        sizes: &[u32],
        verbose: bool,
    ) -> Result<PathBuf> {
        let output = dest_dir.join(format!("{name}.{}", kind.extension()));
        let sources = load_sources(source_dir, kind, sizes, &output)?;

        match kind {
            ContainerKind::Ico => write_ico(sources, &output, verbose)?,
            ContainerKind::Icns => write_icns(&sources, &output, verbose)?,
        }

        if verbose {
            println!("{} Created {}", "✓".green(), output.display());
        }
        Ok(output)
    }
}

/// Reads `<size>.png` for every requested size the container can use. Missing
/// files are skipped, but at least one must be present. Files for sizes not
/// requested are never read.
fn load_sources(
    source_dir: &Path,
    kind: ContainerKind,
    sizes: &[u32],
    output: &Path,
) -> Result<BTreeMap<u32, RgbaImage>> {
    let wanted: Vec<u32> = kind
        .source_sizes()
        .iter()
        .copied()
        .filter(|s| sizes.contains(s))
        .collect();
    let mut sources = BTreeMap::new();

    for &size in &wanted {
        let path = raster_path(source_dir, size);
        if !path.is_file() {
            continue;
        }

        let img = image::open(&path)
            .map_err(|e| IconError::packing(output, format!("{}: {e}", path.display())))?
            .into_rgba8();
        if img.dimensions() != (size, size) {
            return Err(IconError::packing(
                output,
                format!(
                    "{} is {}x{}, expected {size}x{size}",
                    path.display(),
                    img.width(),
                    img.height()
                ),
            ));
        }
        sources.insert(size, img);
    }

    if sources.is_empty() {
        return Err(IconError::packing(
            output,
            format!(
                "no source rasters in {} (looked for {})",
                source_dir.display(),
                wanted
                    .iter()
                    .map(|s| format!("{s}.png"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ));
    }

    Ok(sources)
}

fn write_ico(sources: BTreeMap<u32, RgbaImage>, output: &Path, verbose: bool) -> Result<()> {
    let mut dir = IconDir::new(ResourceType::Icon);

    for (size, img) in sources {
        let image = IconImage::from_rgba_data(size, size, img.into_raw());
        let entry = IconDirEntry::encode(&image)
            .map_err(|e| IconError::packing(output, format!("encoding {size}x{size}: {e}")))?;
        dir.add_entry(entry);
        if verbose {
            println!("  + {size}x{size}");
        }
    }

    let mut writer = create_output(output)?;
    dir.write(&mut writer)
        .map_err(|e| IconError::packing(output, e.to_string()))?;
    finish_output(writer, output)
}

fn write_icns(sources: &BTreeMap<u32, RgbaImage>, output: &Path, verbose: bool) -> Result<()> {
    let mut family = IconFamily::new();

    for &(size, icon_type) in ICNS_ENTRIES {
        let Some(img) = sources.get(&size) else {
            continue;
        };

        let image = icns::Image::from_data(PixelFormat::RGBA, size, size, img.as_raw().clone())
            .map_err(|e| IconError::packing(output, format!("reading {size}x{size}: {e}")))?;
        family
            .add_icon_with_type(&image, icon_type)
            .map_err(|e| {
                IconError::packing(output, format!("adding {}: {e}", icon_type.ostype()))
            })?;
        if verbose {
            println!("  + {size}x{size} ({})", icon_type.ostype());
        }
    }

    let mut writer = create_output(output)?;
    family
        .write(&mut writer)
        .map_err(|e| IconError::packing(output, e.to_string()))?;
    finish_output(writer, output)
}

fn create_output(output: &Path) -> Result<BufWriter<File>> {
    File::create(output)
        .map(BufWriter::new)
        .map_err(|e| IconError::packing(output, format!("creating file: {e}")))
}

// Dropping a BufWriter swallows the final write error, so flush explicitly.
fn finish_output(mut writer: BufWriter<File>, output: &Path) -> Result<()> {
    writer
        .flush()
        .map_err(|e| IconError::packing(output, format!("writing file: {e}")))
}
