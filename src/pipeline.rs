use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::{IconError, Result};
use crate::layout::{ensure_directories, resolve_layout, OutputLayout};
use crate::pack::{ContainerKind, IconPacker, NativePacker};
use crate::raster::{generate_rasters, normalize_raster_names};
use crate::resize::{BicubicResizer, ImageResizer};

/// Files produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub layout: OutputLayout,
    /// Final `<N>x<N>.png` rasters, in size order.
    pub rasters: Vec<PathBuf>,
    pub ico: PathBuf,
    pub icns: PathBuf,
}

pub struct IconBuildPipeline {
    resizer: Arc<dyn ImageResizer>,
    packer: Arc<dyn IconPacker>,
}

impl Default for IconBuildPipeline {
    fn default() -> Self {
        Self::new(BicubicResizer, NativePacker)
    }
}

impl IconBuildPipeline {
    pub fn new(resizer: impl ImageResizer + 'static, packer: impl IconPacker + 'static) -> Self {
        Self {
            resizer: Arc::new(resizer),
            packer: Arc::new(packer),
        }
    }

    /// Runs every stage in order: input check, directories, rasters, ICO,
    /// ICNS, renames. Stops at the first error and leaves whatever was
    /// already written on disk.
    pub async fn run(&self, config: &RunConfig) -> Result<BuildReport> {
        if !config.input.is_file() {
            return Err(IconError::MissingInput {
                path: config.input.clone(),
            });
        }

        let layout = resolve_layout(config);
        ensure_directories(&[&config.output_root])?;
        ensure_directories(&layout.directories())?;

        generate_rasters(
            Arc::clone(&self.resizer),
            &config.input,
            &layout.png_dir,
            &config.sizes,
            config.bleed,
            config.verbose,
        )
        .await?;

        // Both packers read the bare `<N>.png` names, so renaming waits.
        let ico = self.pack_into(
            &layout.png_dir,
            &layout.win_dir,
            ContainerKind::Ico,
            layout.ico_path(&config.icon_name),
            config,
        )?;
        let icns = self.pack_into(
            &layout.png_dir,
            &layout.mac_dir,
            ContainerKind::Icns,
            layout.icns_path(&config.icon_name),
            config,
        )?;

        let rasters = normalize_raster_names(&layout.png_dir, &config.sizes, config.verbose)?;

        Ok(BuildReport {
            layout,
            rasters,
            ico,
            icns,
        })
    }

    /// Runs the packer and checks it wrote where the layout expects.
    fn pack_into(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        kind: ContainerKind,
        expected: PathBuf,
        config: &RunConfig,
    ) -> Result<PathBuf> {
        let written = self.packer.pack(
            source_dir,
            dest_dir,
            kind,
            &config.icon_name,
            &config.sizes,
            config.verbose,
        )?;
        if written != expected {
            return Err(IconError::Packing {
                path: expected,
                reason: format!("{kind} packer wrote {} instead", written.display()),
            });
        }
        Ok(written)
    }
}
