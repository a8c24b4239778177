use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{IconError, Result};

/// Raster sizes written when none are given on the command line.
pub const DEFAULT_SIZES: [u32; 9] = [16, 24, 32, 48, 64, 128, 256, 512, 1024];

pub const DEFAULT_ICON_NAME: &str = "icon";

/// Immutable settings for a single run. Built once from the command line and
/// passed by reference to every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_root: PathBuf,
    /// electron-builder layout: containers next to an `icons/` folder of PNGs.
    pub flat_layout: bool,
    pub verbose: bool,
    pub sizes: Vec<u32>,
    pub icon_name: String,
    pub bleed: bool,
}

impl RunConfig {
    /// Config with the default sizes and name, everything else off.
    pub fn new(input: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_root: output_root.into(),
            flat_layout: false,
            verbose: false,
            sizes: DEFAULT_SIZES.to_vec(),
            icon_name: DEFAULT_ICON_NAME.to_string(),
            bleed: false,
        }
    }

    /// Resolves the CLI paths against `cwd` and validates the result.
    pub fn from_cli(cli: &Cli, cwd: &Path) -> Result<Self> {
        let config = Self {
            input: cwd.join(&cli.input),
            output_root: cwd.join(&cli.output),
            flat_layout: cli.ebuild,
            verbose: cli.verbose,
            sizes: cli.sizes.clone(),
            icon_name: cli.name.clone(),
            bleed: cli.bleed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(IconError::InvalidConfig(
                "at least one size is required".to_string(),
            ));
        }
        if self.sizes.contains(&0) {
            return Err(IconError::InvalidConfig(
                "sizes must be positive".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for size in &self.sizes {
            if !seen.insert(size) {
                return Err(IconError::InvalidConfig(format!(
                    "size {size} is listed more than once"
                )));
            }
        }

        if self.icon_name.is_empty() {
            return Err(IconError::InvalidConfig(
                "icon name must not be empty".to_string(),
            ));
        }
        if self.icon_name.contains(['/', '\\']) {
            return Err(IconError::InvalidConfig(format!(
                "icon name '{}' must not contain a path separator",
                self.icon_name
            )));
        }
        Ok(())
    }
}
