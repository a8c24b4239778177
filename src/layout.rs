use std::path::{Path, PathBuf};

use crate::config::RunConfig;
use crate::error::{IconError, Result};

/// Where each part of the bundle lands for a given run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub base: PathBuf,
    pub png_dir: PathBuf,
    pub mac_dir: PathBuf,
    pub win_dir: PathBuf,
}

impl OutputLayout {
    /// Directories in creation order. Parents come before the folders nested
    /// under them.
    pub fn directories(&self) -> [&Path; 4] {
        [&self.base, &self.png_dir, &self.mac_dir, &self.win_dir]
    }

    pub fn ico_path(&self, name: &str) -> PathBuf {
        self.win_dir.join(format!("{name}.ico"))
    }

    pub fn icns_path(&self, name: &str) -> PathBuf {
        self.mac_dir.join(format!("{name}.icns"))
    }
}

/// Computes the output layout. Touches nothing on disk.
///
/// Nested: `<root>/icons/{png,mac,win}`.
/// Flat (electron-builder): PNGs in `<root>/icons`, containers in `<root>`.
pub fn resolve_layout(config: &RunConfig) -> OutputLayout {
    if config.flat_layout {
        let base = config.output_root.clone();
        OutputLayout {
            png_dir: base.join("icons"),
            mac_dir: base.clone(),
            win_dir: base.clone(),
            base,
        }
    } else {
        let base = config.output_root.join("icons");
        OutputLayout {
            png_dir: base.join("png"),
            mac_dir: base.join("mac"),
            win_dir: base.join("win"),
            base,
        }
    }
}

/// Creates each missing directory in order. Creation is not recursive, so
/// every parent must appear earlier in `paths` or already exist.
pub fn ensure_directories<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        if path.exists() {
            continue;
        }
        std::fs::create_dir(path).map_err(|e| IconError::io(path, e))?;
    }
    Ok(())
}
