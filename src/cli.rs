use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_SIZES;

#[derive(Parser, Debug)]
#[command(
    name = "icon-bundle",
    about = "Generate PNG, ICO and ICNS icons from a single square PNG"
)]
pub struct Cli {
    /// Input PNG file. Recommended (1024x1024)
    #[arg(short, long, default_value = "./icon.png")]
    pub input: PathBuf,

    /// Folder to output new icons folder
    #[arg(short, long, default_value = "./")]
    pub output: PathBuf,

    /// Use electron-builder directory structure
    #[arg(short, long)]
    pub ebuild: bool,

    /// Print detailed output
    #[arg(long)]
    pub verbose: bool,

    /// Raster sizes to generate (comma-separated)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_SIZES.to_vec()
    )]
    pub sizes: Vec<u32>,

    /// Base file name of the generated .ico and .icns files
    #[arg(short, long, default_value = "icon")]
    pub name: String,

    /// Apply alpha bleed to the source before resizing (fixes dark edges)
    #[arg(long)]
    pub bleed: bool,
}
