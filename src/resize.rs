use image::imageops::FilterType;
use image::DynamicImage;

/// Produces a square copy of a raster at a given edge length.
pub trait ImageResizer: Send + Sync {
    fn resize(&self, source: &DynamicImage, size: u32) -> DynamicImage;
}

/// Bicubic (Catmull-Rom) resampling. Non-square sources are stretched, the
/// way icon rasters are expected to be square already.
#[derive(Debug, Default, Clone, Copy)]
pub struct BicubicResizer;

impl ImageResizer for BicubicResizer {
    fn resize(&self, source: &DynamicImage, size: u32) -> DynamicImage {
        source.resize_exact(size, size, FilterType::CatmullRom)
    }
}
