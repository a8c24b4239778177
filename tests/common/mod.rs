#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Writes a square RGBA test image: a colour gradient inside a transparent
/// black border, saved as `icon.png` in `dir`.
pub fn write_source(dir: &Path, size: u32) -> PathBuf {
    let border = size / 8;
    let img = RgbaImage::from_fn(size, size, |x, y| {
        let inside = x >= border && y >= border && x < size - border && y < size - border;
        if inside {
            Rgba([(x * 255 / size) as u8, (y * 255 / size) as u8, 128, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let path = dir.join("icon.png");
    img.save(&path).unwrap();
    path
}

/// Writes a solid `size`x`size` PNG at `path`.
pub fn write_solid(path: &Path, size: u32) {
    RgbaImage::from_pixel(size, size, Rgba([10, 20, 30, 255]))
        .save(path)
        .unwrap();
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
