mod common;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use icon_bundle::config::{RunConfig, DEFAULT_SIZES};
use icon_bundle::error::IconError;
use icon_bundle::pack::{ContainerKind, IconPacker, NativePacker};
use icon_bundle::pipeline::IconBuildPipeline;
use icon_bundle::raster::raster_path;
use icon_bundle::resize::BicubicResizer;

const SMALL_SIZES: [u32; 4] = [16, 24, 32, 48];

/// Delegates to `NativePacker` but always names the container `other`.
struct MisnamingPacker;

impl IconPacker for MisnamingPacker {
    fn pack(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        kind: ContainerKind,
        _name: &str,
        sizes: &[u32],
        verbose: bool,
    ) -> icon_bundle::error::Result<PathBuf> {
        NativePacker.pack(source_dir, dest_dir, kind, "other", sizes, verbose)
    }
}

fn small_config(input: &Path, output: &Path) -> RunConfig {
    RunConfig {
        sizes: SMALL_SIZES.to_vec(),
        ..RunConfig::new(input, output)
    }
}

fn expected_names(sizes: &[u32]) -> Vec<String> {
    let mut names: Vec<String> = sizes.iter().map(|s| format!("{s}x{s}.png")).collect();
    names.sort();
    names
}

#[tokio::test]
async fn nested_scenario_with_default_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 1024);
    let out = dir.path().join("out");
    let config = RunConfig::new(&input, &out);

    let report = IconBuildPipeline::default().run(&config).await.unwrap();

    let png_dir = out.join("icons").join("png");
    for sub in ["png", "mac", "win"] {
        assert!(out.join("icons").join(sub).is_dir());
    }
    assert_eq!(common::file_names(&png_dir), expected_names(&DEFAULT_SIZES));
    for size in DEFAULT_SIZES {
        let dims = image::image_dimensions(png_dir.join(format!("{size}x{size}.png"))).unwrap();
        assert_eq!(dims, (size, size));
    }

    assert_eq!(report.ico, out.join("icons/win/icon.ico"));
    assert_eq!(report.icns, out.join("icons/mac/icon.icns"));
    assert!(report.ico.is_file());
    assert!(report.icns.is_file());
    assert_eq!(report.rasters.len(), DEFAULT_SIZES.len());

    let ico = ico::IconDir::read(File::open(&report.ico).unwrap()).unwrap();
    assert_eq!(ico.entries().len(), ContainerKind::Ico.source_sizes().len());
    let icns = icns::IconFamily::read(BufReader::new(File::open(&report.icns).unwrap())).unwrap();
    assert_eq!(icns.available_icons().len(), 11);
}

#[tokio::test]
async fn flat_layout_places_containers_in_root() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 64);
    let out = dir.path().join("build");
    let config = RunConfig {
        flat_layout: true,
        ..small_config(&input, &out)
    };

    let report = IconBuildPipeline::default().run(&config).await.unwrap();

    assert_eq!(report.ico, out.join("icon.ico"));
    assert_eq!(report.icns, out.join("icon.icns"));
    assert!(out.join("icon.ico").is_file());
    assert!(out.join("icon.icns").is_file());
    assert!(!out.join("icons").join("png").exists());
    assert_eq!(
        common::file_names(&out.join("icons")),
        expected_names(&SMALL_SIZES)
    );
}

#[tokio::test]
async fn custom_name_and_bleed() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 64);
    let out = dir.path().join("out");
    let config = RunConfig {
        icon_name: "app".to_string(),
        bleed: true,
        verbose: true,
        ..small_config(&input, &out)
    };

    let report = IconBuildPipeline::default().run(&config).await.unwrap();

    assert_eq!(report.ico, out.join("icons/win/app.ico"));
    assert_eq!(report.icns, out.join("icons/mac/app.icns"));
    assert!(report.ico.is_file() && report.icns.is_file());
}

#[tokio::test]
async fn missing_input_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.png");
    let out = dir.path().join("out");

    let err = IconBuildPipeline::default()
        .run(&small_config(&input, &out))
        .await
        .unwrap_err();

    assert!(matches!(err, IconError::MissingInput { ref path } if path == &input));
    assert!(err.to_string().contains("does not exist"));
    assert!(!out.exists());
}

#[tokio::test]
async fn rerun_over_populated_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 64);
    let out = dir.path().join("out");
    let config = small_config(&input, &out);
    let pipeline = IconBuildPipeline::default();

    let first = pipeline.run(&config).await.unwrap();
    let second = pipeline.run(&config).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        common::file_names(&first.layout.png_dir),
        expected_names(&SMALL_SIZES)
    );
}

#[tokio::test]
async fn raster_dimensions_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 64);
    let pipeline = IconBuildPipeline::default();

    let a = pipeline
        .run(&small_config(&input, &dir.path().join("a")))
        .await
        .unwrap();
    let b = pipeline
        .run(&small_config(&input, &dir.path().join("b")))
        .await
        .unwrap();

    let dims = |paths: &[PathBuf]| {
        paths
            .iter()
            .map(|p| image::image_dimensions(p).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(dims(&a.rasters), dims(&b.rasters));
}

#[tokio::test]
async fn packing_after_rename_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 64);
    let out = dir.path().join("out");

    let report = IconBuildPipeline::default()
        .run(&small_config(&input, &out))
        .await
        .unwrap();

    let err = NativePacker
        .pack(
            &report.layout.png_dir,
            &report.layout.win_dir,
            ContainerKind::Ico,
            "again",
            &SMALL_SIZES,
            false,
        )
        .unwrap_err();
    assert!(matches!(err, IconError::Packing { .. }));
}

#[tokio::test]
async fn output_root_parent_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 32);
    let out = dir.path().join("a").join("b");

    let err = IconBuildPipeline::default()
        .run(&small_config(&input, &out))
        .await
        .unwrap_err();

    assert!(matches!(err, IconError::Io { .. }));
}

#[tokio::test]
async fn stale_rasters_are_not_packed() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 64);
    let out = dir.path().join("out");
    let config = RunConfig {
        sizes: vec![16, 32],
        ..RunConfig::new(&input, &out)
    };
    let png_dir = out.join("icons").join("png");
    std::fs::create_dir_all(&png_dir).unwrap();
    common::write_solid(&raster_path(&png_dir, 512), 512);

    let report = IconBuildPipeline::default().run(&config).await.unwrap();

    let icns = icns::IconFamily::read(BufReader::new(File::open(&report.icns).unwrap())).unwrap();
    assert_eq!(icns.available_icons().len(), 3);
    let ico = ico::IconDir::read(File::open(&report.ico).unwrap()).unwrap();
    assert_eq!(ico.entries().len(), 2);
}

#[tokio::test]
async fn packer_output_must_match_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_source(dir.path(), 32);
    let out = dir.path().join("out");

    let err = IconBuildPipeline::new(BicubicResizer, MisnamingPacker)
        .run(&small_config(&input, &out))
        .await
        .unwrap_err();

    let expected = out.join("icons/win/icon.ico");
    assert!(matches!(err, IconError::Packing { ref path, .. } if path == &expected));
    assert!(err.to_string().contains("other.ico"));
}
