//! Image arguments dumped through the logging macros

#![cfg(feature = "image")]

mod common;

use common::Harness;
use image::{Rgb, RgbImage};
use logger_registry::image::{SAVE_DISABLED, SAVE_FAILED};
use logger_registry::{error, info, Image, LogLevel};
use serde_json::json;
use tempfile::TempDir;

fn frame() -> Image {
    Image::from(RgbImage::from_pixel(8, 6, Rgb([0, 128, 255])))
}

#[test]
fn test_threshold_controls_dumping() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let harness = Harness::new();
    let results = harness.registry.apply_document(&json!({
        "name": "cam",
        "level": 0,
        "log_img": 4,
        "img_path": dir.path()
    }));
    assert!(results[0].is_ok());
    let logger = harness.registry.get_logger("cam");

    info!(logger, "frame {}", frame());
    error!(logger, "frame {}", frame());
    error!(logger, "frame {}", frame());

    let lines = harness.stdout.lines_for("cam");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("cam|info|frame {}", SAVE_DISABLED));

    let first = dir.path().join("cam").join("E").join("0.png");
    let second = dir.path().join("cam").join("E").join("1.png");
    assert_eq!(lines[1], format!("cam|error|frame Image(8x6){{{}}}", first.display()));
    assert_eq!(lines[2], format!("cam|error|frame Image(8x6){{{}}}", second.display()));
    assert!(first.is_file());
    assert!(second.is_file());
    assert!(!dir.path().join("cam").join("I").exists());

    let saved = image::open(&first).expect("decodable png").to_rgb8();
    assert_eq!(saved.dimensions(), (8, 6));
    assert_eq!(saved.get_pixel(3, 2), &Rgb([0, 128, 255]));
}

#[test]
fn test_disabled_record_never_touches_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let harness = Harness::new();
    let logger = harness.registry.get_logger("cam.off");
    logger.set_path(dir.path());
    logger.set_level(LogLevel::Error);

    info!(logger, "frame {}", frame());

    assert!(harness.stdout.records_for("cam.off").is_empty());
    assert!(std::fs::read_dir(dir.path()).expect("dir").next().is_none());
}

#[test]
fn test_default_logger_uses_default_folder() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let harness = Harness::new();
    let logger = harness.registry.default_logger();
    logger.set_path(dir.path());

    info!(logger, "{}", frame());

    assert!(dir.path().join("default").join("I").join("0.png").is_file());
}

#[test]
fn test_write_failure_becomes_placeholder() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = dir.path().join("plain_file");
    std::fs::write(&blocker, b"not a directory").expect("write");

    let harness = Harness::new();
    let logger = harness.registry.get_logger("cam.broken");
    logger.set_path(&blocker);

    error!(logger, "frame {}", frame());

    assert_eq!(
        harness.stdout.lines_for("cam.broken"),
        vec![format!("cam.broken|error|frame {}", SAVE_FAILED)]
    );
}

#[test]
fn test_numbering_survives_registry_clear() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let harness = Harness::new();

    let logger = harness.registry.get_logger("cam.reset");
    logger.set_path(dir.path());
    error!(logger, "frame {}", frame());

    harness.registry.clear();
    let logger = harness.registry.get_logger("cam.reset");
    logger.set_path(dir.path());
    error!(logger, "frame {}", frame());

    let folder = dir.path().join("cam.reset").join("E");
    assert!(folder.join("0.png").is_file());
    assert!(folder.join("1.png").is_file());
    assert_eq!(std::fs::read_dir(&folder).expect("dir").count(), 2);
}
