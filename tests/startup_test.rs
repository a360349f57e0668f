//! 起動処理のテスト
//!
//! カメラを開けないときはヘッダだけのCSVを残して正常終了する

use std::cell::Cell;

use image::RgbImage;
use qr_scan::camera::FrameSource;
use qr_scan::config::Config;
use qr_scan::error::{Result, ScanError};
use qr_scan::ui;
use tempfile::tempdir;

struct StillCamera;

impl FrameSource for StillCamera {
    fn read_frame(&mut self) -> Result<RgbImage> {
        Ok(RgbImage::new(64, 48))
    }

    fn release(&mut self) {}
}

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        text_log: dir.join("hasil_scan.txt"),
        table_log: dir.join("hasil_scan.csv"),
        beep: false,
        ..Config::default()
    }
}

#[test]
fn test_camera_unavailable_leaves_header_only() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config_in(dir.path());
    let reported = Cell::new(0);

    let started = ui::start(
        &config,
        |_| Err(ScanError::CameraOpen("no device at index 0".into())),
        |err| {
            assert!(matches!(err, ScanError::CameraOpen(_)));
            reported.set(reported.get() + 1);
        },
    )
    .expect("camera failure is not an error");

    assert!(started.is_none());
    assert_eq!(reported.get(), 1);
    assert_eq!(std::fs::read_to_string(&config.table_log).unwrap(), "No,Jenis,Data\n");
    assert!(!config.text_log.exists());
}

#[test]
fn test_camera_available_builds_scanner() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config_in(dir.path());
    let reported = Cell::new(0);

    let started = ui::start(
        &config,
        |_| Ok(Box::new(StillCamera) as Box<dyn FrameSource>),
        |_| reported.set(reported.get() + 1),
    )
    .unwrap();

    let mut scanner = started.expect("scanner should start");
    assert_eq!(reported.get(), 0);
    assert!(!scanner.is_released());
    let report = scanner.tick(std::time::Instant::now()).expect("first tick is due");
    assert!(report.new_entries.is_empty());
    assert!(report.frame.is_some());
}

/// ヘッダを作れない出力先はカメラより先にエラーになる
#[test]
fn test_unwritable_table_log_fails_before_camera() {
    let dir = tempdir().expect("Failed to create temp dir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let config = Config {
        table_log: blocker.join("hasil_scan.csv"),
        ..config_in(dir.path())
    };
    let opened = Cell::new(false);

    let result = ui::start(
        &config,
        |_| {
            opened.set(true);
            Ok(Box::new(StillCamera) as Box<dyn FrameSource>)
        },
        |_| {},
    );

    assert!(result.is_err());
    assert!(!opened.get());
}
