//! メインウィンドウ
//!
//! 起動順: 表形式ログのヘッダ作成 → カメラ初期化 → ウィンドウ表示。
//! カメラを開けない場合はエラーダイアログを出してそのまま終了する。

mod app;
pub mod theme;

pub use app::QrScanApp;

use eframe::egui;
use tracing::{error, info};

use crate::browser::SystemBrowser;
use crate::camera::{FrameSource, NokhwaCamera};
use crate::config::Config;
use crate::decoder::{BarcodeDecoder, ChainDecoder, QrDecoder};
use crate::error::{Result, ScanError};
use crate::notify::{Beeper, Notifier, SilentNotifier};
use crate::scan_log::ScanLog;
use crate::scanner::Scanner;
use crate::session::ScanSession;

pub const WINDOW_TITLE: &str = "Sistem Pendeteksi Barcode & QR Code";

pub fn run(config: Config) -> Result<()> {
    let started = start(&config, open_camera, show_camera_error)?;
    let Some(scanner) = started else {
        return Ok(());
    };

    info!("press ENTER to open the detected link, ESC to quit");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1360.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            theme::apply(&cc.egui_ctx);
            theme::configure_fonts(&cc.egui_ctx);
            Box::new(QrScanApp::new(scanner, Box::new(SystemBrowser)))
        }),
    )
    .map_err(|e| ScanError::Ui(e.to_string()))
}

/// 表形式ログのヘッダを作り、カメラを開いて `Scanner` を組み立てる
///
/// カメラを開けなければ `report_error` を一度呼んで `Ok(None)` を返す。
/// テキストログはこの時点では作らない。
pub fn start(
    config: &Config,
    open_camera: impl FnOnce(&Config) -> Result<Box<dyn FrameSource>>,
    report_error: impl FnOnce(&ScanError),
) -> Result<Option<Scanner>> {
    let log = ScanLog::open(&config.text_log, &config.table_log)?;

    let camera = match open_camera(config) {
        Ok(camera) => camera,
        Err(err) => {
            error!(%err, "cannot open camera");
            report_error(&err);
            return Ok(None);
        }
    };

    let notifier: Box<dyn Notifier> = if config.beep {
        Box::new(Beeper::new(config.beep_frequency_hz, config.beep_duration()))
    } else {
        Box::new(SilentNotifier)
    };
    let decoder = ChainDecoder::new(vec![Box::new(QrDecoder), Box::new(BarcodeDecoder)]);
    Ok(Some(Scanner::new(camera, Box::new(decoder), notifier, ScanSession::new(log), config)))
}

fn open_camera(config: &Config) -> Result<Box<dyn FrameSource>> {
    let camera =
        NokhwaCamera::open(config.camera_index, config.request_width, config.request_height)?;
    Ok(Box::new(camera))
}

fn show_camera_error(err: &ScanError) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Kesalahan Kamera")
        .set_description(format!(
            "Tidak dapat membuka kamera. \
             Pastikan kamera terhubung dan tidak digunakan oleh aplikasi lain.\n\n{err}"
        ))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
