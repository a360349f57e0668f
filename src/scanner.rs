//! 1ティック分のキャプチャ処理
//!
//! フレーム読み込み → リサイズ → デコード → 新規ペイロードの記録と通知
//! → 枠描画 → リンク欄の同期。エラーはすべてここで分類し、ループは止めない。

use std::collections::HashMap;
use std::time::{Duration, Instant};

use image::RgbImage;
use qr_scan_common::{DetectedCode, LogEntry};
use tracing::{debug, info, warn};

use crate::annotate::{annotate, Label};
use crate::browser::LinkOpener;
use crate::camera::FrameSource;
use crate::config::Config;
use crate::decoder::Decoder;
use crate::error::{Result, ScanError};
use crate::frame::resize_to_width;
use crate::notify::Notifier;
use crate::session::{LinkAction, ScanSession};
use crate::ticker::Ticker;

/// 表示用に加工済みのフレーム
#[derive(Debug, Clone)]
pub struct ProcessedFrame {
    pub image: RgbImage,
    pub labels: Vec<Label>,
}

#[derive(Debug, Default)]
pub struct TickReport {
    /// フレームを読めなかったティックでは `None`
    pub frame: Option<ProcessedFrame>,
    pub new_entries: Vec<LogEntry>,
    pub link_changed: bool,
    pub errors: Vec<ScanError>,
}

impl TickReport {
    /// ステータスバー用の一行。保存失敗は同じティックの保存成功より優先する
    pub fn status_line(&self) -> Option<String> {
        self.errors
            .iter()
            .find_map(ScanError::status_message)
            .or_else(|| {
                self.new_entries
                    .last()
                    .map(|entry| format!("Saved #{} [{}]", entry.seq, entry.kind))
            })
    }
}

pub struct Scanner {
    source: Box<dyn FrameSource>,
    decoder: Box<dyn Decoder>,
    notifier: Box<dyn Notifier>,
    session: ScanSession,
    ticker: Ticker,
    display_width: u32,
    /// 書き込みに失敗したペイロードと、次に書き込みを試してよい時刻
    write_backoff: HashMap<String, Instant>,
    retry_delay: Duration,
    released: bool,
}

impl Scanner {
    pub fn new(
        source: Box<dyn FrameSource>,
        decoder: Box<dyn Decoder>,
        notifier: Box<dyn Notifier>,
        session: ScanSession,
        config: &Config,
    ) -> Self {
        Self {
            source,
            decoder,
            notifier,
            session,
            ticker: Ticker::new(config.tick_interval(), config.retry_delay()),
            display_width: config.display_width,
            write_backoff: HashMap::new(),
            retry_delay: config.retry_delay(),
            released: false,
        }
    }

    /// ティックの時刻でなければ `None`
    pub fn tick(&mut self, now: Instant) -> Option<TickReport> {
        if self.released || !self.ticker.is_due(now) {
            return None;
        }
        let mut report = TickReport::default();

        let raw = match self.source.read_frame() {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "failed to read frame, retrying");
                self.ticker.schedule_retry(now);
                report.errors.push(err);
                return Some(report);
            }
        };
        let mut image = resize_to_width(&raw, self.display_width);

        let labels = match self.decoder.decode(&image) {
            Ok(codes) => {
                for code in &codes {
                    self.record(code, now, &mut report);
                    self.session.observe(code);
                }
                annotate(&mut image, &codes)
            }
            Err(err) => {
                debug!(%err, "decode failed, skipping frame");
                report.errors.push(err);
                Vec::new()
            }
        };

        report.link_changed = self.session.sync_link_field();
        report.frame = Some(ProcessedFrame { image, labels });
        self.ticker.schedule_next(now);
        Some(report)
    }

    /// 新規ペイロードを記録して通知する。書き込み失敗後は待機時間が過ぎるまで試さない
    fn record(&mut self, code: &DetectedCode, now: Instant, report: &mut TickReport) {
        if self.write_backoff.get(&code.text).is_some_and(|until| now < *until) {
            return;
        }
        match self.session.record_if_new(code) {
            Ok(Some(entry)) => {
                self.write_backoff.remove(&code.text);
                if let Err(err) = self.notifier.notify() {
                    warn!(%err, "notification failed");
                }
                report.new_entries.push(entry);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%err, data = %code.text, "failed to record code");
                self.write_backoff.insert(code.text.clone(), now + self.retry_delay);
                report.errors.push(err);
            }
        }
    }

    pub fn time_until_next_tick(&self, now: Instant) -> Duration {
        self.ticker.time_until_due(now)
    }

    pub fn open_link(&mut self, opener: &mut dyn LinkOpener) -> Result<LinkAction> {
        self.session.open_link(opener)
    }

    /// カメラを解放する。二回目以降は何もしない
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        self.source.release();
        self.released = true;
        info!(
            unique = self.session.unique_count(),
            text_log = %self.session.log().text_path().display(),
            table_log = %self.session.log().table_path().display(),
            "scanner stopped"
        );
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }
}
