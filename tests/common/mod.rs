//! 統合テスト用のハーネス
//!
//! カメラ・デコーダ・通知・ブラウザをスクリプト化した実装に差し替え、
//! 実機なしでキャプチャループを回す。

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use image::RgbImage;
use qr_scan::browser::LinkOpener;
use qr_scan::camera::FrameSource;
use qr_scan::config::Config;
use qr_scan::decoder::Decoder;
use qr_scan::error::{Result, ScanError};
use qr_scan::notify::Notifier;
use qr_scan::scan_log::ScanLog;
use qr_scan::scanner::{Scanner, TickReport};
use qr_scan::session::ScanSession;
use qr_scan_common::{BoundingBox, DetectedCode, LogEntry};
use tempfile::TempDir;

/// 1ティック分の台本
#[derive(Debug, Clone)]
pub enum Step {
    Frame(Vec<&'static str>),
    ReadError,
    DecodeError,
}

type Script = Rc<RefCell<VecDeque<Step>>>;

struct ScriptedSource {
    script: Script,
    releases: Rc<Cell<usize>>,
}

impl FrameSource for ScriptedSource {
    fn read_frame(&mut self) -> Result<RgbImage> {
        let mut script = self.script.borrow_mut();
        let next = script.front().cloned();
        match next {
            None => Err(ScanError::CameraRead("script exhausted".into())),
            Some(Step::ReadError) => {
                script.pop_front();
                Err(ScanError::CameraRead("device busy".into()))
            }
            Some(_) => Ok(RgbImage::new(160, 90)),
        }
    }

    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }
}

struct ScriptedDecoder {
    script: Script,
}

impl Decoder for ScriptedDecoder {
    fn decode(&mut self, _frame: &RgbImage) -> Result<Vec<DetectedCode>> {
        match self.script.borrow_mut().pop_front() {
            Some(Step::Frame(payloads)) => Ok(payloads
                .into_iter()
                .enumerate()
                .map(|(i, text)| {
                    let bbox = BoundingBox::new(10 * i as i32, 10, 20, 20);
                    DetectedCode::new("QRCODE", text, bbox)
                })
                .collect()),
            _ => Err(ScanError::Decode("unreadable frame".into())),
        }
    }
}

struct CountingNotifier {
    count: Rc<Cell<usize>>,
}

impl Notifier for CountingNotifier {
    fn notify(&mut self) -> Result<()> {
        self.count.set(self.count.get() + 1);
        Ok(())
    }
}

/// 開いたURLを記録する。`fail` が立っていれば起動失敗を返す
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Vec<String>,
    pub fail: bool,
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        if self.fail {
            return Err(ScanError::Browser(format!("{url}: no handler")));
        }
        self.opened.push(url.to_string());
        Ok(())
    }
}

pub struct ScanHarness {
    pub dir: TempDir,
    pub scanner: Scanner,
    pub script: Script,
    pub beeps: Rc<Cell<usize>>,
    pub releases: Rc<Cell<usize>>,
    pub now: Instant,
}

impl ScanHarness {
    pub fn new(steps: Vec<Step>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config {
            display_width: 80,
            text_log: dir.path().join("hasil_scan.txt"),
            table_log: dir.path().join("hasil_scan.csv"),
            ..Config::default()
        };
        let log = ScanLog::open(&config.text_log, &config.table_log).expect("open log");

        let script: Script = Rc::new(RefCell::new(steps.into()));
        let beeps = Rc::new(Cell::new(0));
        let releases = Rc::new(Cell::new(0));
        let scanner = Scanner::new(
            Box::new(ScriptedSource { script: script.clone(), releases: releases.clone() }),
            Box::new(ScriptedDecoder { script: script.clone() }),
            Box::new(CountingNotifier { count: beeps.clone() }),
            ScanSession::new(log),
            &config,
        );

        Self {
            dir,
            scanner,
            script,
            beeps,
            releases,
            now: Instant::now(),
        }
    }

    /// 次のティック時刻まで時計を進めて1ティック回す
    pub fn tick(&mut self) -> TickReport {
        self.now += self.scanner.time_until_next_tick(self.now);
        self.scanner.tick(self.now).expect("tick should be due")
    }

    /// ティックせずに時計だけ進める
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// 台本を使い切るまで回す
    pub fn run_all(&mut self) -> Vec<TickReport> {
        let mut reports = Vec::new();
        while !self.script.borrow().is_empty() {
            reports.push(self.tick());
        }
        reports
    }

    pub fn text_log(&self) -> PathBuf {
        self.dir.path().join("hasil_scan.txt")
    }

    pub fn table_log(&self) -> PathBuf {
        self.dir.path().join("hasil_scan.csv")
    }

    pub fn read_text_log(&self) -> String {
        std::fs::read_to_string(self.text_log()).unwrap_or_default()
    }

    pub fn read_table_log(&self) -> String {
        std::fs::read_to_string(self.table_log()).expect("table log exists")
    }
}

/// テキストログ1行 `{seq}. [{type}] {text}` を読み戻す
pub fn parse_text_line(line: &str) -> Option<LogEntry> {
    let (seq, rest) = line.split_once(". [")?;
    let seq = seq.trim().parse().ok()?;
    let (kind, data) = rest.split_once("] ")?;
    Some(LogEntry {
        seq,
        kind: kind.to_string(),
        data: data.to_string(),
    })
}
