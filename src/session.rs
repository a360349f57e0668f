//! スキャンセッションの状態
//!
//! プロセス存続中の既読ペイロード集合、連番、ログ履歴、
//! 直近の検出とリンク欄の表示内容をまとめて持つ。

use std::collections::HashSet;

use qr_scan_common::{is_web_url, DetectedCode, LogEntry};
use tracing::info;

use crate::browser::LinkOpener;
use crate::error::Result;
use crate::scan_log::ScanLog;

/// 直近に検出されたコード（重複検出でも更新される）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSeen {
    pub kind: String,
    pub text: String,
}

/// Enterキーを押したときの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    Opened(String),
    /// 直近のURLはすでに開いている
    AlreadyOpened(String),
    NotUrl(LastSeen),
    NoData,
}

pub struct ScanSession {
    log: ScanLog,
    seen: HashSet<String>,
    last_seq: u64,
    entries: Vec<LogEntry>,
    last_seen: Option<LastSeen>,
    link_field: String,
    last_opened: Option<String>,
}

impl ScanSession {
    pub fn new(log: ScanLog) -> Self {
        Self {
            log,
            seen: HashSet::new(),
            last_seq: 0,
            entries: Vec::new(),
            last_seen: None,
            link_field: String::new(),
            last_opened: None,
        }
    }

    /// 初めて見るペイロードなら採番してログに追記する
    ///
    /// 書き込みに失敗したペイロードは既読にせず、連番も進めない
    pub fn record_if_new(&mut self, code: &DetectedCode) -> Result<Option<LogEntry>> {
        if self.seen.contains(&code.text) {
            return Ok(None);
        }

        let entry = LogEntry {
            seq: self.last_seq + 1,
            kind: code.kind.clone(),
            data: code.text.clone(),
        };
        self.log.append(&entry)?;

        self.seen.insert(code.text.clone());
        self.last_seq = entry.seq;
        self.entries.push(entry.clone());
        info!(seq = entry.seq, kind = %entry.kind, data = %entry.data, "new code scanned");
        Ok(Some(entry))
    }

    /// 直近の検出を更新する。別のURLを見たら開封済みの記録を消す
    pub fn observe(&mut self, code: &DetectedCode) {
        if is_web_url(&code.text) && self.last_opened.as_deref() != Some(code.text.as_str()) {
            self.last_opened = None;
        }
        self.last_seen = Some(LastSeen {
            kind: code.kind.clone(),
            text: code.text.clone(),
        });
    }

    /// リンク欄を直近のペイロードに合わせる。変化した場合だけ `true`
    pub fn sync_link_field(&mut self) -> bool {
        let current = self.last_seen.as_ref().map(|s| s.text.as_str()).unwrap_or_default();
        if self.link_field == current {
            return false;
        }
        self.link_field = current.to_string();
        true
    }

    pub fn open_link(&mut self, opener: &mut dyn LinkOpener) -> Result<LinkAction> {
        let Some(last) = &self.last_seen else {
            info!("no code scanned yet");
            return Ok(LinkAction::NoData);
        };

        if !is_web_url(&last.text) {
            info!(kind = %last.kind, data = %last.text, "no valid URL to open");
            return Ok(LinkAction::NotUrl(last.clone()));
        }

        if self.last_opened.as_deref() == Some(last.text.as_str()) {
            info!(url = %last.text, "link already opened");
            return Ok(LinkAction::AlreadyOpened(last.text.clone()));
        }

        let url = last.text.clone();
        info!(%url, "opening link");
        opener.open(&url)?;
        self.last_opened = Some(url.clone());
        Ok(LinkAction::Opened(url))
    }

    pub fn link_field(&self) -> &str {
        &self.link_field
    }

    pub fn last_seen(&self) -> Option<&LastSeen> {
        self.last_seen.as_ref()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    pub fn log(&self) -> &ScanLog {
        &self.log
    }
}
