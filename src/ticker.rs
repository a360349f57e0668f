//! キャプチャループのスケジューラ
//!
//! GUIフレームワークのコールバックとは独立に「次のティックはいつか」だけを管理する。

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    retry_delay: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// 最初のティックは即時
    pub fn new(interval: Duration, retry_delay: Duration) -> Self {
        Self {
            interval,
            retry_delay,
            next_due: None,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.map_or(true, |due| now >= due)
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due
            .map_or(Duration::ZERO, |due| due.saturating_duration_since(now))
    }

    pub fn schedule_next(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// 一時的な失敗の後は長めに待つ
    pub fn schedule_retry(&mut self, now: Instant) {
        self.next_due = Some(now + self.retry_delay);
    }
}
