//! 新規検出時の通知音
//!
//! 再生は使い捨てスレッドで行い、呼び出し側は待たない。
//! 音声デバイスがない場合も警告ログを出すだけで処理は続く。

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use tracing::warn;

use crate::error::{Result, ScanError};

pub trait Notifier {
    fn notify(&mut self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct Beeper {
    frequency_hz: f32,
    duration: Duration,
}

impl Beeper {
    pub fn new(frequency_hz: u32, duration: Duration) -> Self {
        Self {
            frequency_hz: frequency_hz as f32,
            duration,
        }
    }
}

impl Notifier for Beeper {
    fn notify(&mut self) -> Result<()> {
        let (frequency_hz, duration) = (self.frequency_hz, self.duration);
        std::thread::Builder::new()
            .name("beep".into())
            .spawn(move || {
                if let Err(err) = play_tone(frequency_hz, duration) {
                    warn!(%err, "failed to play beep");
                }
            })
            .map_err(|e| ScanError::Audio(e.to_string()))?;
        Ok(())
    }
}

fn play_tone(frequency_hz: f32, duration: Duration) -> Result<()> {
    let (_stream, handle) =
        OutputStream::try_default().map_err(|e| ScanError::Audio(e.to_string()))?;
    let sink = Sink::try_new(&handle).map_err(|e| ScanError::Audio(e.to_string()))?;
    sink.append(SineWave::new(frequency_hz).take_duration(duration).amplify(0.25));
    sink.sleep_until_end();
    Ok(())
}

/// `--no-beep` 用
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self) -> Result<()> {
        Ok(())
    }
}
