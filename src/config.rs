use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub camera_index: u32,
    pub request_width: u32,
    pub request_height: u32,
    /// 表示用にリサイズする幅（px）
    pub display_width: u32,
    pub tick_interval_ms: u64,
    /// フレーム読み込み失敗後の再試行間隔
    pub retry_delay_ms: u64,
    pub text_log: PathBuf,
    pub table_log: PathBuf,
    pub beep: bool,
    pub beep_frequency_hz: u32,
    pub beep_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: 0,
            request_width: 1280,
            request_height: 720,
            display_width: 800,
            tick_interval_ms: 10,
            retry_delay_ms: 1000,
            text_log: PathBuf::from("hasil_scan.txt"),
            table_log: PathBuf::from("hasil_scan.csv"),
            beep: true,
            beep_frequency_hz: 1000,
            beep_duration_ms: 200,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("qr-scan").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.display_width == 0 {
            return Err(ScanError::Config("display_width は1以上にしてください".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ScanError::Config("tick_interval_ms は1以上にしてください".into()));
        }
        if self.beep_duration_ms == 0 {
            return Err(ScanError::Config("beep_duration_ms は1以上にしてください".into()));
        }
        if self.text_log == self.table_log {
            return Err(ScanError::Config(
                "text_log と table_log は別のファイルにしてください".into(),
            ));
        }
        Ok(())
    }

    /// 両ログを `dir` 配下に置き直す
    pub fn relocate_logs(&mut self, dir: &Path) {
        let rebase = |path: &Path| match path.file_name() {
            Some(name) => dir.join(name),
            None => dir.to_path_buf(),
        };
        self.text_log = rebase(&self.text_log);
        self.table_log = rebase(&self.table_log);
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn beep_duration(&self) -> Duration {
        Duration::from_millis(self.beep_duration_ms)
    }
}
