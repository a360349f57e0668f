//! 既定ブラウザでのURL起動

use crate::error::{Result, ScanError};

pub trait LinkOpener {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// OS標準のハンドラで開く。起動したプロセスの終了は待たない
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<()> {
        open::that_detached(url).map_err(|e| ScanError::Browser(format!("{url}: {e}")))
    }
}
