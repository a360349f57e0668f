use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("カメラを開けません: {0}")]
    CameraOpen(String),

    #[error("フレーム読み込みエラー: {0}")]
    CameraRead(String),

    #[error("デコードエラー: {0}")]
    Decode(String),

    #[error("ログ書き込みエラー ({}): {source}", .path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: Box<ScanError>,
    },

    #[error("ログの巻き戻しに失敗 ({}): {write}; rollback: {rollback}", .path.display())]
    LogRollback {
        path: PathBuf,
        write: Box<ScanError>,
        rollback: std::io::Error,
    },

    #[error("通知音エラー: {0}")]
    Audio(String),

    #[error("ブラウザ起動エラー: {0}")]
    Browser(String),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("GUIエラー: {0}")]
    Ui(String),
}

impl ScanError {
    /// 書き込み失敗をファイルパス付きで包む
    pub fn log_write(path: impl Into<PathBuf>, source: impl Into<ScanError>) -> Self {
        ScanError::LogWrite {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }

    /// ステータスバーに出す文言。ログだけで済むエラーは `None`
    ///
    /// 読み込み・デコード・通知音の失敗は毎フレーム起こりうるので画面には出さない
    pub fn status_message(&self) -> Option<String> {
        match self {
            ScanError::LogWrite { .. } | ScanError::LogRollback { .. } => {
                Some(format!("Save failed: {self}"))
            }
            ScanError::Browser(_) => Some(format!("Open failed: {self}")),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
