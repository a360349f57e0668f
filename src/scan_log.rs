//! 検出ログのファイル出力
//!
//! テキストログと表形式(CSV)ログの2ファイルに1件ずつ追記する。
//! 書き込みのたびに開いて閉じ、ハンドルは保持しない。
//! 2ファイルは揃って書かれるか、どちらにも書かれないかのどちらか。

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use qr_scan_common::{table_record, text_line, LogEntry, TABLE_HEADER};
use tracing::info;

use crate::error::{Result, ScanError};

#[derive(Debug, Clone)]
pub struct ScanLog {
    text_path: PathBuf,
    table_path: PathBuf,
}

impl ScanLog {
    /// 表形式ログがなければヘッダ行だけのファイルを作る
    pub fn open(text_path: impl Into<PathBuf>, table_path: impl Into<PathBuf>) -> Result<Self> {
        let log = Self {
            text_path: text_path.into(),
            table_path: table_path.into(),
        };
        if !log.table_path.exists() {
            log.write_header()
                .map_err(|e| ScanError::log_write(&log.table_path, e))?;
            info!(path = %log.table_path.display(), "created table log");
        }
        Ok(log)
    }

    pub fn text_path(&self) -> &Path {
        &self.text_path
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    /// 1件を両方のログに追記する
    ///
    /// 表形式ログへの書き込みが失敗した場合はテキストログを書き込み前の長さに戻す
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        let rollback_len =
            file_len(&self.text_path).map_err(|e| ScanError::log_write(&self.text_path, e))?;

        append_text(&self.text_path, entry).map_err(|e| ScanError::log_write(&self.text_path, e))?;

        if let Err(err) = append_table(&self.table_path, entry) {
            let write = ScanError::log_write(&self.table_path, err);
            return Err(match truncate(&self.text_path, rollback_len) {
                Ok(()) => write,
                Err(rollback) => ScanError::LogRollback {
                    path: self.text_path.clone(),
                    write: Box::new(write),
                    rollback,
                },
            });
        }
        Ok(())
    }

    fn write_header(&self) -> Result<()> {
        if let Some(parent) = self.table_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.table_path)?;
        let mut writer = table_writer(file);
        writer.write_record(TABLE_HEADER)?;
        writer.flush()?;
        writer.get_ref().sync_data()?;
        Ok(())
    }
}

fn table_writer(file: File) -> csv::Writer<File> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file)
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn append_text(path: &Path, entry: &LogEntry) -> Result<()> {
    let mut file = open_append(path)?;
    writeln!(file, "{}", text_line(entry))?;
    file.sync_data()?;
    Ok(())
}

fn append_table(path: &Path, entry: &LogEntry) -> Result<()> {
    let mut writer = table_writer(open_append(path)?);
    writer.write_record(table_record(entry))?;
    writer.flush()?;
    writer.get_ref().sync_data()?;
    Ok(())
}

fn file_len(path: &Path) -> std::io::Result<u64> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
        Err(err) => Err(err),
    }
}

fn truncate(path: &Path, len: u64) -> std::io::Result<()> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_len(len)?;
    file.sync_data()
}
