//! ログファイルの行フォーマット
//!
//! - テキストログ: `{seq}. [{type}] {text}`
//! - 表形式ログ: ヘッダ `No,Jenis,Data` + `{seq},{type},{text}`

use crate::types::LogEntry;

/// 表形式ログのヘッダ行
pub const TABLE_HEADER: [&str; 3] = ["No", "Jenis", "Data"];

/// テキストログ1行（改行なし）
pub fn text_line(entry: &LogEntry) -> String {
    format!("{}. [{}] {}", entry.seq, entry.kind, entry.data)
}

/// 表形式ログ1行のフィールド
pub fn table_record(entry: &LogEntry) -> [String; 3] {
    [entry.seq.to_string(), entry.kind.clone(), entry.data.clone()]
}
