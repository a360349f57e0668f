//! QR Scan Common Library
//!
//! 検出結果の型、ログ行フォーマット、URL判定

pub mod types;
pub mod format;
pub mod link;

pub use types::{BoundingBox, DetectedCode, LogEntry};
pub use format::{table_record, text_line, TABLE_HEADER};
pub use link::is_web_url;
