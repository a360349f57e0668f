//! URL判定
//!
//! Enterキーで開けるのは `http://` / `https://` の整形式URLのみ

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WEB_URL: Regex = Regex::new(r"^https?://[^\s/?#]+[^\s]*$").unwrap();
}

/// ブラウザで開いてよいペイロードか
pub fn is_web_url(payload: &str) -> bool {
    WEB_URL.is_match(payload)
}
