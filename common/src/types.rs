//! スキャン結果の型定義
//!
//! - BoundingBox / DetectedCode: フレームごとの検出結果（永続化しない）
//! - LogEntry: 新規ペイロードごとに一度だけ作られるログ行

use serde::{Deserialize, Serialize};

/// 画像座標系の矩形（左上原点）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// 点群を囲む軸平行の矩形
    pub fn enclosing(points: &[(i32, i32)]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut min_x, mut min_y) = *first;
        let (mut max_x, mut max_y) = *first;
        for &(x, y) in rest {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: (max_x - min_x).unsigned_abs(),
            height: (max_y - min_y).unsigned_abs(),
        })
    }

    /// フレーム内に収まる範囲 `(x0, y0, x1, y1)`（x1/y1 は含む）
    ///
    /// 完全にフレーム外なら `None`
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Option<(u32, u32, u32, u32)> {
        if frame_width == 0 || frame_height == 0 {
            return None;
        }
        let left = i64::from(self.x);
        let top = i64::from(self.y);
        let right = left + i64::from(self.width);
        let bottom = top + i64::from(self.height);
        let max_x = i64::from(frame_width) - 1;
        let max_y = i64::from(frame_height) - 1;

        if right < 0 || bottom < 0 || left > max_x || top > max_y {
            return None;
        }
        Some((
            left.clamp(0, max_x) as u32,
            top.clamp(0, max_y) as u32,
            right.clamp(0, max_x) as u32,
            bottom.clamp(0, max_y) as u32,
        ))
    }
}

/// 1フレームで検出されたコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedCode {
    /// 種別タグ（例: `QRCODE`）
    pub kind: String,
    /// デコードされたペイロード
    pub text: String,
    pub bbox: BoundingBox,
}

impl DetectedCode {
    pub fn new(kind: impl Into<String>, text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            bbox,
        }
    }

    /// 画面に描くラベル `{type}: {text}`
    pub fn label(&self) -> String {
        format!("{}: {}", self.kind, self.text)
    }
}

/// ログ1行分。作成後は変更しない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1から始まる連番
    pub seq: u64,
    pub kind: String,
    pub data: String,
}
