//! 検出枠の描画
//!
//! 枠はフレームのピクセルに直接描き、ラベル文字列は位置だけ返して
//! GUI側でテキストとして重ねる。

use image::{Rgb, RgbImage};
use qr_scan_common::DetectedCode;

pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const BOX_THICKNESS: u32 = 2;
/// 枠の上端からラベルの下端までの距離
pub const LABEL_OFFSET: u32 = 10;
/// ラベルがフレーム上端からはみ出さないための最小y
pub const LABEL_MIN_Y: u32 = 16;

/// 枠の上に描くラベル。(x, y) はテキストの左下
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub x: u32,
    pub y: u32,
}

pub fn annotate(frame: &mut RgbImage, codes: &[DetectedCode]) -> Vec<Label> {
    let (width, height) = frame.dimensions();
    let mut labels = Vec::with_capacity(codes.len());

    for code in codes {
        let Some((x0, y0, x1, y1)) = code.bbox.clamp_to(width, height) else {
            continue;
        };
        for inset in 0..BOX_THICKNESS {
            // 枠が細すぎる場合は内側に潰れたところで止める
            if x0 + inset > x1.saturating_sub(inset) || y0 + inset > y1.saturating_sub(inset) {
                break;
            }
            draw_hollow_rect(frame, x0 + inset, y0 + inset, x1 - inset, y1 - inset);
        }
        labels.push(Label {
            text: code.label(),
            x: x0,
            y: y0.saturating_sub(LABEL_OFFSET).max(LABEL_MIN_Y.min(height)),
        });
    }
    labels
}

fn draw_hollow_rect(frame: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    for x in x0..=x1 {
        frame.put_pixel(x, y0, BOX_COLOR);
        frame.put_pixel(x, y1, BOX_COLOR);
    }
    for y in y0..=y1 {
        frame.put_pixel(x0, y, BOX_COLOR);
        frame.put_pixel(x1, y, BOX_COLOR);
    }
}
