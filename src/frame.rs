//! フレームの前処理

use image::imageops::{self, FilterType};
use image::RgbImage;

/// アスペクト比を保って幅 `width` にリサイズ
pub fn resize_to_width(frame: &RgbImage, width: u32) -> RgbImage {
    let (src_w, src_h) = frame.dimensions();
    if src_w == 0 || src_h == 0 || src_w == width || width == 0 {
        return frame.clone();
    }
    let (src_w, src_h) = (u64::from(src_w), u64::from(src_h));
    let height = ((src_h * u64::from(width) + src_w / 2) / src_w).max(1);
    imageops::resize(frame, width, height as u32, FilterType::Triangle)
}
