//! バーコード・QRコードのデコーダ
//!
//! QRは `rqrr`、1次元バーコードと他の2次元コードは `rxing` に任せ、
//! 結果を `DetectedCode` に詰め替える。種別タグはログ互換の表記
//! (`QRCODE`, `EAN13`, `CODE128` ...) にそろえる。

use std::collections::HashSet;

use image::RgbImage;
use rxing::{BarcodeFormat, Exceptions};
use qr_scan_common::{BoundingBox, DetectedCode};
use tracing::debug;

use crate::error::{Result, ScanError};

/// QRコードの種別タグ
pub const QR_KIND: &str = "QRCODE";

pub trait Decoder {
    fn decode(&mut self, frame: &RgbImage) -> Result<Vec<DetectedCode>>;
}

#[derive(Debug, Default)]
pub struct QrDecoder;

impl Decoder for QrDecoder {
    fn decode(&mut self, frame: &RgbImage) -> Result<Vec<DetectedCode>> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(ScanError::Decode(format!("empty frame ({width}x{height})")));
        }

        let luma = image::imageops::grayscale(frame);
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
                luma.get_pixel(x as u32, y as u32)[0]
            });

        let mut codes = Vec::new();
        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_meta, content)) => {
                    let corners: Vec<(i32, i32)> = grid.bounds.iter().map(|p| (p.x, p.y)).collect();
                    let bbox = BoundingBox::enclosing(&corners).unwrap_or_default();
                    codes.push(DetectedCode::new(QR_KIND, content, bbox));
                }
                Err(err) => debug!(%err, "grid found but not decodable"),
            }
        }
        Ok(codes)
    }
}

/// `rxing` の複数検出で、フレーム内のバーコードをまとめて読む
#[derive(Debug, Default)]
pub struct BarcodeDecoder;

impl Decoder for BarcodeDecoder {
    fn decode(&mut self, frame: &RgbImage) -> Result<Vec<DetectedCode>> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(ScanError::Decode(format!("empty frame ({width}x{height})")));
        }

        let luma = image::imageops::grayscale(frame).into_raw();
        let results = match rxing::helpers::detect_multiple_in_luma(luma, width, height) {
            Ok(results) => results,
            Err(Exceptions::NotFoundException(_)) => return Ok(Vec::new()),
            Err(err) => return Err(ScanError::Decode(err.to_string())),
        };

        Ok(results
            .iter()
            .map(|result| {
                let corners: Vec<(i32, i32)> = result
                    .getPoints()
                    .iter()
                    .map(|p| (p.x.round() as i32, p.y.round() as i32))
                    .collect();
                let bbox = BoundingBox::enclosing(&corners).unwrap_or_default();
                DetectedCode::new(kind_name(result.getBarcodeFormat()), result.getText(), bbox)
            })
            .collect())
    }
}

/// 種別タグ。ログに残す名前なので区切り記号を含まない形にする
pub fn kind_name(format: &BarcodeFormat) -> String {
    let name = match format {
        BarcodeFormat::QR_CODE => QR_KIND,
        BarcodeFormat::EAN_13 => "EAN13",
        BarcodeFormat::EAN_8 => "EAN8",
        BarcodeFormat::UPC_A => "UPCA",
        BarcodeFormat::UPC_E => "UPCE",
        BarcodeFormat::CODE_128 => "CODE128",
        BarcodeFormat::CODE_39 => "CODE39",
        BarcodeFormat::CODE_93 => "CODE93",
        BarcodeFormat::CODABAR => "CODABAR",
        BarcodeFormat::ITF => "I25",
        BarcodeFormat::PDF_417 => "PDF417",
        BarcodeFormat::DATA_MATRIX => "DATAMATRIX",
        BarcodeFormat::AZTEC => "AZTEC",
        other => return format!("{other:?}").replace('_', ""),
    };
    name.to_string()
}

/// 複数のデコーダを順に試す。同じペイロードは先のデコーダの結果を残す
pub struct ChainDecoder {
    decoders: Vec<Box<dyn Decoder>>,
}

impl ChainDecoder {
    pub fn new(decoders: Vec<Box<dyn Decoder>>) -> Self {
        Self { decoders }
    }
}

impl Decoder for ChainDecoder {
    /// すべてのデコーダが失敗したときだけエラーを返す
    fn decode(&mut self, frame: &RgbImage) -> Result<Vec<DetectedCode>> {
        let mut codes = Vec::new();
        let mut texts = HashSet::new();
        let mut last_err = None;
        let mut any_ok = false;

        for decoder in &mut self.decoders {
            match decoder.decode(frame) {
                Ok(found) => {
                    any_ok = true;
                    for code in found {
                        if texts.insert(code.text.clone()) {
                            codes.push(code);
                        }
                    }
                }
                Err(err) => {
                    debug!(%err, "decoder failed");
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) if !any_ok => Err(err),
            _ => Ok(codes),
        }
    }
}
