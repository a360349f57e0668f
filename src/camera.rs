//! カメラ入力
//!
//! `FrameSource` はキャプチャループが所有する唯一のカメラハンドル。
//! 起動時に一度だけ開き、終了時に一度だけ解放する。

use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;
use tracing::{info, warn};

use crate::error::{Result, ScanError};

pub trait FrameSource {
    /// 次のフレームを1枚読む
    fn read_frame(&mut self) -> Result<RgbImage>;

    /// ハンドルを解放する。二回目以降は何もしない
    fn release(&mut self);
}

pub struct NokhwaCamera {
    camera: Option<Camera>,
}

impl NokhwaCamera {
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(Resolution::new(width, height), FrameFormat::MJPEG, 30),
        ));
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| ScanError::CameraOpen(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| ScanError::CameraOpen(e.to_string()))?;

        let resolution = camera.resolution();
        info!(
            camera = %camera.info().human_name(),
            width = resolution.width(),
            height = resolution.height(),
            "camera initialised"
        );
        Ok(Self {
            camera: Some(camera),
        })
    }
}

impl FrameSource for NokhwaCamera {
    fn read_frame(&mut self) -> Result<RgbImage> {
        let camera = self
            .camera
            .as_mut()
            .ok_or_else(|| ScanError::CameraRead("camera already released".into()))?;
        let buffer = camera
            .frame()
            .map_err(|e| ScanError::CameraRead(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| ScanError::CameraRead(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        RgbImage::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| ScanError::CameraRead(format!("short frame buffer ({width}x{height})")))
    }

    fn release(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(err) = camera.stop_stream() {
                warn!(%err, "failed to stop camera stream");
            }
            info!("camera released");
        }
    }
}

impl Drop for NokhwaCamera {
    fn drop(&mut self) {
        self.release();
    }
}
