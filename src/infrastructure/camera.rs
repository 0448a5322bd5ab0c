//! Webカメラキャプチャ実装（Infrastructure層）
//!
//! OpenCVのVideoCaptureを使用してCapturePort traitを実装します。
//! 取得したフレームは左右反転（鏡像）してからコアへ渡す。

use opencv::{core, prelude::*, videoio};

use crate::domain::{CaptureConfig, CapturePort, DeviceInfo, DomainError, DomainResult, Frame};

/// OpenCVカメラアダプタ
pub struct OpenCvCameraAdapter {
    capture: videoio::VideoCapture,
    info: DeviceInfo,
}

impl OpenCvCameraAdapter {
    /// カメラを開いてアダプタを作成
    ///
    /// 解像度とフレームレートはベストエフォートで要求する
    /// （デバイスが対応しない場合は実際の値がDeviceInfoに入る）。
    pub fn new(config: &CaptureConfig) -> DomainResult<Self> {
        let mut capture =
            videoio::VideoCapture::new(config.camera_index, videoio::CAP_ANY).map_err(|e| {
                DomainError::Initialization(format!(
                    "Failed to open camera {}: {:?}",
                    config.camera_index, e
                ))
            })?;

        let opened = capture.is_opened().map_err(|e| {
            DomainError::Initialization(format!("Failed to query camera state: {:?}", e))
        })?;
        if !opened {
            return Err(DomainError::Initialization(format!(
                "Camera {} is not available",
                config.camera_index
            )));
        }

        Self::request_prop(
            &mut capture,
            videoio::CAP_PROP_FRAME_WIDTH,
            config.width as f64,
        )?;
        Self::request_prop(
            &mut capture,
            videoio::CAP_PROP_FRAME_HEIGHT,
            config.height as f64,
        )?;
        Self::request_prop(&mut capture, videoio::CAP_PROP_FPS, config.fps as f64)?;

        // デバイスが受理した実際の値を記録
        let actual_width = Self::read_prop(&capture, videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let actual_height = Self::read_prop(&capture, videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        let actual_fps = Self::read_prop(&capture, videoio::CAP_PROP_FPS)? as u32;

        let info = DeviceInfo {
            width: actual_width,
            height: actual_height,
            fps: actual_fps,
            name: format!("Camera {}", config.camera_index),
        };

        tracing::info!(
            "Camera opened: {}x{} @ {}fps",
            info.width,
            info.height,
            info.fps
        );

        Ok(Self { capture, info })
    }

    /// プロパティを要求する（デバイスが拒否してもエラーにはしない）
    fn request_prop(
        capture: &mut videoio::VideoCapture,
        prop: i32,
        value: f64,
    ) -> DomainResult<()> {
        let accepted = capture.set(prop, value).map_err(|e| {
            DomainError::Initialization(format!("Failed to set camera property: {:?}", e))
        })?;
        if !accepted {
            tracing::warn!("Camera rejected property {} = {}", prop, value);
        }
        Ok(())
    }

    fn read_prop(capture: &videoio::VideoCapture, prop: i32) -> DomainResult<f64> {
        capture.get(prop).map_err(|e| {
            DomainError::Initialization(format!("Failed to read camera property: {:?}", e))
        })
    }
}

impl CapturePort for OpenCvCameraAdapter {
    fn capture_frame(&mut self) -> DomainResult<Option<Frame>> {
        let mut raw = core::Mat::default();
        let grabbed = self
            .capture
            .read(&mut raw)
            .map_err(|e| DomainError::Capture(format!("Failed to read frame: {:?}", e)))?;

        if !grabbed || raw.empty() {
            return Ok(None);
        }

        // 左右反転（セルフビュー表示の慣例に合わせる）
        let mut mirrored = core::Mat::default();
        core::flip(&raw, &mut mirrored, 1)
            .map_err(|e| DomainError::Capture(format!("Failed to mirror frame: {:?}", e)))?;

        let width = mirrored.cols() as u32;
        let height = mirrored.rows() as u32;
        let data = mirrored
            .data_bytes()
            .map_err(|e| DomainError::Capture(format!("Failed to export frame data: {:?}", e)))?
            .to_vec();

        Ok(Some(Frame::new(data, width, height)))
    }

    fn device_info(&self) -> DeviceInfo {
        self.info.clone()
    }
}
