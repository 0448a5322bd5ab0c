/// モックキャプチャアダプタ
///
/// カメラなし環境での開発・デモ用のキャプチャ実装。
/// 単色の合成フレームを設定されたフレームレートで生成する。

use std::time::Duration;

use crate::domain::{CaptureConfig, CapturePort, DeviceInfo, DomainResult, Frame};

/// 合成フレームの背景輝度（BGR共通）
const BACKGROUND_LEVEL: u8 = 40;

/// 合成キャプチャアダプタ
pub struct SyntheticCaptureAdapter {
    width: u32,
    height: u32,
    fps: u32,
    frame_interval: Duration,
}

impl SyntheticCaptureAdapter {
    /// 新しい合成キャプチャアダプタを作成
    pub fn new(config: &CaptureConfig) -> Self {
        let fps = config.fps.max(1);
        Self {
            width: config.width,
            height: config.height,
            fps,
            frame_interval: Duration::from_millis(1000 / fps as u64),
        }
    }
}

impl CapturePort for SyntheticCaptureAdapter {
    fn capture_frame(&mut self) -> DomainResult<Option<Frame>> {
        // 実カメラのフレーム間隔を模擬
        std::thread::sleep(self.frame_interval);

        let data = vec![BACKGROUND_LEVEL; (self.width * self.height * 3) as usize];
        Ok(Some(Frame::new(data, self.width, self.height)))
    }

    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            width: self.width,
            height: self.height,
            fps: self.fps,
            name: "Synthetic".to_string(),
        }
    }
}
