mod application;
mod domain;
mod infrastructure;
mod logging;

use crate::application::frame_loop::FrameLoop;
use crate::domain::config::{AppConfig, CaptureSource};
use crate::domain::ports::CapturePort; // traitメソッド使用のため
use crate::infrastructure::camera::OpenCvCameraAdapter;
use crate::infrastructure::mock_capture::SyntheticCaptureAdapter;
use crate::infrastructure::mock_signals::{MockAnchorAdapter, MockGestureAdapter};
use crate::infrastructure::overlay::OpenCvOverlayAdapter;
use crate::logging::init_logging;
use std::path::PathBuf;

fn main() {
    // ログシステムの初期化（Debugビルドでは非同期ファイル出力）
    let log_dir = PathBuf::from("logs");
    let _guard = init_logging("info", false, Some(log_dir));
    // 注意: _guardはmain終了まで保持する必要がある（Dropでログスレッドが終了）

    tracing::info!("BadGuyDetector starting...");

    match run() {
        Ok(_) => {
            tracing::info!("BadGuyDetector terminated gracefully.");
        }
        Err(e) => {
            tracing::error!("Fatal error: {:?}", e);
            std::process::exit(1);
        }
    }
}

/// アプリケーションのメイン処理
fn run() -> Result<(), Box<dyn std::error::Error>> {
    // 設定ファイルの読み込み（存在しない場合はデフォルト設定を使用）
    let config = match AppConfig::from_file("config.toml") {
        Ok(config) => {
            tracing::info!("Loaded configuration from config.toml");
            config
        }
        Err(e) => {
            tracing::warn!("Failed to load config.toml: {:?}, using defaults", e);
            AppConfig::default()
        }
    };

    // 設定の検証
    config.validate()?;

    tracing::info!("Configuration validated successfully");
    tracing::info!(
        "Capture: source={:?}, {}x{} @ {}fps",
        config.capture.source,
        config.capture.width,
        config.capture.height,
        config.capture.fps
    );
    tracing::info!(
        "Reticle: size {}→{}, lock after {}ms, stabilizer window {}",
        config.reticle.initial_size,
        config.reticle.min_size,
        config.reticle.lock_threshold_ms,
        config.stabilizer.window_size
    );

    match config.capture.source {
        CaptureSource::Camera => {
            tracing::info!("Initializing OpenCV camera adapter...");
            let capture = OpenCvCameraAdapter::new(&config.capture)?;
            run_with_capture(capture, &config)
        }
        CaptureSource::Synthetic => {
            tracing::info!("Initializing synthetic capture adapter (no camera)...");
            let capture = SyntheticCaptureAdapter::new(&config.capture);
            run_with_capture(capture, &config)
        }
    }
}

/// 選択されたキャプチャソースでフレームループを起動
fn run_with_capture<C: CapturePort>(
    capture: C,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let device_info = capture.device_info();
    tracing::info!(
        "Capture ready: {}x{} @ {}fps - {}",
        device_info.width,
        device_info.height,
        device_info.fps,
        device_info.name
    );

    // ランドマークモデル未統合のため、信号プロバイダはモックを注入
    tracing::info!("Initializing mock gesture/anchor providers...");
    let gestures = MockGestureAdapter::default();
    let anchor = MockAnchorAdapter::new();

    let render = OpenCvOverlayAdapter::new(&config.overlay.window_title);

    tracing::info!("Starting frame loop (press 'q' or ESC to quit)...");
    let mut frame_loop = FrameLoop::new(capture, gestures, anchor, render, config);
    frame_loop.run()?;

    Ok(())
}
