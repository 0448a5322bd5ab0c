//! 設定管理
//!
//! TOML設定ファイルの読み込みとDomain型への変換。
//!
//! アニメーション速度（縮小量・パルス位相の増分）は「1フレームあたり」の
//! 値として定義されている点に注意。視覚的な速度はフレームレートに比例する
//! （互換性維持のため意図的にこの仕様を保持）。将来秒単位のレートに変換する
//! 場合も、状態機械には触れずこのモジュールの定数を差し替えるだけでよい。

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::domain::{Color, DomainError, DomainResult};

/// キャプチャソース
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaptureSource {
    /// Webカメラ（OpenCV VideoCapture）
    #[default]
    Camera,
    /// 合成フレーム生成（カメラなし環境での開発・デモ用）
    Synthetic,
}

/// アプリケーション設定のルート構造
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AppConfig {
    /// キャプチャ設定
    #[serde(default)]
    pub capture: CaptureConfig,
    /// ジェスチャー平滑化設定
    #[serde(default)]
    pub stabilizer: StabilizerConfig,
    /// レティクル設定
    #[serde(default)]
    pub reticle: ReticleConfig,
    /// セッション設定
    #[serde(default)]
    pub session: SessionConfig,
    /// オーバーレイUI設定
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// キャプチャ設定
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CaptureConfig {
    /// キャプチャソース
    ///
    /// 選択肢: "camera", "synthetic"
    /// デフォルト: "camera"
    #[serde(default)]
    pub source: CaptureSource,

    /// カメラデバイスのインデックス
    ///
    /// 通常は0
    pub camera_index: i32,

    /// キャプチャ幅（ピクセル）
    pub width: u32,

    /// キャプチャ高さ（ピクセル）
    pub height: u32,

    /// 要求フレームレート
    pub fps: u32,
}

impl CaptureConfig {
    /// デフォルトのキャプチャ幅
    pub const DEFAULT_WIDTH: u32 = 1280;
    /// デフォルトのキャプチャ高さ
    pub const DEFAULT_HEIGHT: u32 = 720;
    /// デフォルトのフレームレート
    pub const DEFAULT_FPS: u32 = 30;
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            source: CaptureSource::default(),
            camera_index: 0,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            fps: Self::DEFAULT_FPS,
        }
    }
}

/// ジェスチャー平滑化設定
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StabilizerConfig {
    /// 平滑化ウィンドウの長さ（フレーム数）
    ///
    /// 直近Nフレームの多数決で安定化する。大きくすると誤検出に強くなるが
    /// 約N/fps秒の遅延が乗る。
    /// デフォルト: 5
    pub window_size: usize,
}

impl StabilizerConfig {
    /// デフォルトの平滑化ウィンドウ長
    pub const DEFAULT_WINDOW_SIZE: usize = 5;
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window_size: Self::DEFAULT_WINDOW_SIZE,
        }
    }
}

/// BGR色設定
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct ColorConfig {
    /// 青チャンネル [0-255]
    pub b: u8,
    /// 緑チャンネル [0-255]
    pub g: u8,
    /// 赤チャンネル [0-255]
    pub r: u8,
}

impl From<ColorConfig> for Color {
    fn from(config: ColorConfig) -> Self {
        Color::new(config.b, config.g, config.r)
    }
}

/// レティクル設定
///
/// サイズ・速度の単位はピクセル。縮小量とパルス位相増分は
/// 「1回のupdate（=1フレーム）あたり」の値。
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReticleConfig {
    /// 起動直後のレティクルサイズ
    ///
    /// デフォルト: 150.0
    pub initial_size: f32,

    /// 収束後の最小サイズ（この値を下回ることはない）
    ///
    /// デフォルト: 25.0
    pub min_size: f32,

    /// 1フレームあたりの縮小量
    ///
    /// デフォルト: 8.0
    pub shrink_speed: f32,

    /// ロック成立までの滞留時間（ミリ秒）
    ///
    /// startからこの時間を「超えた」最初のupdateでロックする
    /// デフォルト: 2000ms
    pub lock_threshold_ms: u64,

    /// ロック中のパルス振幅（表示サイズは min_size ± この値 で振動）
    ///
    /// デフォルト: 10.0
    pub pulse_amplitude: f32,

    /// 1フレームあたりのパルス位相増分（ラジアン）
    ///
    /// デフォルト: 0.3
    pub pulse_step: f32,

    /// コーナーブラケットのオフセット比率（表示サイズに対する倍率）
    ///
    /// デフォルト: 0.3
    pub bracket_ratio: f32,

    /// コーナーブラケットの腕の長さ（ピクセル）
    ///
    /// デフォルト: 15
    pub bracket_arm: i32,

    /// 捕捉中（ロック前）の描画色
    #[serde(default = "default_acquiring_color")]
    pub acquiring_color: ColorConfig,

    /// ロック中の描画色
    #[serde(default = "default_locked_color")]
    pub locked_color: ColorConfig,

    /// 捕捉中の線の太さ
    ///
    /// デフォルト: 2
    pub acquiring_thickness: i32,

    /// ロック中の線の太さ
    ///
    /// デフォルト: 3
    pub locked_thickness: i32,
}

fn default_acquiring_color() -> ColorConfig {
    // BGR: 赤
    ColorConfig { b: 0, g: 0, r: 255 }
}

fn default_locked_color() -> ColorConfig {
    // BGR: 黄
    ColorConfig { b: 0, g: 255, r: 255 }
}

impl ReticleConfig {
    pub const DEFAULT_INITIAL_SIZE: f32 = 150.0;
    pub const DEFAULT_MIN_SIZE: f32 = 25.0;
    pub const DEFAULT_SHRINK_SPEED: f32 = 8.0;
    pub const DEFAULT_LOCK_THRESHOLD_MS: u64 = 2000;
    pub const DEFAULT_PULSE_AMPLITUDE: f32 = 10.0;
    pub const DEFAULT_PULSE_STEP: f32 = 0.3;
    pub const DEFAULT_BRACKET_RATIO: f32 = 0.3;
    pub const DEFAULT_BRACKET_ARM: i32 = 15;

    /// ロック閾値をDurationとして取得
    pub fn lock_threshold(&self) -> Duration {
        Duration::from_millis(self.lock_threshold_ms)
    }
}

impl Default for ReticleConfig {
    fn default() -> Self {
        Self {
            initial_size: Self::DEFAULT_INITIAL_SIZE,
            min_size: Self::DEFAULT_MIN_SIZE,
            shrink_speed: Self::DEFAULT_SHRINK_SPEED,
            lock_threshold_ms: Self::DEFAULT_LOCK_THRESHOLD_MS,
            pulse_amplitude: Self::DEFAULT_PULSE_AMPLITUDE,
            pulse_step: Self::DEFAULT_PULSE_STEP,
            bracket_ratio: Self::DEFAULT_BRACKET_RATIO,
            bracket_arm: Self::DEFAULT_BRACKET_ARM,
            acquiring_color: default_acquiring_color(),
            locked_color: default_locked_color(),
            acquiring_thickness: 2,
            locked_thickness: 3,
        }
    }
}

/// セッション設定
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionConfig {
    /// FPS移動平均ウィンドウの長さ（サンプル数）
    ///
    /// デフォルト: 30
    pub fps_window: usize,
}

impl SessionConfig {
    /// デフォルトのFPSウィンドウ長
    pub const DEFAULT_FPS_WINDOW: usize = 30;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps_window: Self::DEFAULT_FPS_WINDOW,
        }
    }
}

/// オーバーレイUI設定
///
/// 表示テキストと表示項目の切り替え。色はUI固有の固定値
/// （FrameLoop側の定数）を使用する。
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OverlayConfig {
    /// 表示ウィンドウのタイトル
    pub window_title: String,

    /// 敵対ジェスチャーなしの場合のステータステキスト
    pub calm_text: String,

    /// 敵対ジェスチャー検出中のステータステキスト
    pub hostile_text: String,

    /// ロック完了時のステータステキスト
    pub locked_text: String,

    /// 検出中に表示する脅威レベルテキスト
    pub threat_text: String,

    /// 画面下部の操作ヘルプテキスト
    pub help_text: String,

    /// FPSを表示するか
    pub show_fps: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            window_title: "Good Guy, Bad Guy Detector".to_string(),
            calm_text: "Good Guy".to_string(),
            hostile_text: "Bad Guy Detected".to_string(),
            locked_text: "Over".to_string(),
            threat_text: "THREAT LEVEL: MAXIMUM".to_string(),
            help_text: "Middle finger to target | Q to quit".to_string(),
            show_fps: true,
        }
    }
}

impl AppConfig {
    /// TOMLファイルから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> DomainResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content)
            .map_err(|e| DomainError::Configuration(format!("Failed to parse config file: {}", e)))
    }

    /// デフォルト設定をTOMLファイルに書き出す
    pub fn write_default<P: AsRef<Path>>(path: P) -> DomainResult<()> {
        let config = Self::default();
        let content = toml::to_string_pretty(&config).map_err(|e| {
            DomainError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)
            .map_err(|e| DomainError::Configuration(format!("Failed to write config file: {}", e)))
    }

    /// 設定の妥当性を検証
    pub fn validate(&self) -> DomainResult<()> {
        // キャプチャ設定の検証
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(DomainError::Configuration(
                "Capture width and height must be greater than 0".to_string(),
            ));
        }
        if self.capture.fps == 0 {
            return Err(DomainError::Configuration(
                "Capture fps must be greater than 0".to_string(),
            ));
        }

        // 平滑化ウィンドウの検証
        if self.stabilizer.window_size == 0 {
            return Err(DomainError::Configuration(
                "Stabilizer window size must be greater than 0".to_string(),
            ));
        }

        // レティクル設定の検証
        let reticle = &self.reticle;
        if reticle.min_size <= 0.0 || reticle.initial_size < reticle.min_size {
            return Err(DomainError::Configuration(
                "Reticle sizes must satisfy 0 < min_size <= initial_size".to_string(),
            ));
        }
        if reticle.shrink_speed <= 0.0 {
            return Err(DomainError::Configuration(
                "Reticle shrink speed must be positive".to_string(),
            ));
        }
        if reticle.lock_threshold_ms == 0 {
            return Err(DomainError::Configuration(
                "Reticle lock threshold must be greater than 0".to_string(),
            ));
        }
        if reticle.pulse_amplitude < 0.0 || reticle.pulse_step <= 0.0 {
            return Err(DomainError::Configuration(
                "Reticle pulse amplitude must be non-negative and pulse step positive".to_string(),
            ));
        }
        if reticle.bracket_ratio <= 0.0 || reticle.bracket_arm <= 0 {
            return Err(DomainError::Configuration(
                "Reticle bracket ratio and arm length must be positive".to_string(),
            ));
        }
        if reticle.acquiring_thickness <= 0 || reticle.locked_thickness <= 0 {
            return Err(DomainError::Configuration(
                "Reticle stroke thickness must be positive".to_string(),
            ));
        }

        // セッション設定の検証
        if self.session.fps_window == 0 {
            return Err(DomainError::Configuration(
                "Session FPS window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
