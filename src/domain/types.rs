/// コア型定義
///
/// Domain層の中心となるデータ構造。
/// すべての処理で共有される不変の型。

use std::time::{Duration, Instant};

/// レティクルの照準位置（フレームのピクセル座標系）
///
/// 顔ランドマークから外部で算出された「額」の位置。
/// 1フレームの処理の間だけ有効で、所有権は持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorPoint {
    pub x: i32,
    pub y: i32,
}

impl AnchorPoint {
    /// 新しいアンカー位置を作成
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// キャプチャされたフレームデータ
#[derive(Debug, Clone)]
pub struct Frame {
    /// フレーム取得時刻
    pub timestamp: Instant,
    /// フレーム画像データ（BGR形式、連続メモリ）
    pub data: Vec<u8>,
    /// 画像の幅
    pub width: u32,
    /// 画像の高さ
    pub height: u32,
}

impl Frame {
    /// 新しいフレームを作成
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            timestamp: Instant::now(),
            data,
            width,
            height,
        }
    }
}

/// BGR色（OpenCV準拠のチャンネル順）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// テキスト描画に使用するフォント種別
///
/// Domain層はOpenCVのフォント定数を知らないため、
/// 抽象化した種別をInfrastructure層が実フォントへ対応付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// 標準フォント（FPS表示・補助テキスト用）
    Plain,
    /// 太字フォント（ステータス表示用）
    Bold,
}

/// 1フレーム分の描画命令
///
/// コアはピクセルに直接触れず、決定的な描画命令列だけを出力する。
/// 実際の描画はRenderPort実装が担当する。
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// 直線
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Color,
        thickness: i32,
    },
    /// 円
    Circle {
        center: (i32, i32),
        radius: i32,
        color: Color,
        thickness: i32,
    },
    /// テキスト
    Text {
        text: String,
        origin: (i32, i32),
        font: FontKind,
        scale: f64,
        color: Color,
        thickness: i32,
    },
}

/// 1フレーム分の入力信号（外部プロバイダから収集済み）
#[derive(Debug, Clone)]
pub struct FrameSignals {
    /// 検出された手ごとの敵対ジェスチャーフラグ（0個以上）
    pub gestures: Vec<bool>,
    /// アンカー位置（顔が検出されなかった場合はNone）
    pub anchor: Option<AnchorPoint>,
    /// 現在時刻（単調増加、ロックタイマー用）
    pub now: Instant,
    /// このフレームの処理所要時間（FPS算出用）
    pub frame_duration: Duration,
}

/// 1フレーム処理の判定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameVerdict {
    /// 平滑化後の敵対ジェスチャー判定
    pub hostile: bool,
    /// レティクルのロック状態
    pub locked: bool,
    /// 移動平均FPS（表示用）
    pub fps: f64,
}

/// 表示用の脅威レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatLevel {
    /// 敵対ジェスチャーなし
    Calm,
    /// 敵対ジェスチャー検出中（ロック前）
    Hostile,
    /// ターゲットロック完了
    Locked,
}

impl ThreatLevel {
    /// 判定結果から脅威レベルを導出
    pub fn from_verdict(verdict: &FrameVerdict) -> Self {
        match (verdict.hostile, verdict.locked) {
            (true, true) => Self::Locked,
            (true, false) => Self::Hostile,
            (false, _) => Self::Calm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_point_new() {
        let anchor = AnchorPoint::new(640, 320);
        assert_eq!(anchor.x, 640);
        assert_eq!(anchor.y, 320);
    }

    #[test]
    fn test_frame_new() {
        let frame = Frame::new(vec![0u8; 1280 * 720 * 3], 1280, 720);
        assert_eq!(frame.width, 1280);
        assert_eq!(frame.height, 720);
        assert_eq!(frame.data.len(), 1280 * 720 * 3);
    }

    #[test]
    fn test_threat_level_from_verdict() {
        let calm = FrameVerdict {
            hostile: false,
            locked: false,
            fps: 30.0,
        };
        assert_eq!(ThreatLevel::from_verdict(&calm), ThreatLevel::Calm);

        let hostile = FrameVerdict {
            hostile: true,
            locked: false,
            fps: 30.0,
        };
        assert_eq!(ThreatLevel::from_verdict(&hostile), ThreatLevel::Hostile);

        let locked = FrameVerdict {
            hostile: true,
            locked: true,
            fps: 30.0,
        };
        assert_eq!(ThreatLevel::from_verdict(&locked), ThreatLevel::Locked);
    }

    #[test]
    fn test_threat_level_locked_requires_hostile() {
        // ロック中はジェスチャーも継続しているはずだが、
        // 万一矛盾した組み合わせが来てもCalm扱いに倒す
        let odd = FrameVerdict {
            hostile: false,
            locked: true,
            fps: 0.0,
        };
        assert_eq!(ThreatLevel::from_verdict(&odd), ThreatLevel::Calm);
    }
}
