/// モック信号プロバイダ
///
/// 手・顔ランドマークモデルが未統合の間の開発・デモ用実装。
/// ジェスチャーは平穏フェーズと敵対フェーズを周期的に繰り返し、
/// アンカーはフレーム中央を額オフセット規約（40ピクセル上）で返す。
/// 実モデル統合時はこのファイルをGesturePort/AnchorPortの実装で
/// 置き換えるだけでよい。

use crate::domain::{AnchorPoint, AnchorPort, DomainResult, Frame, GesturePort};

/// アンカーの額オフセット（ピクセル、上方向）
const FOREHEAD_OFFSET_Y: i32 = 40;

/// モックジェスチャーアダプタ
///
/// calm_framesフレームの平穏 → hostile_framesフレームの敵対検出を
/// 交互に繰り返す。常に手1本分の判定を返す。
pub struct MockGestureAdapter {
    frame_count: u64,
    calm_frames: u64,
    hostile_frames: u64,
}

impl MockGestureAdapter {
    /// 新しいモックジェスチャーアダプタを作成
    pub fn new(calm_frames: u64, hostile_frames: u64) -> Self {
        Self {
            frame_count: 0,
            calm_frames: calm_frames.max(1),
            hostile_frames: hostile_frames.max(1),
        }
    }
}

impl Default for MockGestureAdapter {
    /// 30fps想定で約3秒ずつ平穏/敵対を繰り返す
    fn default() -> Self {
        Self::new(90, 90)
    }
}

impl GesturePort for MockGestureAdapter {
    fn detect_gestures(&mut self, _frame: &Frame) -> DomainResult<Vec<bool>> {
        let phase = self.frame_count % (self.calm_frames + self.hostile_frames);
        let hostile = phase >= self.calm_frames;
        self.frame_count += 1;

        Ok(vec![hostile])
    }
}

/// モックアンカーアダプタ
///
/// 常に顔が検出されたものとして、フレーム中央から40ピクセル上を返す。
pub struct MockAnchorAdapter;

impl MockAnchorAdapter {
    /// 新しいモックアンカーアダプタを作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockAnchorAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorPort for MockAnchorAdapter {
    fn locate_anchor(&mut self, frame: &Frame) -> DomainResult<Option<AnchorPoint>> {
        Ok(Some(AnchorPoint::new(
            frame.width as i32 / 2,
            frame.height as i32 / 2 - FOREHEAD_OFFSET_Y,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(vec![0u8; 640 * 480 * 3], 640, 480)
    }

    #[test]
    fn test_gesture_phases_alternate() {
        let mut adapter = MockGestureAdapter::new(2, 3);
        let f = frame();

        let mut observed = Vec::new();
        for _ in 0..10 {
            let gestures = adapter.detect_gestures(&f).expect("mock never fails");
            assert_eq!(gestures.len(), 1);
            observed.push(gestures[0]);
        }

        // 平穏2 → 敵対3 の周期5で繰り返す
        assert_eq!(
            observed,
            vec![false, false, true, true, true, false, false, true, true, true]
        );
    }

    #[test]
    fn test_anchor_uses_forehead_convention() {
        let mut adapter = MockAnchorAdapter::new();
        let anchor = adapter
            .locate_anchor(&frame())
            .expect("mock never fails")
            .expect("mock always finds a face");

        assert_eq!(anchor, AnchorPoint::new(320, 240 - 40));
    }
}
