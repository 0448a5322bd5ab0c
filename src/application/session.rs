//! ターゲティングセッションモジュール
//!
//! 平滑化済みジェスチャー信号とアンカーの有無から、レティクルの
//! 開始・追従・解除を毎フレーム決定するユースケース層。
//! 1セッション = 1スタビライザ + 1レティクル + 1FPSウィンドウ。
//!
//! 共有リソースはすべてこの構造体が単独所有し、フレームごとに1回だけ
//! `process_frame`が呼ばれる前提（単一スレッド・単一ライター）。
//! 将来パイプライン化する場合は呼び出しを排他する必要がある。

use crate::application::fps::FpsWindow;
use crate::application::reticle::Reticle;
use crate::application::stabilizer::GestureStabilizer;
use crate::domain::{AppConfig, FrameSignals, FrameVerdict};

/// ターゲティングセッション
pub struct TargetingSession {
    stabilizer: GestureStabilizer,
    reticle: Reticle,
    fps: FpsWindow,
    locked: bool,
}

impl TargetingSession {
    /// 新しいTargetingSessionを作成
    pub fn new(config: &AppConfig) -> Self {
        Self {
            stabilizer: GestureStabilizer::new(&config.stabilizer),
            reticle: Reticle::new(config.reticle.clone()),
            fps: FpsWindow::new(config.session.fps_window),
            locked: false,
        }
    }

    /// 1フレーム分の信号を処理して判定結果を返す
    ///
    /// 1. 手ごとの生判定をORで1つにまとめ、平滑化器に投入して安定判定を得る
    /// 2. 安定判定が真かつアンカーあり:
    ///    - レティクルが非アクティブなら新エピソードとしてstart
    ///    - アクティブなら照準位置のみ追従（ロックタイマーは保持）
    /// 3. 安定判定が偽: レティクルを解除
    /// 4. 安定判定が真でもアンカーなし: 状態をそのまま持ち越す
    /// 5. レティクルを更新し、ロック状態を記録
    /// 6. FPSウィンドウを更新
    pub fn process_frame(&mut self, signals: &FrameSignals) -> FrameVerdict {
        let raw_hostile = signals.gestures.iter().any(|&g| g);
        self.stabilizer.push(raw_hostile);
        let hostile_stable = self.stabilizer.is_active();

        if hostile_stable {
            if let Some(anchor) = signals.anchor {
                if self.reticle.is_active() {
                    self.reticle.retarget(anchor);
                } else {
                    self.reticle.start(anchor, signals.now);
                }
            }
            // アンカーなしの場合は何もしない（前フレームの状態を持ち越す）
        } else {
            self.reticle.deactivate();
        }

        self.locked = self.reticle.update(signals.now);
        self.fps.record(signals.frame_duration);

        FrameVerdict {
            hostile: hostile_stable,
            locked: self.locked,
            fps: self.fps.average(),
        }
    }

    /// 直近のフレームで確定したロック状態
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// レティクルへの参照（描画命令の生成用）
    pub fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    /// 現在の移動平均FPS
    pub fn current_fps(&self) -> f64 {
        self.fps.average()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnchorPoint;
    use std::time::{Duration, Instant};

    fn session() -> TargetingSession {
        TargetingSession::new(&AppConfig::default())
    }

    fn signals(
        gestures: Vec<bool>,
        anchor: Option<AnchorPoint>,
        now: Instant,
    ) -> FrameSignals {
        FrameSignals {
            gestures,
            anchor,
            now,
            frame_duration: Duration::from_millis(33),
        }
    }

    #[test]
    fn test_empty_gesture_sequence_means_calm() {
        let mut s = session();
        let t0 = Instant::now();
        let verdict = s.process_frame(&signals(vec![], Some(AnchorPoint::new(1, 1)), t0));
        assert!(!verdict.hostile);
        assert!(!verdict.locked);
        assert!(!s.reticle().is_active());
    }

    #[test]
    fn test_any_hand_triggers_or_reduction() {
        // 2本目の手だけが敵対ジェスチャーでも検出扱い
        let mut s = session();
        let t0 = Instant::now();
        let anchor = Some(AnchorPoint::new(100, 100));

        let mut verdict = s.process_frame(&signals(vec![false, true], anchor, t0));
        assert!(verdict.hostile); // 履歴[true] → 1 > 0

        verdict = s.process_frame(&signals(vec![false, false], anchor, t0));
        // 履歴[true, false] → 1 > 1 は偽
        assert!(!verdict.hostile);
    }

    #[test]
    fn test_sustained_gesture_locks_after_dwell() {
        // 敵対ジェスチャー+アンカーが継続 → 滞留時間経過後にロック
        let mut s = session();
        let t0 = Instant::now();
        let anchor = Some(AnchorPoint::new(640, 320));

        let mut locked_frames = Vec::new();
        for i in 0..5 {
            let now = t0 + Duration::from_millis(600 * i);
            let verdict = s.process_frame(&signals(vec![true], anchor, now));
            locked_frames.push(verdict.locked);
        }

        // frame1でstart（locked=false）、frame2〜4も閾値内、
        // frame5（経過2.4s > 2.0s）でロック
        assert_eq!(locked_frames, vec![false, false, false, false, true]);
        assert!(s.is_locked());
    }

    #[test]
    fn test_retarget_does_not_reset_lock_timer() {
        // アンカーが毎フレーム動いてもタイマーは進み続ける
        let mut s = session();
        let t0 = Instant::now();

        for i in 0..5 {
            let now = t0 + Duration::from_millis(600 * i);
            let anchor = Some(AnchorPoint::new(100 + i as i32, 100));
            s.process_frame(&signals(vec![true], anchor, now));
        }

        assert!(s.is_locked());
        // 照準は最新のアンカーに追従している
        assert_eq!(s.reticle().position(), AnchorPoint::new(104, 100));
    }

    #[test]
    fn test_missing_anchor_carries_state_over() {
        let mut s = session();
        let t0 = Instant::now();
        let anchor = Some(AnchorPoint::new(50, 50));

        s.process_frame(&signals(vec![true], anchor, t0));
        assert!(s.reticle().is_active());
        let size = s.reticle().current_size();

        // アンカー欠落フレーム: レティクルは解除されず、アニメーションは進む
        s.process_frame(&signals(vec![true], None, t0 + Duration::from_millis(33)));
        assert!(s.reticle().is_active());
        assert_eq!(s.reticle().position(), AnchorPoint::new(50, 50));
        assert_eq!(s.reticle().current_size(), size - 8.0);
    }

    #[test]
    fn test_stable_false_deactivates() {
        let mut s = session();
        let t0 = Instant::now();
        let anchor = Some(AnchorPoint::new(50, 50));

        for i in 0..5 {
            s.process_frame(&signals(vec![true], anchor, t0 + Duration::from_millis(i)));
        }
        assert!(s.reticle().is_active());

        // 偽が多数になるまで押し込むと解除される
        for i in 5..9 {
            s.process_frame(&signals(vec![false], anchor, t0 + Duration::from_millis(i)));
        }
        assert!(!s.reticle().is_active());
        assert!(!s.is_locked());
    }

    #[test]
    fn test_new_episode_after_deactivation_restarts_timer() {
        let mut s = session();
        let t0 = Instant::now();
        let anchor = Some(AnchorPoint::new(10, 10));

        // 1回目のエピソードをロックまで進める
        for i in 0..5 {
            s.process_frame(&signals(vec![true], anchor, t0 + Duration::from_millis(600 * i)));
        }
        assert!(s.is_locked());

        // 解除（偽の多数決へ）
        let t1 = t0 + Duration::from_secs(10);
        for i in 0..5 {
            s.process_frame(&signals(vec![false], anchor, t1 + Duration::from_millis(i)));
        }
        assert!(!s.is_locked());

        // 2回目のエピソードは改めて滞留時間を要する
        let t2 = t1 + Duration::from_secs(1);
        for i in 0..5 {
            let verdict =
                s.process_frame(&signals(vec![true], anchor, t2 + Duration::from_millis(i)));
            assert!(!verdict.locked);
        }
    }

    #[test]
    fn test_fps_average_exposed() {
        let mut s = session();
        let t0 = Instant::now();
        let mut sig = signals(vec![false], None, t0);
        sig.frame_duration = Duration::from_millis(50); // 20 fps

        let verdict = s.process_frame(&sig);
        assert!((verdict.fps - 20.0).abs() < 1e-3);
        assert!((s.current_fps() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_frame_duration_is_not_fatal() {
        let mut s = session();
        let t0 = Instant::now();
        let mut sig = signals(vec![false], None, t0);
        sig.frame_duration = Duration::ZERO;

        let verdict = s.process_frame(&sig);
        assert_eq!(verdict.fps, 0.0);
    }
}
