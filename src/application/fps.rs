//! FPS統計モジュール
//!
//! フレーム所要時間から瞬間FPSを求め、固定容量ウィンドウの算術平均を
//! 表示用のFPSとして提供する。

use std::collections::VecDeque;
use std::time::Duration;

/// FPS移動平均ウィンドウ
///
/// 固定容量（デフォルト30サンプル）、あふれたら最古を破棄。
#[derive(Debug)]
pub struct FpsWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl FpsWindow {
    /// 新しいFpsWindowを作成
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// フレーム所要時間から瞬間FPSを記録
    ///
    /// 所要時間が0以下の場合は除算せず0.0を記録する
    /// （ウィンドウを空にしないための縮退対応）。
    pub fn record(&mut self, frame_duration: Duration) {
        let secs = frame_duration.as_secs_f64();
        let fps = if secs > 0.0 { 1.0 / secs } else { 0.0 };
        self.push(fps);
    }

    /// 瞬間FPS値を直接記録（テスト・既算出値用）
    pub fn push(&mut self, fps: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(fps);
    }

    /// ウィンドウ内サンプルの算術平均
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// 現在のサンプル数
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// サンプルが空かどうか
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_known_samples() {
        // 瞬間FPS [10, 20, 30] → 平均20.0
        let mut window = FpsWindow::new(30);
        window.record(Duration::from_millis(100)); // 10 fps
        window.record(Duration::from_millis(50)); // 20 fps
        window.record(Duration::from_secs_f64(1.0 / 30.0)); // ≈30 fps

        assert!((window.average() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_duration_contributes_zero() {
        let mut window = FpsWindow::new(30);
        window.record(Duration::ZERO);
        assert_eq!(window.len(), 1);
        assert_eq!(window.average(), 0.0);
    }

    #[test]
    fn test_empty_window_average_is_zero() {
        let window = FpsWindow::new(30);
        assert!(window.is_empty());
        assert_eq!(window.average(), 0.0);
    }

    #[test]
    fn test_capacity_eviction() {
        // 31個目のサンプルで最古が押し出される
        let mut window = FpsWindow::new(30);
        window.push(0.0);
        for _ in 0..30 {
            window.push(10.0);
        }
        assert_eq!(window.len(), 30);
        // 最初の0.0は破棄済みなので平均は10.0ちょうど
        assert_eq!(window.average(), 10.0);
    }
}
