//! ジェスチャー平滑化モジュール
//!
//! 上流のジェスチャー分類器は1フレーム単位の誤検出（false positive /
//! false negative）を含むため、直近Nフレームの多数決でターゲティング状態の
//! ばたつきを抑える。約N/fps秒の遅延と引き換えに安定性を得る。

use std::collections::VecDeque;

use crate::domain::StabilizerConfig;

/// ジェスチャー平滑化器
///
/// 固定容量の履歴（挿入順、あふれたら最古を破棄）に生判定を蓄積し、
/// trueの数が `floor(履歴長 / 2)` を厳密に超えた場合のみアクティブとする。
/// ウィンドウが埋まる前の起動直後も現在の履歴長で判定する。
#[derive(Debug)]
pub struct GestureStabilizer {
    history: VecDeque<bool>,
    capacity: usize,
}

impl GestureStabilizer {
    /// 新しいGestureStabilizerを作成
    pub fn new(config: &StabilizerConfig) -> Self {
        Self {
            history: VecDeque::with_capacity(config.window_size),
            capacity: config.window_size,
        }
    }

    /// 生判定を履歴へ追加（容量超過時は最古を破棄、償却O(1)）
    pub fn push(&mut self, raw: bool) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(raw);
    }

    /// 多数決による安定化済み判定
    ///
    /// trueの数 > floor(履歴長 / 2) のとき真。履歴が空なら偽。
    pub fn is_active(&self) -> bool {
        let positives = self.history.iter().filter(|&&v| v).count();
        positives > self.history.len() / 2
    }

    /// 現在の履歴長（容量以下であることが不変条件）
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// 履歴が空かどうか
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stabilizer(window_size: usize) -> GestureStabilizer {
        GestureStabilizer::new(&StabilizerConfig { window_size })
    }

    #[test]
    fn test_empty_history_is_inactive() {
        let s = stabilizer(5);
        assert!(s.is_empty());
        assert!(!s.is_active());
    }

    #[test]
    fn test_history_never_exceeds_capacity() {
        let mut s = stabilizer(5);
        for i in 0..20 {
            s.push(i % 2 == 0);
            assert!(s.len() <= 5);
        }
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn test_majority_vote_partial_window() {
        // [true, true, false] → 2 > 3/2=1 → アクティブ
        let mut s = stabilizer(5);
        s.push(true);
        s.push(true);
        s.push(false);
        assert!(s.is_active());
    }

    #[test]
    fn test_majority_vote_tie_is_inactive() {
        // [true, false] → 1 > 2/2=1 は偽 → 非アクティブ
        let mut s = stabilizer(5);
        s.push(true);
        s.push(false);
        assert!(!s.is_active());
    }

    #[test]
    fn test_single_flicker_does_not_flip_state() {
        // 連続検出中に1フレームだけ欠落しても判定は変わらない
        let mut s = stabilizer(5);
        for _ in 0..5 {
            s.push(true);
        }
        assert!(s.is_active());

        s.push(false);
        // 履歴は [true x4, false] → 4 > 2 → 依然アクティブ
        assert!(s.is_active());
    }

    #[test]
    fn test_eviction_order_is_fifo() {
        // 最初のtrue群が押し出されれば非アクティブへ転じる
        let mut s = stabilizer(3);
        s.push(true);
        s.push(true);
        s.push(true);
        assert!(s.is_active());

        s.push(false);
        s.push(false);
        // 履歴 [true, false, false] → 1 > 1 は偽
        assert!(!s.is_active());
    }

    #[test]
    fn test_window_size_one() {
        // 容量1は平滑化なし（直前の生判定をそのまま返す）
        let mut s = stabilizer(1);
        s.push(true);
        assert!(s.is_active());
        s.push(false);
        assert!(!s.is_active());
        assert_eq!(s.len(), 1);
    }
}
