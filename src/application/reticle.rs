//! レティクル状態機械・アニメーションモジュール
//!
//! 3状態（Idle / Acquiring / Locked）のライフサイクルと時間ベースの
//! アニメーションを所有する。updateは1描画フレームにつき正確に1回
//! 呼び出すこと（縮小・パルス位相は呼び出しごとに進む）。
//!
//! 縮小速度とパルス位相の増分は「フレームあたり」の値であり、視覚的な
//! 速度はフレームレートに連動する（互換性のため保持している仕様）。

use std::time::Instant;

use crate::domain::{AnchorPoint, Color, DrawCommand, ReticleConfig};

/// ターゲティングレティクル
///
/// 不変条件:
/// - `current_size >= min_size` が常に成立
/// - `locked` は `active` かつ起動からロック閾値を超えた場合のみ真になる
/// - ロック後の表示サイズはパルス位相のみの関数（縮小減衰は停止）
#[derive(Debug)]
pub struct Reticle {
    config: ReticleConfig,
    active: bool,
    locked: bool,
    position: AnchorPoint,
    current_size: f32,
    display_size: f32,
    pulse_phase: f32,
    activated_at: Option<Instant>,
}

impl Reticle {
    /// 新しいReticleを作成（Idle状態）
    pub fn new(config: ReticleConfig) -> Self {
        let min_size = config.min_size;
        Self {
            config,
            active: false,
            locked: false,
            position: AnchorPoint::new(0, 0),
            current_size: min_size,
            display_size: min_size,
            pulse_phase: 0.0,
            activated_at: None,
        }
    }

    /// ターゲティングエピソードを開始（Idle → Acquiring）
    ///
    /// サイズ・パルス位相・ロック状態・タイムスタンプをすべてリセットする。
    /// 進行中のエピソードで照準位置だけ追従したい場合は`retarget`を使う。
    pub fn start(&mut self, position: AnchorPoint, now: Instant) {
        self.position = position;
        self.current_size = self.config.initial_size;
        self.display_size = self.config.initial_size;
        self.active = true;
        self.locked = false;
        self.pulse_phase = 0.0;
        self.activated_at = Some(now);
    }

    /// 進行中のエピソードの照準位置のみ更新
    ///
    /// ロックタイマー・縮小アニメーション・パルス位相には触れない。
    /// 非アクティブ時は何もしない。
    pub fn retarget(&mut self, position: AnchorPoint) {
        if self.active {
            self.position = position;
        }
    }

    /// レティクルを無効化（→ Idle）
    ///
    /// 何度呼んでも同じ状態に落ち着く（冪等）。
    pub fn deactivate(&mut self) {
        self.active = false;
        self.locked = false;
        self.current_size = self.config.min_size;
        self.display_size = self.config.min_size;
    }

    /// 1フレーム分の状態遷移とアニメーション更新
    ///
    /// 非アクティブなら何も計算せずfalseを返す。アクティブなら:
    /// 1. 起動からロック閾値を厳密に超えていればロックへ遷移
    /// 2. ロック中: 表示サイズ = min_size + 振幅·sin(位相)、その後位相を進める
    /// 3. 捕捉中: 表示サイズ = 現在サイズ、その後min_sizeを下限に縮小
    ///
    /// # Returns
    /// 現在のロック状態
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.active {
            return false;
        }

        if !self.locked {
            if let Some(started) = self.activated_at {
                if now.duration_since(started) > self.config.lock_threshold() {
                    self.locked = true;
                }
            }
        }

        if self.locked {
            let pulse = self.config.pulse_amplitude * self.pulse_phase.sin();
            self.display_size = self.config.min_size + pulse;
            self.pulse_phase += self.config.pulse_step;
        } else {
            self.display_size = self.current_size;
            if self.current_size > self.config.min_size {
                self.current_size =
                    (self.current_size - self.config.shrink_speed).max(self.config.min_size);
            }
        }

        self.locked
    }

    /// アクティブかどうか（Acquiring または Locked）
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// ロック済みかどうか
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// 現在の照準位置
    pub fn position(&self) -> AnchorPoint {
        self.position
    }

    /// 現在の縮小サイズ（ロック前の減衰対象）
    pub fn current_size(&self) -> f32 {
        self.current_size
    }

    /// 直近のupdateで確定した表示サイズ
    pub fn display_size(&self) -> f32 {
        self.display_size
    }

    /// 現在のパルス位相（ラジアン）
    pub fn pulse_phase(&self) -> f32 {
        self.pulse_phase
    }

    /// 現在の状態に応じた描画命令列を生成
    ///
    /// 照準位置を中心に、表示サイズの水平線・垂直線・円と、
    /// 表示サイズ×bracket_ratioのオフセット位置に4つのL字コーナー
    /// ブラケット（腕の長さbracket_arm）を描く。座標はPython実装と
    /// 同じく小数切り捨てで整数化する。非アクティブ時は空。
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        if !self.active {
            return Vec::new();
        }

        let (color, thickness) = self.style();
        let x = self.position.x;
        let y = self.position.y;
        let size = self.display_size;

        let mut commands = Vec::with_capacity(11);

        // 十字線
        commands.push(DrawCommand::Line {
            from: ((x as f32 - size) as i32, y),
            to: ((x as f32 + size) as i32, y),
            color,
            thickness,
        });
        commands.push(DrawCommand::Line {
            from: (x, (y as f32 - size) as i32),
            to: (x, (y as f32 + size) as i32),
            color,
            thickness,
        });

        // 外周円
        commands.push(DrawCommand::Circle {
            center: (x, y),
            radius: size as i32,
            color,
            thickness,
        });

        // コーナーブラケット（対角4隅から中心向きにL字）
        let offset = (size * self.config.bracket_ratio) as i32;
        let arm = self.config.bracket_arm;
        let corners = [
            // (隅のx, 隅のy, 水平腕の向き, 垂直腕の向き)
            (x - offset, y - offset, 1, 1),
            (x + offset, y - offset, -1, 1),
            (x - offset, y + offset, 1, -1),
            (x + offset, y + offset, -1, -1),
        ];
        for (cx, cy, dx, dy) in corners {
            commands.push(DrawCommand::Line {
                from: (cx, cy),
                to: (cx + dx * arm, cy),
                color,
                thickness,
            });
            commands.push(DrawCommand::Line {
                from: (cx, cy),
                to: (cx, cy + dy * arm),
                color,
                thickness,
            });
        }

        commands
    }

    /// 状態に応じた色と線の太さ
    fn style(&self) -> (Color, i32) {
        if self.locked {
            (
                self.config.locked_color.into(),
                self.config.locked_thickness,
            )
        } else {
            (
                self.config.acquiring_color.into(),
                self.config.acquiring_thickness,
            )
        }
    }
}
