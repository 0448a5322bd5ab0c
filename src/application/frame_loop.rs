//! フレームループ制御モジュール
//!
//! 外部ポート（キャプチャ・ジェスチャー・アンカー・描画）を束ね、
//! 1フレームにつき1回ずつ信号収集 → セッション判定 → 描画命令生成 →
//! 表示を行う単一スレッドの駆動部。コアの状態はすべてTargetingSessionが
//! 所有し、このループ以外から触れられることはない。

use std::time::{Duration, Instant};

use crate::application::session::TargetingSession;
use crate::domain::{
    AnchorPort, AppConfig, CapturePort, Color, DisplayEvent, DomainError, DomainResult,
    DrawCommand, FontKind, FrameVerdict, GesturePort, OverlayConfig, RenderPort, ThreatLevel,
};

/// ステータステキストの色（BGR、UI固有の固定値）
const COLOR_CALM: Color = Color::new(0, 255, 0);
const COLOR_HOSTILE: Color = Color::new(0, 0, 255);
const COLOR_LOCKED: Color = Color::new(0, 0, 200);
const COLOR_SHADOW: Color = Color::new(0, 0, 0);
const COLOR_THREAT: Color = Color::new(0, 0, 255);
const COLOR_FPS: Color = Color::new(100, 100, 100);
const COLOR_HELP: Color = Color::new(150, 150, 150);

/// 連続キャプチャ失敗の許容回数（超えたら致命的エラー）
const MAX_CONSECUTIVE_CAPTURE_ERRORS: u32 = 120;

/// フレームループ実行コンテキスト
pub struct FrameLoop<C, G, A, R>
where
    C: CapturePort,
    G: GesturePort,
    A: AnchorPort,
    R: RenderPort,
{
    capture: C,
    gestures: G,
    anchor: A,
    render: R,
    session: TargetingSession,
    overlay: OverlayConfig,
    started_at: Instant,
}

impl<C, G, A, R> FrameLoop<C, G, A, R>
where
    C: CapturePort,
    G: GesturePort,
    A: AnchorPort,
    R: RenderPort,
{
    /// 新しいFrameLoopを作成
    pub fn new(capture: C, gestures: G, anchor: A, render: R, config: &AppConfig) -> Self {
        Self {
            capture,
            gestures,
            anchor,
            render,
            session: TargetingSession::new(config),
            overlay: config.overlay.clone(),
            started_at: Instant::now(),
        }
    }

    /// フレームループを起動（ブロッキング）
    ///
    /// ユーザーの終了要求（qキー / ESC）で正常に戻る。
    /// キャプチャの一時的な失敗はログを出してリトライし、
    /// 連続失敗が閾値を超えた場合のみエラーを返す。
    pub fn run(&mut self) -> DomainResult<()> {
        let mut consecutive_capture_errors = 0u32;

        loop {
            #[cfg(debug_assertions)]
            let _frame_span = crate::logging::SpanTimer::new("frame");

            let frame_start = Instant::now();

            let frame = match self.capture.capture_frame() {
                Ok(Some(frame)) => {
                    consecutive_capture_errors = 0;
                    frame
                }
                Ok(None) => {
                    // フレーム更新なし
                    std::thread::sleep(Duration::from_millis(1));
                    continue;
                }
                Err(e) => {
                    consecutive_capture_errors += 1;
                    tracing::warn!(
                        "Capture error ({}/{}): {:?}",
                        consecutive_capture_errors,
                        MAX_CONSECUTIVE_CAPTURE_ERRORS,
                        e
                    );
                    if consecutive_capture_errors > MAX_CONSECUTIVE_CAPTURE_ERRORS {
                        return Err(DomainError::Capture(
                            "Too many consecutive capture failures".to_string(),
                        ));
                    }
                    std::thread::sleep(Duration::from_millis(10));
                    continue;
                }
            };

            let gestures = self.gestures.detect_gestures(&frame)?;
            let anchor = self.anchor.locate_anchor(&frame)?;

            let signals = crate::domain::FrameSignals {
                gestures,
                anchor,
                now: Instant::now(),
                frame_duration: frame_start.elapsed(),
            };
            let verdict = self.session.process_frame(&signals);

            let mut commands = self.session.reticle().draw_commands();
            commands.extend(self.status_commands(&verdict, frame.width, frame.height));

            if self.render.render(&frame, &commands)? == DisplayEvent::Quit {
                tracing::info!("User requested exit");
                return Ok(());
            }
        }
    }

    /// ステータスUIの描画命令を生成
    ///
    /// 脅威レベルに応じたステータステキスト（影付き）、検出中の脅威レベル
    /// 表示、FPS、操作ヘルプ。ロック中はステータステキストが
    /// (5·sin(20t), 3·cos(15t)) ピクセルで揺れる。
    fn status_commands(&self, verdict: &FrameVerdict, width: u32, height: u32) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        let threat = ThreatLevel::from_verdict(verdict);

        let (status_text, status_color) = match threat {
            ThreatLevel::Calm => (self.overlay.calm_text.as_str(), COLOR_CALM),
            ThreatLevel::Hostile => (self.overlay.hostile_text.as_str(), COLOR_HOSTILE),
            ThreatLevel::Locked => (self.overlay.locked_text.as_str(), COLOR_LOCKED),
        };

        let (shake_x, shake_y) = if threat == ThreatLevel::Locked {
            let t = self.started_at.elapsed().as_secs_f64();
            (
                (5.0 * (t * 20.0).sin()) as i32,
                (3.0 * (t * 15.0).cos()) as i32,
            )
        } else {
            (0, 0)
        };

        let text_x = 20 + shake_x;
        let text_y = 50 + shake_y;

        // 影 → 本体の順に重ねる
        commands.push(DrawCommand::Text {
            text: status_text.to_string(),
            origin: (text_x + 2, text_y + 2),
            font: FontKind::Bold,
            scale: 1.2,
            color: COLOR_SHADOW,
            thickness: 4,
        });
        commands.push(DrawCommand::Text {
            text: status_text.to_string(),
            origin: (text_x, text_y),
            font: FontKind::Bold,
            scale: 1.2,
            color: status_color,
            thickness: 3,
        });

        if verdict.hostile {
            commands.push(DrawCommand::Text {
                text: self.overlay.threat_text.clone(),
                origin: (text_x, text_y + 40),
                font: FontKind::Plain,
                scale: 0.7,
                color: COLOR_THREAT,
                thickness: 2,
            });
        }

        if self.overlay.show_fps {
            commands.push(DrawCommand::Text {
                text: format!("FPS: {:.0}", verdict.fps),
                origin: (width as i32 - 100, 25),
                font: FontKind::Plain,
                scale: 0.6,
                color: COLOR_FPS,
                thickness: 1,
            });
        }

        commands.push(DrawCommand::Text {
            text: self.overlay.help_text.clone(),
            origin: (20, height as i32 - 20),
            font: FontKind::Plain,
            scale: 0.5,
            color: COLOR_HELP,
            thickness: 1,
        });

        commands
    }

    /// セッションへの参照（テスト・診断用）
    pub fn session(&self) -> &TargetingSession {
        &self.session
    }
}
