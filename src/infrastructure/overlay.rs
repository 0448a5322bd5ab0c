//! オーバーレイ描画・表示実装（Infrastructure層）
//!
//! OpenCVのimgproc/highguiを使用してRenderPort traitを実装します。
//! コアが生成した描画命令列をフレームに焼き込み、ウィンドウへ表示し、
//! 終了キー（q / ESC)を監視する。

use opencv::{
    core::{Mat, Point, Scalar},
    highgui,
    imgproc::{self, FONT_HERSHEY_DUPLEX, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

use crate::domain::{
    Color, DisplayEvent, DomainError, DomainResult, DrawCommand, FontKind, Frame, RenderPort,
};

const KEY_ESC: i32 = 27;
const KEY_Q: i32 = 113;

/// OpenCVオーバーレイアダプタ
pub struct OpenCvOverlayAdapter {
    window_title: String,
    window_created: bool,
}

impl OpenCvOverlayAdapter {
    /// 新しいオーバーレイアダプタを作成（ウィンドウは初回表示時に生成）
    pub fn new(window_title: &str) -> Self {
        Self {
            window_title: window_title.to_string(),
            window_created: false,
        }
    }

    /// FrameのBGRバイト列からMatを再構成
    fn to_mat(frame: &Frame) -> DomainResult<Mat> {
        let expected = (frame.width * frame.height * 3) as usize;
        if frame.data.len() != expected {
            return Err(DomainError::Render(format!(
                "Frame data length {} does not match {}x{}x3",
                frame.data.len(),
                frame.width,
                frame.height
            )));
        }

        let flat = Mat::from_slice(&frame.data)
            .map_err(|e| DomainError::Render(format!("Failed to wrap frame data: {:?}", e)))?;
        let image = flat
            .reshape(3, frame.height as i32)
            .map_err(|e| DomainError::Render(format!("Failed to reshape frame: {:?}", e)))?;
        image
            .try_clone()
            .map_err(|e| DomainError::Render(format!("Failed to clone frame: {:?}", e)))
    }

    /// 1つの描画命令をキャンバスへ適用
    fn apply(canvas: &mut Mat, command: &DrawCommand) -> DomainResult<()> {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                thickness,
            } => imgproc::line(
                canvas,
                Point::new(from.0, from.1),
                Point::new(to.0, to.1),
                Self::scalar(*color),
                *thickness,
                LINE_8,
                0,
            )
            .map_err(|e| DomainError::Render(format!("Failed to draw line: {:?}", e))),
            DrawCommand::Circle {
                center,
                radius,
                color,
                thickness,
            } => imgproc::circle(
                canvas,
                Point::new(center.0, center.1),
                *radius,
                Self::scalar(*color),
                *thickness,
                LINE_8,
                0,
            )
            .map_err(|e| DomainError::Render(format!("Failed to draw circle: {:?}", e))),
            DrawCommand::Text {
                text,
                origin,
                font,
                scale,
                color,
                thickness,
            } => imgproc::put_text(
                canvas,
                text,
                Point::new(origin.0, origin.1),
                Self::font_face(*font),
                *scale,
                Self::scalar(*color),
                *thickness,
                LINE_8,
                false,
            )
            .map_err(|e| DomainError::Render(format!("Failed to draw text: {:?}", e))),
        }
    }

    fn scalar(color: Color) -> Scalar {
        Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
    }

    fn font_face(font: FontKind) -> i32 {
        match font {
            FontKind::Plain => FONT_HERSHEY_SIMPLEX,
            FontKind::Bold => FONT_HERSHEY_DUPLEX,
        }
    }
}

impl RenderPort for OpenCvOverlayAdapter {
    fn render(&mut self, frame: &Frame, commands: &[DrawCommand]) -> DomainResult<DisplayEvent> {
        let mut canvas = Self::to_mat(frame)?;

        for command in commands {
            Self::apply(&mut canvas, command)?;
        }

        if !self.window_created {
            // WINDOW_AUTOSIZEで等倍表示（リサイズ不可）
            let _ = highgui::named_window(&self.window_title, highgui::WINDOW_AUTOSIZE);
            self.window_created = true;
        }

        highgui::imshow(&self.window_title, &canvas)
            .map_err(|e| DomainError::Render(format!("Failed to show frame: {:?}", e)))?;

        let key = highgui::wait_key(1)
            .map_err(|e| DomainError::Render(format!("Failed to wait for key: {:?}", e)))?;

        if key == KEY_ESC || key == KEY_Q {
            let _ = highgui::destroy_all_windows();
            return Ok(DisplayEvent::Quit);
        }

        Ok(DisplayEvent::Continue)
    }
}
