/// Port定義（Clean Architectureのインターフェース）
///
/// Domain層が外部実装に依存するための抽象trait。
/// Infrastructure層がこれらを実装し、FrameLoopへDIで注入される。
/// ランドマークモデルをグローバルに持たないのはこの分離のため。

use crate::domain::{AnchorPoint, DomainResult, DrawCommand, Frame};

/// キャプチャポート: 映像フレームの取得を抽象化
pub trait CapturePort {
    /// フレームをキャプチャする
    ///
    /// # Returns
    /// - `Ok(Some(Frame))`: フレームの取得成功（BGR、左右反転適用済み）
    /// - `Ok(None)`: 新しいフレームなし（呼び出し側でリトライ）
    /// - `Err(DomainError)`: キャプチャエラー
    fn capture_frame(&mut self) -> DomainResult<Option<Frame>>;

    /// キャプチャデバイスの情報を取得
    fn device_info(&self) -> DeviceInfo;
}

/// デバイス情報
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub name: String,
}

/// ジェスチャーポート: 手ランドマーク推論を抽象化
///
/// コアはランドマークを一切解釈せず、手ごとの判定済みbooleanのみを受け取る。
pub trait GesturePort {
    /// フレーム内の各手について敵対ジェスチャー判定を返す
    ///
    /// # Returns
    /// - `Ok(vec![...])`: 検出された手ごとの生判定（手がなければ空）
    /// - `Err(DomainError)`: 推論エラー
    fn detect_gestures(&mut self, frame: &Frame) -> DomainResult<Vec<bool>>;
}

/// アンカーポート: 顔ランドマーク推論を抽象化
///
/// アンカーはフレームピクセル座標へ投影済みで、額オフセット規約
/// （複数ランドマーク位置の平均を40ピクセル上へシフト）適用後の値。
pub trait AnchorPort {
    /// フレーム内のアンカー位置を返す（顔がなければNone）
    fn locate_anchor(&mut self, frame: &Frame) -> DomainResult<Option<AnchorPoint>>;
}

/// 表示ループへのイベント通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    /// 継続
    Continue,
    /// ユーザーによる終了要求（qキー / ESC）
    Quit,
}

/// レンダーポート: 描画命令の実行と表示を抽象化
pub trait RenderPort {
    /// フレームに描画命令を適用して表示し、入力イベントを返す
    ///
    /// # Arguments
    /// - `frame`: 表示するフレーム
    /// - `commands`: このフレームの描画命令列（決定的な座標・色）
    fn render(&mut self, frame: &Frame, commands: &[DrawCommand]) -> DomainResult<DisplayEvent>;
}
