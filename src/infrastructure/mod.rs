//! Infrastructure層: 外部技術の統合
//!
//! Domain層のtraitを実装し、外部ライブラリ（OpenCV）と接続する。
//! ランドマーク推論が未統合の間はモックプロバイダが信号を供給する。

pub mod camera;
pub mod mock_capture;
pub mod mock_signals;
pub mod overlay;
