//! Application Layer
//!
//! ターゲティングのユースケース（信号平滑化、レティクル状態機械、
//! セッション判定、フレームループ駆動）を実装します。
//!
//! ## モジュール構成
//! - `stabilizer`: ジェスチャー信号の多数決平滑化
//! - `reticle`: レティクル状態機械とアニメーション
//! - `fps`: FPS移動平均ウィンドウ
//! - `session`: 1フレームごとのターゲティング判定
//! - `frame_loop`: ポートを束ねる単一スレッドの駆動ループ

pub mod fps;
pub mod frame_loop;
pub mod reticle;
pub mod session;
pub mod stabilizer;

pub use fps::FpsWindow;
pub use frame_loop::FrameLoop;
pub use reticle::Reticle;
pub use session::TargetingSession;
pub use stabilizer::GestureStabilizer;
