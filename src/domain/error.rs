/// エラー型定義
///
/// Domain層の統一エラー型。thiserrorを使用して型安全なエラー処理を提供します。
///
/// # 設計方針
/// - unwrap()の使用を禁止し、明示的なエラーハンドリングを強制
/// - Result型でエラー伝播を明示化
/// - コア（状態機械・平滑化）は全域関数でありエラーを返さない。
///   エラーを発生させるのはアダプタ（カメラ・推論・描画）のみ。

use thiserror::Error;

/// Domain層の統一エラー型
#[derive(Error, Debug)]
pub enum DomainError {
    /// カメラキャプチャ関連のエラー
    #[error("Capture error: {0}")]
    Capture(String),

    /// 推論（ジェスチャー/顔ランドマーク）関連のエラー
    #[error("Inference error: {0}")]
    Inference(String),

    /// 描画・表示関連のエラー
    #[error("Render error: {0}")]
    Render(String),

    /// 設定関連のエラー
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 初期化エラー
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// その他のエラー
    #[error("Unexpected error: {0}")]
    Other(String),
}

/// Domain層の統一Result型
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::Capture("camera 0 not found".to_string());
        assert_eq!(err.to_string(), "Capture error: camera 0 not found");

        let err = DomainError::Configuration("bad window size".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad window size");
    }
}
