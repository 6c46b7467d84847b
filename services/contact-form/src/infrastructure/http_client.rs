// 外部API呼び出し用の共有HTTPクライアント
//
// Lambdaのwarm start間でコネクションを再利用するため、mainで一度だけ構築し
// ハンドラーへ明示的に渡す。再試行は行わない。

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// リクエストタイムアウト（秒）
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 接続タイムアウト（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTPクライアント構築エラー
#[derive(Debug, Error)]
#[error("HTTPクライアントの構築に失敗: {0}")]
pub struct HttpClientError(#[from] reqwest::Error);

/// タイムアウト設定済みのHTTPクライアントを構築
pub fn build_http_client() -> Result<Client, HttpClientError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }

    #[test]
    fn test_timeouts() {
        assert_eq!(REQUEST_TIMEOUT_SECS, 30);
        assert_eq!(CONNECT_TIMEOUT_SECS, 10);
    }
}
