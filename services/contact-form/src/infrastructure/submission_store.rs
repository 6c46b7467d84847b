/// お問い合わせレコードの保存先
///
/// Supabase REST（PostgREST）の`contact_submissions`テーブルへ1件ずつ挿入する。
/// 再試行は行わず、失敗はそのまま呼び出し元へ返す（ログ出力は呼び出し元で行う）。
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::config::StoreConfig;
use crate::domain::SubmissionRecord;

/// ストア書き込みのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// ストアが成功以外のステータスを返した
    #[error("ストアが書き込みを拒否: status={status}, body={body}")]
    Rejected {
        /// HTTPステータスコード
        status: u16,
        /// ストアのエラーボディ
        body: String,
    },

    /// ネットワークエラー（タイムアウト・接続失敗を含む）
    #[error("ネットワークエラー: {0}")]
    NetworkError(String),
}

/// お問い合わせレコードの保存を抽象化するトレイト
///
/// 実際のSupabaseクライアントとテスト用モックを差し替え可能にする。
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// レコードを1件挿入する
    ///
    /// `Ok(())`を返した場合に限り、レコードはストアに存在する。
    async fn insert(&self, record: &SubmissionRecord) -> Result<(), StoreError>;
}

/// Supabase RESTクライアント
#[derive(Clone)]
pub struct SupabaseSubmissionStore {
    client: Client,
    config: StoreConfig,
}

impl std::fmt::Debug for SupabaseSubmissionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseSubmissionStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SupabaseSubmissionStore {
    /// 共有HTTPクライアントと接続設定からストアを作成
    pub fn new(client: Client, config: StoreConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl SubmissionStore for SupabaseSubmissionStore {
    async fn insert(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        let url = self.config.submissions_url();
        debug!(url = %url, "お問い合わせを保存");

        let response = self
            .client
            .post(&url)
            .header("apikey", self.config.api_key())
            .bearer_auth(self.config.api_key())
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            info!(status = %status, "お問い合わせの保存に成功");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        Err(StoreError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
