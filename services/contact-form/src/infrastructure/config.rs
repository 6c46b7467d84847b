// 外部サービス接続設定
//
// Supabase REST（ストア）とResend（通知メール）の接続設定を環境変数から読み込む。
// 設定は呼び出しごとに読み込み、APIキーはDebug出力に含めない。

use crate::domain::DEFAULT_SENDER;
use thiserror::Error;
use url::Url;

/// デフォルトのResend送信エンドポイント
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// 必須の環境変数が設定されていない
    #[error("必須の環境変数が設定されていません: {0}")]
    MissingEnvVar(String),

    /// URLとして解釈できない
    #[error("不正なURLです: {name}: {reason}")]
    InvalidUrl {
        /// 環境変数名
        name: String,
        /// パースエラーの内容
        reason: String,
    },
}

/// 空文字列は未設定として扱う
fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    read_env(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_url(name: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value).map(|_| ()).map_err(|e| ConfigError::InvalidUrl {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Supabase REST接続設定
///
/// # フィールド
/// - `base_url`: SupabaseプロジェクトのベースURL (例: "https://xxx.supabase.co")
/// - `api_key`: APIキー（`apikey`ヘッダーとBearerトークンの両方に使用）
#[derive(Clone)]
pub struct StoreConfig {
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `NEXT_PUBLIC_SUPABASE_URL`: SupabaseのベースURL（必須）
    /// - `NEXT_PUBLIC_SUPABASE_ANON_KEY`: APIキー（必須）
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = require_env("NEXT_PUBLIC_SUPABASE_URL")?;
        parse_url("NEXT_PUBLIC_SUPABASE_URL", &base_url)?;

        let api_key = require_env("NEXT_PUBLIC_SUPABASE_ANON_KEY")?;

        Ok(Self { base_url, api_key })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// お問い合わせテーブルのRESTエンドポイントURLを構築
    ///
    /// # 戻り値
    /// 例: "https://xxx.supabase.co/rest/v1/contact_submissions"
    pub fn submissions_url(&self) -> String {
        format!(
            "{}/rest/v1/contact_submissions",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Resend通知設定
#[derive(Clone)]
pub struct NotifierConfig {
    api_url: String,
    api_key: String,
    sender: String,
    recipient: String,
}

impl std::fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("api_url", &self.api_url)
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

impl NotifierConfig {
    /// デフォルトのエンドポイントと送信元で設定を作成
    pub fn new(api_key: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_RESEND_API_URL.to_string(),
            api_key: api_key.into(),
            sender: DEFAULT_SENDER.to_string(),
            recipient: recipient.into(),
        }
    }

    /// 送信エンドポイントを差し替える
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// 送信元アドレスを差し替える
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `RESEND_API_KEY`: Resend APIキー（必須）
    /// - `CONTACT_EMAIL`: 通知先アドレス（必須）
    /// - `CONTACT_FROM`: 送信元アドレス（任意）
    /// - `RESEND_API_URL`: 送信エンドポイント（任意）
    ///
    /// 通知は任意機能のため、呼び出し側はエラー時に通知をスキップする。
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = require_env("RESEND_API_KEY")?;
        let recipient = require_env("CONTACT_EMAIL")?;

        let mut config = Self::new(api_key, recipient);

        if let Some(api_url) = read_env("RESEND_API_URL") {
            parse_url("RESEND_API_URL", &api_url)?;
            config = config.with_api_url(api_url);
        }

        if let Some(sender) = read_env("CONTACT_FROM") {
            config = config.with_sender(sender);
        }

        Ok(config)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}
