/// 運営者への通知メール送信
///
/// Resend APIへ通知メールを送信する。送信結果はベストエフォートで、
/// 失敗してもお問い合わせの処理結果には影響しない。
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::config::NotifierConfig;
use crate::domain::NotificationMessage;

/// 通知送信のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NotifyError {
    /// メールプロバイダーが成功以外のステータスを返した
    #[error("メール送信エラー: status={status}, body={body}")]
    Rejected {
        /// HTTPステータスコード
        status: u16,
        /// プロバイダーのエラーボディ
        body: String,
    },

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    NetworkError(String),
}

/// 通知メール送信用トレイト
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 通知先アドレス
    fn recipient(&self) -> &str;

    /// 送信元アドレス
    fn sender(&self) -> &str;

    /// 通知メールを1通送信する
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotifyError>;
}

/// Resend API通知実装
#[derive(Clone)]
pub struct ResendNotifier {
    client: Client,
    config: NotifierConfig,
}

impl std::fmt::Debug for ResendNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendNotifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ResendNotifier {
    pub fn new(client: Client, config: NotifierConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    fn recipient(&self) -> &str {
        self.config.recipient()
    }

    fn sender(&self) -> &str {
        self.config.sender()
    }

    async fn send(&self, message: &NotificationMessage) -> Result<(), NotifyError> {
        debug!(url = self.config.api_url(), "通知メールを送信");

        let response = self
            .client
            .post(self.config.api_url())
            .bearer_auth(self.config.api_key())
            .json(message)
            .send()
            .await
            .map_err(|e| NotifyError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            info!(status = %status, "通知メールの送信に成功");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::SubmissionInput;
    use crate::infrastructure::build_http_client;
    use std::sync::{Arc, Mutex};
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    /// ユニットテスト用のモック通知
    #[derive(Debug, Clone, Default)]
    pub struct MockNotifier {
        /// 送信されたメッセージ
        sent: Arc<Mutex<Vec<NotificationMessage>>>,
        /// 設定されている場合はこのエラーを返す
        failure: Arc<Mutex<Option<NotifyError>>>,
    }

    impl MockNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing(error: NotifyError) -> Self {
            let notifier = Self::new();
            *notifier.failure.lock().unwrap() = Some(error);
            notifier
        }

        /// 送信を試みたメッセージ（失敗したものも含む）
        pub fn sent(&self) -> Vec<NotificationMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        fn recipient(&self) -> &str {
            "owner@example.com"
        }

        fn sender(&self) -> &str {
            crate::domain::DEFAULT_SENDER
        }

        async fn send(&self, message: &NotificationMessage) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(message.clone());
            match self.failure.lock().unwrap().clone() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    fn sample_message() -> NotificationMessage {
        let input = SubmissionInput::new("Ana", "ana@x.com", "Hi\nthere").unwrap();
        NotificationMessage::from_submission(
            &input,
            crate::domain::DEFAULT_SENDER,
            "owner@example.com",
        )
    }

    fn notifier_for(server: &MockServer) -> ResendNotifier {
        let config = NotifierConfig::new("re_key", "owner@example.com")
            .with_api_url(format!("{}/emails", server.uri()));
        ResendNotifier::new(build_http_client().unwrap(), config)
    }

    #[tokio::test]
    async fn test_send_posts_message() {
        let server = MockServer::start().await;
        let message = sample_message();

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/emails"))
            .and(matchers::header("Authorization", "Bearer re_key"))
            .and(matchers::body_json(serde_json::to_value(&message).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"abc"}"#))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(notifier_for(&server).send(&message).await, Ok(()));
    }

    #[tokio::test]
    async fn test_send_rejected() {
        let server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid to"))
            .mount(&server)
            .await;

        let result = notifier_for(&server).send(&sample_message()).await;
        assert_eq!(
            result,
            Err(NotifyError::Rejected {
                status: 422,
                body: "invalid to".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_send_network_error() {
        let config = NotifierConfig::new("re_key", "owner@example.com")
            .with_api_url("http://127.0.0.1:1/emails");
        let notifier = ResendNotifier::new(build_http_client().unwrap(), config);

        let result = notifier.send(&sample_message()).await;
        assert!(matches!(result, Err(NotifyError::NetworkError(_))));
    }

    #[test]
    fn test_recipient_and_sender_from_config() {
        let config = NotifierConfig::new("re_key", "owner@example.com")
            .with_sender("Site <noreply@example.com>");
        let notifier = ResendNotifier::new(build_http_client().unwrap(), config);

        assert_eq!(notifier.recipient(), "owner@example.com");
        assert_eq!(notifier.sender(), "Site <noreply@example.com>");
        assert!(!format!("{:?}", notifier).contains("re_key"));
    }
}
