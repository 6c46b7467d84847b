// お問い合わせ送信ハンドラー
//
// リクエストを検証してストアに保存し、保存に成功した場合のみ運営者へ通知する。
// 保存までの失敗は呼び出し元へ返し、通知の失敗はログに記録して握りつぶす。

use chrono::Utc;
use lambda_http::http::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, Response};
use tracing::{error, info, warn};

use crate::domain::{
    NotificationMessage, SubmissionInput, SubmissionOutcome, SubmissionRecord, ValidationError,
};
use crate::infrastructure::{Notifier, SubmissionStore};

/// お問い合わせ送信ハンドラー
///
/// ストアと通知クライアントは呼び出し側で構築して注入する。
/// 通知設定がない場合は`notifier`に`None`を渡し、通知をスキップする。
pub struct SubmissionHandler<S, N>
where
    S: SubmissionStore,
    N: Notifier,
{
    store: S,
    notifier: Option<N>,
}

impl<S, N> SubmissionHandler<S, N>
where
    S: SubmissionStore,
    N: Notifier,
{
    pub fn new(store: S, notifier: Option<N>) -> Self {
        Self { store, notifier }
    }

    /// HTTPリクエストを処理してレスポンスを生成
    ///
    /// POST以外は405を返す。
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        if request.method() != Method::POST {
            warn!(method = %request.method(), "POST以外のリクエスト");
            let mut response = build_response(SubmissionOutcome::MethodNotAllowed);
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("POST"));
            return response;
        }

        let outcome = self.process(request.body().as_ref()).await;
        build_response(outcome)
    }

    /// リクエストボディを処理
    ///
    /// # 処理フロー
    /// 1. JSONパース（失敗時は予期しないエラー）
    /// 2. 必須フィールドの存在確認（欠落・文字列以外は400）
    /// 3. ストアへ保存（失敗時は500、通知は行わない）
    /// 4. 通知メール送信（結果は処理結果に影響しない）
    pub async fn process(&self, body: &[u8]) -> SubmissionOutcome {
        let input = match SubmissionInput::parse(body) {
            Ok(input) => input,
            Err(ValidationError::MissingField(field)) => {
                info!(field = field, "必須フィールドが欠落");
                return SubmissionOutcome::MissingFields;
            }
            Err(ValidationError::NotText(field)) => {
                info!(field = field, "フィールドが文字列でない");
                return SubmissionOutcome::MissingFields;
            }
            Err(ValidationError::ParseError(e)) => {
                error!(error = %e, "リクエストボディのパースに失敗");
                return SubmissionOutcome::Unexpected;
            }
        };

        let record = SubmissionRecord::new(&input, Utc::now());

        if let Err(e) = self.store.insert(&record).await {
            error!(error = %e, "お問い合わせの保存に失敗");
            return SubmissionOutcome::StoreFailed;
        }

        self.notify(&input).await;

        SubmissionOutcome::Accepted
    }

    /// 運営者へ通知（ベストエフォート）
    async fn notify(&self, input: &SubmissionInput) {
        let Some(notifier) = &self.notifier else {
            warn!("通知設定がないため通知メールをスキップ");
            return;
        };

        let message =
            NotificationMessage::from_submission(input, notifier.sender(), notifier.recipient());

        if let Err(e) = notifier.send(&message).await {
            // 保存済みのため処理結果は変えない
            error!(error = %e, "通知メールの送信に失敗");
        }
    }
}

/// 処理結果からJSONレスポンスを構築
pub fn build_response(outcome: SubmissionOutcome) -> Response<Body> {
    let mut response = Response::new(Body::Text(outcome.body_json()));

    *response.status_mut() =
        StatusCode::from_u16(outcome.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    response
}
