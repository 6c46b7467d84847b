/// お問い合わせフォームHTTP Lambdaエントリポイント
///
/// Lambda Function URL経由のPOSTリクエストを受け取り、
/// 送信内容をSupabaseに保存して運営者へ通知メールを送る。
use contact_form::application::{build_response, SubmissionHandler};
use contact_form::domain::SubmissionOutcome;
use contact_form::infrastructure::{
    build_http_client, init_logging, NotifierConfig, ResendNotifier, StoreConfig,
    SupabaseSubmissionStore,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use reqwest::Client;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("お問い合わせLambda関数を初期化");

    // warm start間でコネクションを再利用するため一度だけ構築する
    let client = build_http_client()?;

    run(service_fn(move |request: Request| {
        let client = client.clone();
        async move { handler(client, request).await }
    }))
    .await
}

/// HTTPリクエストハンドラー
///
/// 設定は呼び出しごとに環境変数から読み込む。
/// ストア設定がない場合は予期しないエラーとして500を返し、
/// 通知設定がない場合は通知なしで処理を続ける。
async fn handler(client: Client, request: Request) -> Result<Response<Body>, Error> {
    info!(method = %request.method(), "お問い合わせリクエスト受信");

    let store_config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "ストア設定の読み込みに失敗");
            return Ok(build_response(SubmissionOutcome::Unexpected));
        }
    };

    let notifier = match NotifierConfig::from_env() {
        Ok(config) => Some(ResendNotifier::new(client.clone(), config)),
        Err(e) => {
            warn!(error = %e, "通知設定の読み込みに失敗");
            None
        }
    };

    let store = SupabaseSubmissionStore::new(client, store_config);
    let submission_handler = SubmissionHandler::new(store, notifier);

    let response = submission_handler.handle(&request).await;

    info!(status = response.status().as_u16(), "お問い合わせレスポンス送信");

    Ok(response)
}
