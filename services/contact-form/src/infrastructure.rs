// インフラストラクチャ層モジュール
pub mod config;
pub mod http_client;
pub mod logging;
pub mod notifier;
pub mod submission_store;

// 再エクスポート
pub use config::{ConfigError, NotifierConfig, StoreConfig, DEFAULT_RESEND_API_URL};
pub use http_client::{build_http_client, HttpClientError};
pub use logging::init_logging;
pub use notifier::{Notifier, NotifyError, ResendNotifier};
pub use submission_store::{StoreError, SubmissionStore, SupabaseSubmissionStore};
