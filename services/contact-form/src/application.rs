// アプリケーション層モジュール
pub mod submission_handler;

// 再エクスポート
pub use submission_handler::{build_response, SubmissionHandler};
