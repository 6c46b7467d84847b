// ドメイン層モジュール
pub mod notification;
pub mod submission;
pub mod submission_response;

// 再エクスポート
pub use notification::{NotificationMessage, DEFAULT_SENDER};
pub use submission::{SubmissionInput, SubmissionRecord, ValidationError};
pub use submission_response::{ResponseBody, SubmissionOutcome};
