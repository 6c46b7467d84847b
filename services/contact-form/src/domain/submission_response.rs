/// お問い合わせ送信の処理結果
///
/// 呼び出し元へ返すHTTPステータスとJSONボディを表す。
/// ボディは常に`success`または`error`のどちらかを持つ1つのオブジェクト。
use serde::Serialize;

/// 処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 保存成功（通知の成否は問わない）
    Accepted,
    /// 必須フィールドの欠落
    MissingFields,
    /// ストアが書き込みを拒否した
    StoreFailed,
    /// POST以外のメソッド
    MethodNotAllowed,
    /// その他の予期しないエラー
    Unexpected,
}

/// レスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success {
        success: bool,
        message: &'static str,
    },
    Error {
        error: &'static str,
    },
}

impl SubmissionOutcome {
    /// HTTPステータスコード
    pub fn status(self) -> u16 {
        match self {
            Self::Accepted => 200,
            Self::MissingFields => 400,
            Self::MethodNotAllowed => 405,
            Self::StoreFailed | Self::Unexpected => 500,
        }
    }

    pub fn body(self) -> ResponseBody {
        match self {
            Self::Accepted => ResponseBody::Success {
                success: true,
                message: "Form submitted successfully!",
            },
            Self::MissingFields => ResponseBody::Error {
                error: "All fields are required",
            },
            Self::StoreFailed => ResponseBody::Error {
                error: "Failed to save submission",
            },
            Self::MethodNotAllowed => ResponseBody::Error {
                error: "Method not allowed",
            },
            Self::Unexpected => ResponseBody::Error {
                error: "An unexpected error occurred",
            },
        }
    }

    /// ボディをJSON文字列にシリアライズ
    pub fn body_json(self) -> String {
        // フィールドはすべて静的文字列なのでシリアライズは失敗しない
        serde_json::to_string(&self.body())
            .unwrap_or_else(|_| r#"{"error":"An unexpected error occurred"}"#.to_string())
    }
}
