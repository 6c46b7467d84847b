/// お問い合わせ送信のドメインモデル
///
/// リクエストボディのパースと必須フィールドの存在チェックを行い、
/// ストアに保存するレコードを構築する。
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// 必須フィールド（チェック順）
const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

/// 送信内容のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// リクエストボディがJSONとしてパースできない、またはnull
    #[error("parse error: {0}")]
    ParseError(String),
    /// 必須フィールドが欠落（未指定・null・false・0・空文字列）
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// フィールドは存在するが文字列でない
    #[error("field must be a string: {0}")]
    NotText(&'static str),
}

/// 検証済みのお問い合わせ送信内容
///
/// name, email, messageはすべて空でない文字列であることが保証される。
/// emailの形式チェックは行わない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    name: String,
    email: String,
    message: String,
}

impl SubmissionInput {
    /// 必須フィールドを検証して送信内容を作成
    ///
    /// 空文字列は未指定と同じく欠落として扱う。空白のみの文字列は有効。
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let fields = Map::from_iter([
            ("name".to_string(), Value::String(name.into())),
            ("email".to_string(), Value::String(email.into())),
            ("message".to_string(), Value::String(message.into())),
        ]);
        Self::from_fields(Some(&fields))
    }

    /// リクエストボディ（JSONバイト列）をパースして検証する
    ///
    /// オブジェクト以外のボディ（配列・文字列・数値など）はフィールドなしとして扱う。
    ///
    /// # 戻り値
    /// * `Ok(SubmissionInput)` - 全フィールドが空でない文字列
    /// * `Err(ValidationError::ParseError)` - JSONとして不正、またはボディがnull
    /// * `Err(ValidationError::MissingField)` - いずれかのフィールドが欠落
    /// * `Err(ValidationError::NotText)` - 全フィールドが存在するが文字列でないものがある
    pub fn parse(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::ParseError(e.to_string()))?;

        match &value {
            Value::Object(fields) => Self::from_fields(Some(fields)),
            Value::Null => Err(ValidationError::ParseError("body is null".to_string())),
            _ => Self::from_fields(None),
        }
    }

    fn from_fields(fields: Option<&Map<String, Value>>) -> Result<Self, ValidationError> {
        // 型チェックより先に全フィールドの存在を確認する
        for field in REQUIRED_FIELDS {
            if !lookup(fields, field).is_some_and(is_truthy) {
                return Err(ValidationError::MissingField(field));
            }
        }

        Ok(Self {
            name: text(fields, "name")?,
            email: text(fields, "email")?,
            message: text(fields, "message")?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn lookup<'a>(fields: Option<&'a Map<String, Value>>, field: &str) -> Option<&'a Value> {
    fields.and_then(|fields| fields.get(field))
}

fn text(
    fields: Option<&Map<String, Value>>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match lookup(fields, field) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(ValidationError::NotText(field)),
    }
}

/// JSON値の真偽判定（null・false・0・空文字列が偽）
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(value) => value.as_f64().is_some_and(|n| n != 0.0),
        Value::String(value) => !value.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// ストアに保存するお問い合わせレコード
///
/// messageは受信したまま保存する（改行変換・エスケープは行わない）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub message: String,
    /// 作成日時（RFC 3339、UTC）
    pub created_at: String,
}

impl SubmissionRecord {
    /// 送信内容と作成日時からレコードを作成
    pub fn new(input: &SubmissionInput, created_at: DateTime<Utc>) -> Self {
        Self {
            name: input.name.clone(),
            email: input.email.clone(),
            message: input.message.clone(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
