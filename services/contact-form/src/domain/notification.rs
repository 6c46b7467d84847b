// 運営者向け通知メール
//
// 送信内容から件名とHTML本文を組み立てる。通知は保存されず、
// 送信に失敗してもレコードの存在には影響しない。

use serde::Serialize;

use super::SubmissionInput;

/// デフォルトの送信元アドレス
pub const DEFAULT_SENDER: &str = "Contact Form <onboarding@resend.dev>";

/// 通知メール
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl NotificationMessage {
    /// 送信内容から通知メールを作成
    ///
    /// # Arguments
    /// * `input` - 検証済みの送信内容
    /// * `from` - 送信元アドレス
    /// * `to` - 通知先アドレス
    pub fn from_submission(
        input: &SubmissionInput,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: format!("New Contact Form Submission from {}", input.name()),
            html: Self::render_html(input),
        }
    }

    fn render_html(input: &SubmissionInput) -> String {
        format!(
            "<h2>New Contact Form Submission</h2>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Message:</strong></p>\n\
             <p>{}</p>\n",
            escape_html(input.name()),
            escape_html(input.email()),
            newlines_to_breaks(&escape_html(input.message())),
        )
    }
}

/// HTML特殊文字をエスケープ
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 改行を`<br>`に変換（エスケープ後に適用すること）
fn newlines_to_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(message: &str) -> NotificationMessage {
        let input = SubmissionInput::new("Ana", "ana@x.com", message).unwrap();
        NotificationMessage::from_submission(&input, DEFAULT_SENDER, "owner@example.com")
    }

    #[test]
    fn test_subject_contains_name() {
        let message = sample("Hi");
        assert_eq!(message.subject, "New Contact Form Submission from Ana");
    }

    #[test]
    fn test_sender_and_recipient() {
        let message = sample("Hi");
        assert_eq!(message.from, "Contact Form <onboarding@resend.dev>");
        assert_eq!(message.to, "owner@example.com");
    }

    #[test]
    fn test_html_contains_all_fields() {
        let message = sample("Hello");
        assert!(message.html.contains("<h2>New Contact Form Submission</h2>"));
        assert!(message.html.contains("<p><strong>Name:</strong> Ana</p>"));
        assert!(message.html.contains("<p><strong>Email:</strong> ana@x.com</p>"));
        assert!(message.html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_newlines_become_breaks() {
        let message = sample("Hi\nthere\n\nbye");
        assert!(message.html.contains("<p>Hi<br>there<br><br>bye</p>"));
        assert!(!message.html.contains("Hi\nthere"));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let input = SubmissionInput::new("<script>", "a&b@x.com", "1 < 2\n\"q\" 'a'").unwrap();
        let message =
            NotificationMessage::from_submission(&input, DEFAULT_SENDER, "owner@example.com");

        assert!(message.html.contains("<strong>Name:</strong> &lt;script&gt;"));
        assert!(message.html.contains("a&amp;b@x.com"));
        assert!(message.html.contains("1 &lt; 2<br>&quot;q&quot; &#39;a&#39;"));
        assert!(!message.html.contains("<script>"));
    }

    #[test]
    fn test_serializes_as_provider_payload() {
        let json = serde_json::to_value(sample("Hi")).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert!(obj.contains_key("from"));
        assert!(obj.contains_key("to"));
        assert!(obj.contains_key("subject"));
        assert!(obj.contains_key("html"));
    }
}
