//! Email parameter extraction via constrained generation.
//!
//! `EmailExtractor` asks the model for a strict JSON object with the fields
//! `to`, `subject`, `content`, then recovers it defensively: locate the
//! outermost brace span (models wrap payloads in prose despite instructions),
//! parse strictly, and on failure retry once after normalizing near-JSON
//! (single quotes, Python literals, trailing commas). Double failure is a
//! named error, never a guessed partial payload.

use serde::Deserialize;

use errandry_types::email::{EmailExtractError, EmailRequest};
use errandry_types::llm::{GenerationRequest, PromptMessage, PromptRole};

use crate::port::TextGenerator;

/// System prompt for the extraction call.
pub const EXTRACT_SYSTEM_PROMPT: &str = r#"You are an AI assistant. Extract email fields STRICTLY in valid JSON.
Respond ONLY with JSON, no explanations, no backticks.
Format:
{
  "to": "recipient@example.com",
  "subject": "Subject here",
  "content": "Body content here"
}
Ensure:
- Use double quotes
- Escape any quotes inside content
- Do not include extra text"#;

/// Output budget for the extraction call; bodies are short but not tiny.
const EXTRACT_MAX_TOKENS: u32 = 1024;

/// Subject used when the model omits one.
const DEFAULT_SUBJECT: &str = "No Subject";

/// Raw payload as returned by the model before validation.
#[derive(Debug, Deserialize)]
struct RawEmailPayload {
    to: Option<String>,
    subject: Option<String>,
    content: Option<String>,
}

/// Stateless utility for recovering an [`EmailRequest`] from free text.
pub struct EmailExtractor;

impl EmailExtractor {
    /// Extract and validate email fields from the latest user message.
    ///
    /// A generation fault surfaces as `EmailExtractError::Generation` and
    /// stays fatal for the turn; every other failure is a terminal branch
    /// outcome the router turns into transcript text.
    #[tracing::instrument(
        name = "extract_email",
        skip(generator, user_text),
        fields(provider = generator.name())
    )]
    pub async fn extract<G: TextGenerator>(
        generator: &G,
        user_text: &str,
    ) -> Result<EmailRequest, EmailExtractError> {
        let request = GenerationRequest {
            messages: vec![PromptMessage {
                role: PromptRole::User,
                content: user_text.to_string(),
            }],
            system: Some(EXTRACT_SYSTEM_PROMPT.to_string()),
            temperature: 0.0,
            max_tokens: EXTRACT_MAX_TOKENS,
        };

        let raw = generator.complete(&request).await?;
        Self::parse_payload(&raw)
    }

    /// Recover a payload from raw model output.
    fn parse_payload(raw: &str) -> Result<EmailRequest, EmailExtractError> {
        let span = outermost_brace_span(raw).ok_or(EmailExtractError::MissingPayload)?;

        let payload: RawEmailPayload = match serde_json::from_str(span) {
            Ok(payload) => payload,
            Err(strict_err) => {
                let relaxed = relax_json(span);
                match serde_json::from_str(&relaxed) {
                    Ok(payload) => {
                        tracing::debug!("strict JSON parse failed; relaxed retry succeeded");
                        payload
                    }
                    Err(_) => return Err(EmailExtractError::Parse(strict_err.to_string())),
                }
            }
        };

        let to = payload.to.unwrap_or_default();
        if to.is_empty() || !to.contains('@') {
            return Err(EmailExtractError::InvalidRecipient);
        }

        Ok(EmailRequest {
            to,
            subject: payload
                .subject
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            body: payload.content.unwrap_or_default(),
        })
    }
}

/// The outermost brace-delimited span: first `{` to last `}`.
///
/// Tolerates commentary around the payload; returns `None` when no such span
/// exists.
fn outermost_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Normalize near-JSON into strict JSON for one retry.
///
/// Handles the shapes models actually emit when they drift from the format
/// instruction: single-quoted strings, bare `True`/`False`/`None`, and
/// trailing commas before a closer. String contents are preserved exactly.
fn relax_json(text: &str) -> String {
    enum Ctx {
        Plain,
        Double,
        Single,
    }

    fn flush_word(out: &mut String, word: &mut String) {
        match word.as_str() {
            "" => {}
            "True" => out.push_str("true"),
            "False" => out.push_str("false"),
            "None" => out.push_str("null"),
            other => out.push_str(other),
        }
        word.clear();
    }

    let mut ctx = Ctx::Plain;
    let mut escaped = false;
    let mut out = String::with_capacity(text.len() + 8);
    // Bare identifier run outside strings, buffered for keyword replacement.
    let mut word = String::new();
    // Whitespace after a held comma; the comma drops if a closer follows.
    let mut comma_ws: Option<String> = None;

    for c in text.chars() {
        match ctx {
            Ctx::Double => {
                if escaped {
                    out.push('\\');
                    out.push(c);
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else {
                    if c == '"' {
                        ctx = Ctx::Plain;
                    }
                    out.push(c);
                }
            }
            Ctx::Single => {
                if escaped {
                    // \' inside a single-quoted string becomes a plain quote
                    if c == '\'' {
                        out.push('\'');
                    } else {
                        out.push('\\');
                        out.push(c);
                    }
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '\'' {
                    ctx = Ctx::Plain;
                    out.push('"');
                } else if c == '"' {
                    out.push('\\');
                    out.push('"');
                } else {
                    out.push(c);
                }
            }
            Ctx::Plain => {
                if c.is_alphanumeric() || c == '_' {
                    if let Some(ws) = comma_ws.take() {
                        out.push(',');
                        out.push_str(&ws);
                    }
                    word.push(c);
                    continue;
                }
                flush_word(&mut out, &mut word);
                match c {
                    ',' => {
                        if let Some(ws) = comma_ws.take() {
                            out.push(',');
                            out.push_str(&ws);
                        }
                        comma_ws = Some(String::new());
                    }
                    '}' | ']' => {
                        // A held comma before a closer was trailing: drop it.
                        if let Some(ws) = comma_ws.take() {
                            out.push_str(&ws);
                        }
                        out.push(c);
                    }
                    '"' => {
                        if let Some(ws) = comma_ws.take() {
                            out.push(',');
                            out.push_str(&ws);
                        }
                        ctx = Ctx::Double;
                        out.push('"');
                    }
                    '\'' => {
                        if let Some(ws) = comma_ws.take() {
                            out.push(',');
                            out.push_str(&ws);
                        }
                        ctx = Ctx::Single;
                        out.push('"');
                    }
                    ws_char if ws_char.is_whitespace() => {
                        if let Some(ws) = comma_ws.as_mut() {
                            ws.push(ws_char);
                        } else {
                            out.push(ws_char);
                        }
                    }
                    other => {
                        if let Some(ws) = comma_ws.take() {
                            out.push(',');
                            out.push_str(&ws);
                        }
                        out.push(other);
                    }
                }
            }
        }
    }
    flush_word(&mut out, &mut word);
    if let Some(ws) = comma_ws {
        out.push(',');
        out.push_str(&ws);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use errandry_types::llm::GenerationError;

    struct FixedGenerator {
        reply: &'static str,
    }

    impl TextGenerator for FixedGenerator {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
            Ok(self.reply.to_string())
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
            Err(GenerationError::Overloaded("busy".to_string()))
        }
    }

    #[test]
    fn test_payload_recovered_from_surrounding_prose() {
        let raw = r#"Sure! Here is the JSON you asked for:
{"to": "alice@example.com", "subject": "Hi", "content": "Hello"}
Let me know if you need anything else."#;
        let email = EmailExtractor::parse_payload(raw).unwrap();
        assert_eq!(email.to, "alice@example.com");
        assert_eq!(email.subject, "Hi");
        assert_eq!(email.body, "Hello");
    }

    #[test]
    fn test_missing_braces_is_missing_payload() {
        let err = EmailExtractor::parse_payload("I cannot produce JSON").unwrap_err();
        assert!(matches!(err, EmailExtractError::MissingPayload));
    }

    #[test]
    fn test_unparseable_braces_is_parse_error() {
        let err = EmailExtractor::parse_payload("{to: alice, oops").unwrap_err();
        assert!(matches!(err, EmailExtractError::MissingPayload));

        let err = EmailExtractor::parse_payload("{this is : not json : at all}").unwrap_err();
        assert!(matches!(err, EmailExtractError::Parse(_)));
    }

    #[test]
    fn test_recipient_without_at_sign_is_invalid() {
        let raw = r#"{"to": "alice.example.com", "subject": "Hi", "content": "x"}"#;
        let err = EmailExtractor::parse_payload(raw).unwrap_err();
        assert!(matches!(err, EmailExtractError::InvalidRecipient));
    }

    #[test]
    fn test_missing_recipient_is_invalid() {
        let raw = r#"{"subject": "Hi", "content": "x"}"#;
        let err = EmailExtractor::parse_payload(raw).unwrap_err();
        assert!(matches!(err, EmailExtractError::InvalidRecipient));
    }

    #[test]
    fn test_subject_and_body_defaults() {
        let raw = r#"{"to": "bob@example.com"}"#;
        let email = EmailExtractor::parse_payload(raw).unwrap();
        assert_eq!(email.subject, "No Subject");
        assert_eq!(email.body, "");
    }

    #[test]
    fn test_null_subject_falls_back_to_default() {
        let raw = r#"{"to": "bob@example.com", "subject": null, "content": "x"}"#;
        let email = EmailExtractor::parse_payload(raw).unwrap();
        assert_eq!(email.subject, "No Subject");
    }

    #[test]
    fn test_relaxed_pass_handles_single_quotes() {
        let raw = "{'to': 'carol@example.com', 'subject': 'Lunch', 'content': 'Noon?'}";
        let email = EmailExtractor::parse_payload(raw).unwrap();
        assert_eq!(email.to, "carol@example.com");
        assert_eq!(email.subject, "Lunch");
        assert_eq!(email.body, "Noon?");
    }

    #[test]
    fn test_relaxed_pass_handles_python_literals() {
        let raw = "{'to': 'dan@example.com', 'subject': None, 'content': 'ok'}";
        let email = EmailExtractor::parse_payload(raw).unwrap();
        assert_eq!(email.subject, "No Subject");
        assert_eq!(email.body, "ok");
    }

    #[test]
    fn test_relaxed_pass_handles_trailing_comma() {
        let raw = r#"{"to": "eve@example.com", "subject": "Hi", "content": "x",}"#;
        let email = EmailExtractor::parse_payload(raw).unwrap();
        assert_eq!(email.to, "eve@example.com");
    }

    #[test]
    fn test_relax_json_preserves_double_quoted_contents() {
        // Words inside strings must not be rewritten; apostrophes inside
        // double-quoted strings are content, not delimiters.
        let raw = r#"{"to": "a@b.c", "content": "None of it's True",}"#;
        let relaxed = relax_json(raw);
        assert_eq!(relaxed, r#"{"to": "a@b.c", "content": "None of it's True"}"#);
    }

    #[test]
    fn test_relax_json_escapes_double_quote_inside_single_quoted() {
        let raw = r#"{'content': 'say "hi"'}"#;
        let relaxed = relax_json(raw);
        assert_eq!(relaxed, r#"{"content": "say \"hi\""}"#);
    }

    #[test]
    fn test_outermost_span_is_greedy() {
        let text = r#"a {"x": {"y": 1}} b"#;
        assert_eq!(outermost_brace_span(text).unwrap(), r#"{"x": {"y": 1}}"#);
        assert!(outermost_brace_span("} {").is_none());
        assert!(outermost_brace_span("none").is_none());
    }

    #[tokio::test]
    async fn test_extract_end_to_end_with_stub() {
        let generator = FixedGenerator {
            reply: r#"{"to": "alice@example.com", "subject": "Hi", "content": "Hello"}"#,
        };
        let email = EmailExtractor::extract(&generator, "email alice please")
            .await
            .unwrap();
        assert_eq!(email.to, "alice@example.com");
    }

    #[tokio::test]
    async fn test_extract_propagates_generation_fault() {
        let err = EmailExtractor::extract(&FailingGenerator, "email alice")
            .await
            .unwrap_err();
        assert!(matches!(err, EmailExtractError::Generation(_)));
    }

    #[test]
    fn test_extract_prompt_demands_strict_json() {
        assert!(EXTRACT_SYSTEM_PROMPT.contains("STRICTLY in valid JSON"));
        assert!(EXTRACT_SYSTEM_PROMPT.contains("\"to\""));
        assert!(EXTRACT_SYSTEM_PROMPT.contains("\"subject\""));
        assert!(EXTRACT_SYSTEM_PROMPT.contains("\"content\""));
        assert!(EXTRACT_SYSTEM_PROMPT.contains("no backticks"));
    }
}
