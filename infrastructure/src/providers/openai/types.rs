//! Wire types for the Chat Completions API and conversions to domain types.

use serde::{Deserialize, Serialize};
use verse_rag_application::GatewayError;
use verse_rag_domain::{Message, Model};

// ─── Domain → Wire ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct WireMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(model: &'a Model, messages: &'a [Message]) -> Self {
        Self {
            model: model.as_str(),
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }
}

// ─── Wire → Domain ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Text of the first choice.
pub fn extract_text(response: ChatCompletionResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(GatewayError::EmptyResponse)
}

/// Map a non-success HTTP status and body to a gateway error.
///
/// Prefers the provider's `error.message` over the raw body.
pub fn map_http_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        401 | 403 => GatewayError::Authentication(message),
        _ => GatewayError::RequestFailed(format!("HTTP {status}: {message}")),
    }
}

/// Map a transport failure to a gateway error.
pub fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else if err.is_decode() {
        GatewayError::Other(format!("Failed to parse completion response: {err}"))
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_roles_in_order() {
        let model = Model::Llama3_70b;
        let messages = vec![
            Message::system("ctx"),
            Message::user("q"),
            Message::assistant("a"),
        ];
        let json = serde_json::to_value(ChatCompletionRequest::new(&model, &messages)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama3-70b-8192",
                "messages": [
                    {"role": "system", "content": "ctx"},
                    {"role": "user", "content": "q"},
                    {"role": "assistant", "content": "a"},
                ],
            })
        );
    }

    #[test]
    fn test_extract_text_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "first"}}, {"message": {"content": "second"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "first");
    }

    #[test]
    fn test_extract_text_empty_choices() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GatewayError::EmptyResponse)
        ));

        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GatewayError::EmptyResponse)
        ));
    }

    #[test]
    fn test_map_http_error_prefers_provider_message() {
        let err = map_http_error(400, r#"{"error": {"message": "model not found", "type": "invalid_request_error"}}"#);
        match err {
            GatewayError::RequestFailed(msg) => assert_eq!(msg, "HTTP 400: model not found"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_map_http_error_authentication() {
        assert!(matches!(
            map_http_error(401, "Invalid API Key"),
            GatewayError::Authentication(msg) if msg == "Invalid API Key"
        ));
    }
}
