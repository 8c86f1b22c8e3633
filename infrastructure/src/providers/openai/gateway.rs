//! OpenAI-compatible gateway implementation.

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, extract_text, map_http_error,
    map_transport_error,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use verse_rag_application::{GatewayError, LlmGateway};
use verse_rag_domain::{Message, Model};

/// Stateless completion client; every call sends the full conversation.
#[derive(Clone)]
pub struct OpenAiCompatGateway {
    client: Client,
    completions_url: String,
    api_key: Option<String>,
}

impl OpenAiCompatGateway {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        if api_key.is_none() {
            warn!("No API key configured; requests are sent unauthenticated");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            completions_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError> {
        debug!(
            "Completion request: model={}, messages={}",
            model,
            messages.len()
        );

        let mut request = self
            .client
            .post(&self.completions_url)
            .json(&ChatCompletionRequest::new(model, messages));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status.as_u16(), &body));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(map_transport_error)?;
        extract_text(parsed)
    }
}
