use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::FoundryConfig;
use crate::error::CompletionError;

/// Token cap sent with every request.
pub const MAX_TOKENS: u32 = 1000;

const COMPLETIONS_PATH: &str = "chat/completions";
const API_VERSION: &str = "2024-02-15-preview";

/// One entry of the chat transcript sent to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Anything that can answer a chat message list with text.
///
/// The returned string is either the model's reply or a human-readable error
/// description; implementations never panic and never surface a
/// protocol-level failure.
pub trait CompletionProvider: Send + Sync {
    fn complete(&self, messages: &[ChatMessage]) -> String;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// Blocking client for an Azure AI Foundry chat-completions deployment.
///
/// Makes exactly one attempt per call, no retries. The configured timeout
/// bounds the whole request.
pub struct FoundryClient {
    http: Client,
    config: FoundryConfig,
}

impl FoundryClient {
    pub fn new(config: FoundryConfig) -> Self {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, config }
    }

    fn try_complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let (api_key, endpoint) = match (&self.config.api_key, &self.config.endpoint) {
            (Some(key), Some(endpoint)) => (key, endpoint),
            _ => return Err(CompletionError::MissingConfig),
        };

        let url = completions_url(endpoint);
        let body = CompletionRequest {
            messages,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!("POST {url}");

        // The key is sent under both header names: plain `api-key` for the
        // deployment itself and `Ocp-Apim-Subscription-Key` for gateways in
        // front of it.
        let response = self
            .http
            .post(&url)
            .json(&body)
            .header("api-key", api_key)
            .header("Ocp-Apim-Subscription-Key", api_key)
            .send()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body: response.text().unwrap_or_default(),
            });
        }

        let completion: ChatCompletion = response
            .json()
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Malformed("missing choices[0]".to_string()))
    }
}

impl CompletionProvider for FoundryClient {
    fn complete(&self, messages: &[ChatMessage]) -> String {
        match self.try_complete(messages) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("completion request failed: {e}");
                e.to_string()
            }
        }
    }
}

/// Builds the request URL from the configured endpoint. An endpoint that
/// already points at a completions path is used verbatim; otherwise the
/// default path and API version are appended.
fn completions_url(endpoint: &str) -> String {
    if endpoint.contains(COMPLETIONS_PATH) {
        return endpoint.to_string();
    }
    let mut url = endpoint.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    format!("{url}{COMPLETIONS_PATH}?api-version={API_VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_completions_path_to_bare_endpoint() {
        assert_eq!(
            completions_url("https://x/openai"),
            "https://x/openai/chat/completions?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn does_not_double_trailing_slash() {
        assert_eq!(
            completions_url("https://x/openai/"),
            "https://x/openai/chat/completions?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn full_completions_url_used_verbatim() {
        let url = "https://x/openai/deployments/gpt4/chat/completions?api-version=2024-06-01";
        assert_eq!(completions_url(url), url);
    }

    #[test]
    fn missing_config_reported_in_band() {
        let client = FoundryClient::new(FoundryConfig::default());
        let reply = client.complete(&[ChatMessage::user("hi")]);
        assert!(reply.contains("OPENAI_API_KEY"));
        assert!(reply.contains("OPENAI_BASE_URL"));
    }

    #[test]
    fn user_message_has_user_role() {
        let msg = ChatMessage::user("what is rust?");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "what is rust?");
    }
}
