use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::*;
use crate::error::{AgentError, AgentResult};

/// Retry behavior for rate limits and transient server errors.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 1000,
            max_backoff_ms: 60_000,
        }
    }
}

impl RetryPolicy {
    /// No retries; used by tests to keep failure paths fast.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
        }
    }
}

/// Client for an OpenRouter-compatible chat completion API.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenRouterClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Run one chat completion, retrying on 429 and 5xx responses with
    /// exponential backoff, and return the first choice's content.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> AgentResult<String> {
        let mut retries = 0;
        let mut backoff_ms = self.retry.initial_backoff_ms;

        loop {
            match self
                .chat_completion_once(messages.clone(), model, temperature, max_tokens)
                .await
            {
                Ok(content) => return Ok(content),
                Err(e) if retries < self.retry.max_retries && is_retryable(&e) => {
                    let wait_ms = match &e {
                        AgentError::RateLimited {
                            retry_after: Some(secs),
                        } => (*secs * 1000).min(self.retry.max_backoff_ms),
                        _ => backoff_ms,
                    };
                    warn!(
                        error = %e,
                        wait_ms,
                        attempt = retries + 1,
                        max = self.retry.max_retries,
                        "chat completion failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(wait_ms)).await;
                    retries += 1;
                    backoff_ms = (backoff_ms * 2).min(self.retry.max_backoff_ms);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn chat_completion_once(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> AgentResult<String> {
        debug!(model, messages = messages.len(), "requesting chat completion");

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(AgentError::RateLimited { retry_after: None });
            }

            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AgentError::Api {
                message,
                status_code: Some(status.as_u16()),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AgentError::EmptyCompletion)?;

        if content.trim().is_empty() {
            return Err(AgentError::EmptyCompletion);
        }
        Ok(content)
    }
}

fn is_retryable(error: &AgentError) -> bool {
    match error {
        AgentError::RateLimited { .. } => true,
        AgentError::Api {
            status_code: Some(code),
            ..
        } => *code >= 500,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> OpenRouterClient {
        OpenRouterClient::new("test-key".to_string(), server.uri())
            .with_retry_policy(RetryPolicy::none())
    }

    #[tokio::test]
    async fn test_chat_completion_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "hello"}}]
            })))
            .mount(&server)
            .await;

        let content = test_client(&server)
            .chat_completion(vec![ChatMessage::user("hi")], "m", Some(1.0), None)
            .await
            .unwrap();
        assert_eq!(content, "hello");
    }

    #[tokio::test]
    async fn test_api_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "bad model", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .chat_completion(vec![ChatMessage::user("hi")], "m", None, None)
            .await
            .unwrap_err();
        match err {
            AgentError::Api {
                message,
                status_code,
            } => {
                assert_eq!(message, "bad model");
                assert_eq!(status_code, Some(400));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_retries_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "recovered"}}]
            })))
            .mount(&server)
            .await;

        let client = OpenRouterClient::new("test-key".to_string(), server.uri())
            .with_retry_policy(RetryPolicy {
                max_retries: 2,
                initial_backoff_ms: 1,
                max_backoff_ms: 10,
            });

        let content = client
            .chat_completion(vec![ChatMessage::user("hi")], "m", None, None)
            .await
            .unwrap();
        assert_eq!(content, "recovered");
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .chat_completion(vec![ChatMessage::user("hi")], "m", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::EmptyCompletion));
    }
}
