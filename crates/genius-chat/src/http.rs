use std::time::Duration;

use async_trait::async_trait;

use crate::{read_reply, ClientConfig, CompletionTransport};
use genius_types::{ChatMessage, CompletionRequest, DispatchError};

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// `POST`s the conversation as JSON to the completion endpoint with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.url(),
            timeout: config.request_timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `messages` and decodes the single reply message.
    ///
    /// The returned future is `Send`, so server handlers can call this
    /// directly instead of going through the trait.
    pub async fn post_messages(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatMessage, DispatchError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&CompletionRequest::new(messages));
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        read_reply(
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            &body,
        )
    }

    fn classify(&self, err: reqwest::Error) -> DispatchError {
        if err.is_timeout() {
            let timeout_ms = self.timeout.map(|t| t.as_millis() as u64).unwrap_or(0);
            DispatchError::Timeout { timeout_ms }
        } else if err.is_builder() {
            DispatchError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            DispatchError::MalformedResponse(err.to_string())
        } else {
            DispatchError::Network(err.to_string())
        }
    }
}

#[async_trait(?Send)]
impl CompletionTransport for HttpTransport {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, DispatchError> {
        self.post_messages(messages).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
