//! Browser-side transport for the completion endpoint.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use genius_chat::{
    read_reply, ChatMessage, ClientConfig, CompletionRequest, CompletionTransport, DispatchError,
};

/// `POST`s the conversation with the browser fetch API via gloo-net.
pub struct GlooTransport {
    url: String,
    timeout: Option<Duration>,
}

impl GlooTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            url: config.url(),
            timeout: config.request_timeout,
        }
    }

    async fn post(&self, messages: &[ChatMessage]) -> Result<ChatMessage, DispatchError> {
        let request = Request::post(&self.url)
            .json(&CompletionRequest::new(messages))
            .map_err(|e| match e {
                gloo_net::Error::SerdeError(e) => DispatchError::InvalidRequest(e.to_string()),
                other => DispatchError::Network(other.to_string()),
            })?;

        let response = request
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DispatchError::MalformedResponse(e.to_string()))?;

        read_reply(status, &response.status_text(), &text)
    }
}

#[async_trait(?Send)]
impl CompletionTransport for GlooTransport {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, DispatchError> {
        let Some(timeout) = self.timeout else {
            return self.post(messages).await;
        };

        let timeout_ms = timeout.as_millis() as u64;
        let timer = TimeoutFuture::new(u32::try_from(timeout_ms).unwrap_or(u32::MAX));

        match select(Box::pin(self.post(messages)), Box::pin(timer)).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(DispatchError::Timeout { timeout_ms }),
        }
    }
}
