use async_trait::async_trait;

use genius_types::{ChatMessage, DispatchError};

// ---------------------------------------------------------------------------
// CompletionTransport
// ---------------------------------------------------------------------------

/// One round trip to the completion service: the full outgoing message list
/// in, exactly one reply out.
///
/// Futures are not required to be `Send` so browser transports, whose
/// futures hold JS handles, can implement it.
#[async_trait(?Send)]
pub trait CompletionTransport {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, DispatchError>;
}

#[async_trait(?Send)]
impl<T: CompletionTransport + ?Sized> CompletionTransport for std::sync::Arc<T> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, DispatchError> {
        (**self).complete(messages).await
    }
}

#[async_trait(?Send)]
impl<T: CompletionTransport + ?Sized> CompletionTransport for Box<T> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, DispatchError> {
        (**self).complete(messages).await
    }
}

// ---------------------------------------------------------------------------
// Reply classification
// ---------------------------------------------------------------------------

/// Longest slice of an error body kept in `DispatchError::Server`.
pub const MAX_ERROR_BODY: usize = 200;

/// Turns a finished HTTP exchange into the reply or a `DispatchError`.
///
/// Every transport funnels its response through here so a given status and
/// body classify the same way whichever client sent the request. `reason` is
/// the status text, used when the error body is blank.
pub fn read_reply(status: u16, reason: &str, body: &str) -> Result<ChatMessage, DispatchError> {
    if !(200..300).contains(&status) {
        let message = if !body.trim().is_empty() {
            body.chars().take(MAX_ERROR_BODY).collect()
        } else if !reason.is_empty() {
            reason.to_string()
        } else {
            "no body".to_string()
        };
        return Err(DispatchError::Server { status, message });
    }

    serde_json::from_str(body).map_err(|e| DispatchError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use genius_types::Role;

    #[test]
    fn success_body_is_the_reply() {
        let reply = read_reply(200, "OK", r#"{"role":"assistant","content":"`x`"}"#).unwrap();
        assert_eq!(reply.role(), Role::Assistant);
        assert_eq!(reply.content(), "`x`");
    }

    #[test]
    fn undecodable_success_body_is_malformed() {
        let err = read_reply(200, "OK", "<html>").unwrap_err();
        assert!(matches!(err, DispatchError::MalformedResponse(_)), "{err:?}");
    }

    #[test]
    fn long_error_body_is_truncated() {
        let body = "é".repeat(MAX_ERROR_BODY * 3);
        let err = read_reply(500, "Internal Server Error", &body).unwrap_err();

        let DispatchError::Server { status, message } = err else {
            panic!("expected server error, got {err:?}");
        };
        assert_eq!(status, 500);
        assert_eq!(message.chars().count(), MAX_ERROR_BODY);
    }

    #[test]
    fn blank_error_body_falls_back_to_reason() {
        assert_eq!(
            read_reply(403, "Forbidden", "  \n").unwrap_err(),
            DispatchError::Server {
                status: 403,
                message: "Forbidden".into(),
            }
        );
        assert_eq!(
            read_reply(599, "", "").unwrap_err(),
            DispatchError::Server {
                status: 599,
                message: "no body".into(),
            }
        );
    }

    #[test]
    fn error_status_wins_over_a_json_body() {
        let err = read_reply(429, "Too Many Requests", r#"{"role":"assistant","content":"hi"}"#)
            .unwrap_err();
        assert!(matches!(err, DispatchError::Server { status: 429, .. }), "{err:?}");
    }
}
