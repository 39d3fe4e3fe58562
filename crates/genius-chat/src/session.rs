use genius_types::{ChatMessage, ConversationHistory, DispatchError, SubmitError};

use crate::{CompletionTransport, PromptForm};

// ---------------------------------------------------------------------------
// Attempt outcome and post-attempt hooks
// ---------------------------------------------------------------------------

/// Result of one dispatch attempt, handed to [`AfterAttempt`] hooks.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// The user message and `reply` were appended to the history.
    Appended { reply: ChatMessage },
    /// Nothing was appended.
    Failed(DispatchError),
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Appended { .. })
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            AttemptOutcome::Failed(err) => Some(err),
            AttemptOutcome::Appended { .. } => None,
        }
    }
}

/// Runs once after every dispatch attempt, whatever its outcome. Used to
/// reconcile server-derived state such as usage quota.
pub trait AfterAttempt {
    fn after_attempt(&self, outcome: &AttemptOutcome);
}

impl<F: Fn(&AttemptOutcome)> AfterAttempt for F {
    fn after_attempt(&self, outcome: &AttemptOutcome) {
        self(outcome)
    }
}

/// Hook that only records the attempt in the trace log.
pub struct TracingHook;

impl AfterAttempt for TracingHook {
    fn after_attempt(&self, outcome: &AttemptOutcome) {
        tracing::debug!(success = outcome.is_success(), "dispatch attempt finished");
    }
}

// ---------------------------------------------------------------------------
// PendingDispatch
// ---------------------------------------------------------------------------

/// A submission that passed validation and is waiting for its reply.
///
/// Only [`ChatSession::begin`] creates one, and [`ChatSession::finish`]
/// consumes it.
#[derive(Debug)]
pub struct PendingDispatch {
    user: ChatMessage,
    messages: Vec<ChatMessage>,
}

impl PendingDispatch {
    /// The outgoing payload: prior history followed by the new user message.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn user(&self) -> &ChatMessage {
        &self.user
    }
}

// ---------------------------------------------------------------------------
// ChatSession
// ---------------------------------------------------------------------------

/// Session-scoped view state of the code page: the conversation, the busy
/// flag and the last dispatch failure.
#[derive(Debug, Default)]
pub struct ChatSession {
    history: ConversationHistory,
    busy: bool,
    last_error: Option<DispatchError>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// True between `begin` and `finish`. Input and submit are disabled while set.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_error(&self) -> Option<&DispatchError> {
        self.last_error.as_ref()
    }

    /// Validates the form and marks the session busy.
    ///
    /// Invalid prompts and submissions made while busy are refused without
    /// touching any state.
    pub fn begin(&mut self, form: &PromptForm) -> Result<PendingDispatch, SubmitError> {
        if self.busy {
            return Err(SubmitError::Busy);
        }
        let prompt = form.validate()?;

        let user = ChatMessage::user(prompt);
        let messages = self.history.outgoing_with(&user);

        self.busy = true;
        self.last_error = None;
        tracing::info!(messages = messages.len(), "dispatching prompt");

        Ok(PendingDispatch { user, messages })
    }

    /// Applies the transport result and clears the busy flag.
    pub fn finish(
        &mut self,
        pending: PendingDispatch,
        result: Result<ChatMessage, DispatchError>,
    ) -> AttemptOutcome {
        self.busy = false;

        match result {
            Ok(reply) => {
                self.history.push_exchange(pending.user, reply.clone());
                tracing::info!(history = self.history.len(), "reply appended");
                AttemptOutcome::Appended { reply }
            }
            Err(err) => {
                tracing::warn!(error = %err, retryable = err.is_retryable(), "dispatch failed");
                self.last_error = Some(err.clone());
                AttemptOutcome::Failed(err)
            }
        }
    }

    /// Validates, sends, applies the reply and then runs `hook`.
    ///
    /// `Err` means nothing was sent. A failed round trip is reported as
    /// `Ok(AttemptOutcome::Failed(_))` and the hook still runs.
    pub async fn submit<T, H>(
        &mut self,
        transport: &T,
        hook: &H,
        form: &PromptForm,
    ) -> Result<AttemptOutcome, SubmitError>
    where
        T: CompletionTransport + ?Sized,
        H: AfterAttempt + ?Sized,
    {
        let pending = self.begin(form)?;
        let result = transport.complete(pending.messages()).await;
        let outcome = self.finish(pending, result);
        hook.after_attempt(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genius_types::PromptError;

    #[test]
    fn begin_sets_busy_and_builds_payload() {
        let mut session = ChatSession::new();
        let pending = session.begin(&PromptForm::new("hello")).unwrap();

        assert!(session.is_busy());
        assert_eq!(pending.messages(), &[ChatMessage::user("hello")]);
        assert!(session.history().is_empty());
    }

    #[test]
    fn begin_while_busy_is_refused() {
        let mut session = ChatSession::new();
        let _pending = session.begin(&PromptForm::new("first")).unwrap();

        let err = session.begin(&PromptForm::new("second")).unwrap_err();
        assert_eq!(err, SubmitError::Busy);
    }

    #[test]
    fn invalid_prompt_leaves_session_idle() {
        let mut session = ChatSession::new();
        let err = session.begin(&PromptForm::new("   ")).unwrap_err();

        assert_eq!(err, SubmitError::Invalid(PromptError::Required));
        assert!(!session.is_busy());
    }

    #[test]
    fn finish_clears_busy_on_both_paths() {
        let mut session = ChatSession::new();

        let pending = session.begin(&PromptForm::new("a")).unwrap();
        session.finish(pending, Err(DispatchError::Network("down".into())));
        assert!(!session.is_busy());
        assert!(session.last_error().is_some());

        let pending = session.begin(&PromptForm::new("a")).unwrap();
        assert!(session.last_error().is_none());
        session.finish(pending, Ok(ChatMessage::assistant("b")));
        assert!(!session.is_busy());
        assert_eq!(session.history().len(), 2);
    }
}
