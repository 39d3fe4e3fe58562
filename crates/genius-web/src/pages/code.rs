use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use genius_chat::{ChatSession, PendingDispatch, PromptForm, SubmitError};

use crate::components::chat_input::ChatInput;
use crate::components::message_list::{display_order, MessageList};
use crate::components::refresh::PageRefresh;

/// The code generation chat.
///
/// The session lives only as long as this component, so navigating away
/// discards the conversation.
#[component]
pub fn CodePage() -> impl IntoView {
    let session = RwSignal::new(ChatSession::new());
    let (prompt, set_prompt) = signal(String::new());
    let (form_error, set_form_error) = signal(Option::<String>::None);
    let refresh = PageRefresh::from_context();

    let busy = Memo::new(move |_| session.with(|s| s.is_busy()));
    let dispatch_error = Memo::new(move |_| {
        session.with(|s| s.last_error().map(|err| err.to_string()))
    });
    let messages = Signal::derive(move || session.with(|s| display_order(s.history())));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let form = PromptForm::new(prompt.get_untracked());
        match session.try_update(|s| s.begin(&form)) {
            Some(Ok(pending)) => {
                set_form_error.set(None);
                dispatch(session, pending, set_prompt, refresh);
            }
            Some(Err(SubmitError::Invalid(err))) => set_form_error.set(Some(err.to_string())),
            Some(Err(SubmitError::Busy)) | None => {}
        }
    };

    view! {
        <div class="code-page">
            <h1 class="page-title">"Code 💬"</h1>
            {move || dispatch_error.get().map(|msg| view! {
                <div class="dispatch-error" role="alert">{msg}</div>
            })}
            <MessageList messages=messages/>
            <div class="prompt-dock">
                <ChatInput
                    prompt=prompt
                    set_prompt=set_prompt
                    busy=busy
                    error=form_error
                    on_submit=on_submit
                />
            </div>
        </div>
    }
}

/// Sends the pending prompt from the browser and applies the reply.
#[cfg(feature = "hydrate")]
fn dispatch(
    session: RwSignal<ChatSession>,
    pending: PendingDispatch,
    set_prompt: WriteSignal<String>,
    refresh: PageRefresh,
) {
    use genius_chat::{AfterAttempt, ClientConfig, CompletionTransport};

    use crate::transport::GlooTransport;

    leptos::task::spawn_local(async move {
        let transport = GlooTransport::new(&ClientConfig::same_origin());
        let result = transport.complete(pending.messages()).await;

        // `None` when the page was left while the request was in flight.
        let Some(outcome) = session.try_update(|s| s.finish(pending, result)) else {
            return;
        };
        if outcome.is_success() {
            set_prompt.set(String::new());
        }
        refresh.after_attempt(&outcome);
    });
}

// Submit events are only delivered after hydration.
#[cfg(not(feature = "hydrate"))]
fn dispatch(
    _session: RwSignal<ChatSession>,
    _pending: PendingDispatch,
    _set_prompt: WriteSignal<String>,
    _refresh: PageRefresh,
) {
}
