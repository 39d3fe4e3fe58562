use genius_chat::{ChatMessage, ConversationHistory};
use leptos::prelude::*;

use crate::components::markdown_message::MarkdownMessage;

/// The history as the list shows it: most recent message first.
pub fn display_order(history: &ConversationHistory) -> Vec<ChatMessage> {
    history.newest_first().cloned().collect()
}

/// Conversation entries, newest first so the latest reply sits next to the
/// prompt box.
#[component]
pub fn MessageList(#[prop(into)] messages: Signal<Vec<ChatMessage>>) -> impl IntoView {
    view! {
        <div class="message-list">
            {move || {
                messages
                    .get()
                    .into_iter()
                    .map(|message| view! { <MarkdownMessage message=message/> })
                    .collect_view()
            }}
        </div>
    }
}
