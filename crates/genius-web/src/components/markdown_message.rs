use genius_chat::{render_markdown, ChatMessage};
use leptos::prelude::*;

/// One conversation entry rendered as markdown. Entries with no content
/// render nothing.
#[component]
pub fn MarkdownMessage(message: ChatMessage) -> impl IntoView {
    let html = render_markdown(message.content());
    let class = format!("message message-{}", message.role());

    (!html.is_empty()).then(|| {
        view! {
            <div class=class>
                <div class="markdown-rendered" inner_html=html></div>
            </div>
        }
    })
}
