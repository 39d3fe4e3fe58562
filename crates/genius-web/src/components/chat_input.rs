use leptos::ev::SubmitEvent;
use leptos::prelude::*;

/// The single-field prompt form. Input and button are disabled while `busy`.
#[component]
pub fn ChatInput<F>(
    prompt: ReadSignal<String>,
    set_prompt: WriteSignal<String>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(SubmitEvent) + Send + Sync + 'static,
{
    view! {
        <form class="prompt-form" on:submit=on_submit>
            <input
                class="prompt-input"
                name="prompt"
                placeholder="Write your desired code"
                autocomplete="off"
                prop:value=move || prompt.get()
                on:input=move |ev| {
                    set_prompt.set(event_target_value(&ev));
                }
                disabled=move || busy.get()
            />
            <button
                class="submit-button"
                type="submit"
                disabled=move || busy.get()
            >
                {move || if busy.get() { "Generating..." } else { "Generate" }}
            </button>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
        </form>
    }
}
