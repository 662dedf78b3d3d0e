use leptos::ev;
use leptos::prelude::*;

use crate::models::ChatMessage;
use crate::state::{can_submit, AppState};

/// Follow-up chat panel: transcript plus input row. The streaming assistant
/// reply arrives by rewriting the transcript tail, so the panel just renders
/// whatever the transcript holds.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let messages = state.messages;
    let is_chat_loading = state.is_chat_loading;

    view! {
        <section class="chat-panel">
            <div class="chat-header">
                <h3>"Legal Assistant Chat"</h3>
                <span class="chat-subtitle">"Context-aware follow-ups"</span>
            </div>

            <div class="messages-container">
                {move || {
                    let msgs = messages.get();
                    if msgs.is_empty() {
                        view! {
                            <div class="empty-state">
                                "Ask follow-up questions about your case analysis..."
                            </div>
                        }
                            .into_any()
                    } else {
                        msgs.into_iter()
                            .map(|msg| view! { <MessageBubble msg=msg /> })
                            .collect_view()
                            .into_any()
                    }
                }}
                {move || {
                    is_chat_loading.get().then(|| {
                        view! { <div class="typing-indicator">"…"</div> }
                    })
                }}
            </div>

            <ChatInput />
        </section>
    }
}

/// A single chat message bubble; role determines the rendering side.
#[component]
fn MessageBubble(msg: ChatMessage) -> impl IntoView {
    let css_class = if msg.is_assistant() {
        "message assistant"
    } else {
        "message user"
    };

    view! {
        <div class=css_class>
            <div class="role-label">{msg.role.clone()}</div>
            <div>{msg.content.clone()}</div>
        </div>
    }
}

/// Chat input row with Enter-to-send.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_chat_loading = state.is_chat_loading;
    let (input, set_input) = signal(String::new());

    let is_sending = move || is_chat_loading.get();

    let send = move || {
        let text = input.get();
        if !can_submit(&text, is_sending()) {
            return;
        }
        set_input.set(String::new());
        state.send_chat_message(text);
    };

    let send_on_key = send.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            send_on_key();
        }
    };

    view! {
        <div class="input-row">
            <input
                type="text"
                placeholder="Ask a follow-up question..."
                prop:value=input
                on:input=move |ev| set_input.set(event_target_value(&ev))
                on:keydown=on_keydown
                disabled=is_sending
            />
            <button
                class="send-btn"
                on:click=move |_| send()
                disabled=move || !can_submit(&input.get(), is_sending())
            >
                "Send"
            </button>
        </div>
    }
}
