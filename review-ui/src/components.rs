use std::rc::Rc;

use chrono::{DateTime, Utc};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use review_core::{GateView, RecommendedPrompt, Role, Turn};
use shared_types::Persona;

use crate::state::{use_dashboard, use_request_state, DashboardContext};

#[component]
pub fn ChatPanel() -> Element {
    let DashboardContext { session, .. } = use_dashboard();
    let request_state = use_request_state(session.store.clone());
    let mut input_text = use_signal(|| session.chat.text());
    let mut transcript = use_signal(|| session.chat.transcript());
    let mut persona = use_signal(|| session.chat.persona());

    // This panel owns the input, so it receives rewrites while mounted
    let chat = session.chat.clone();
    let bridge = session.bridge.clone();
    use_hook(move || {
        let registration = chat.attach(&bridge, move |text| {
            let mut input_text = input_text;
            input_text.set(text.to_string());
        });
        Rc::new(registration)
    });

    let chat = session.chat.clone();
    let send_message = use_callback(move |_| {
        let Some(pending) = chat.submit() else {
            return;
        };
        input_text.set(String::new());
        transcript.set(chat.transcript());

        // the store stays Loading unless this runs to completion, so it is
        // not tied to the panel's scope
        let chat = chat.clone();
        let _ = spawn_forever(async move {
            if pending.await.is_published() {
                if let Ok(mut shown) = transcript.try_write() {
                    *shown = chat.transcript();
                }
            }
        });
    });

    let chat = session.chat.clone();
    let oninput = use_callback(move |e: FormEvent| {
        chat.set_text(&e.value());
        input_text.set(e.value());
    });

    let onkeydown = use_callback(move |e: KeyboardEvent| {
        if e.key() == Key::Enter && !e.modifiers().shift() {
            e.prevent_default();
            send_message.call(());
        }
    });

    let chat = session.chat.clone();
    let select_persona = use_callback(move |next: Persona| {
        chat.set_persona(next);
        persona.set(next);
    });

    let chat = session.chat.clone();
    let gate = session.gate;
    let select_prompt = use_callback(move |recommendation: RecommendedPrompt| {
        gate.select(&recommendation, &chat);
        input_text.set(chat.text());
    });

    let loading = request_state.read().is_loading();
    let gate_view = session.gate.view(&request_state.read());

    rsx! {
        style { {CHAT_STYLES} }

        div {
            class: "chat-container",

            div {
                class: "chat-header",
                div {
                    class: "chat-title",
                    span { class: "chat-icon", "{persona().icon()}" }
                    span { "{persona().display_name()}" }
                }
                PersonaPicker { current: persona(), on_select: select_persona }
            }

            div {
                class: "messages-scroll-area",
                div {
                    class: "messages-list",
                    for turn in transcript.iter() {
                        MessageBubble { key: "{turn.id}", turn: turn.clone() }
                    }
                    if loading {
                        LoadingIndicator {}
                    }
                    if gate_view.is_visible() {
                        Recommendations { view: gate_view, on_select: select_prompt }
                    }
                }
            }

            div {
                class: "chat-input-area",
                div {
                    class: "input-wrapper",
                    textarea {
                        class: "chat-textarea",
                        placeholder: "Type a prompt to analyze...",
                        value: "{input_text}",
                        rows: "2",
                        oninput,
                        onkeydown,
                    }
                    button {
                        class: "send-button",
                        disabled: input_text.read().trim().is_empty(),
                        onclick: move |_| send_message.call(()),
                        if loading {
                            span { "◐" }
                        } else {
                            span { "➤" }
                        }
                    }
                }
                div {
                    class: "input-hint",
                    "Press Enter to analyze, Shift+Enter for new line"
                }
            }
        }
    }
}

#[component]
pub fn PersonaPicker(current: Persona, on_select: Callback<Persona>) -> Element {
    rsx! {
        div {
            class: "persona-picker",
            style: "display: flex; gap: 0.25rem;",
            for option in Persona::ALL {
                button {
                    key: "{option.display_name()}",
                    title: "{option.tagline()}",
                    style: if option == current {
                        "padding: 0.25rem 0.5rem; background: var(--accent-bg, #3b82f6); color: white; border: none; border-radius: var(--radius-sm, 4px); cursor: pointer;"
                    } else {
                        "padding: 0.25rem 0.5rem; background: transparent; color: var(--text-secondary, #94a3b8); border: 1px solid var(--border-color, #334155); border-radius: var(--radius-sm, 4px); cursor: pointer;"
                    },
                    onclick: move |_| on_select.call(option),
                    "{option.icon()}"
                }
            }
        }
    }
}

#[component]
pub fn MessageBubble(turn: Turn) -> Element {
    let is_user = turn.role == Role::User;
    let sender_name = if is_user { "You" } else { "Reviewer" };
    let sender_initial = if is_user { "Y" } else { "R" };

    rsx! {
        div {
            class: if is_user { "message-row user-row" } else { "message-row assistant-row" },

            div {
                class: if is_user { "avatar user-avatar" } else { "avatar assistant-avatar" },
                "{sender_initial}"
            }

            div {
                class: "message-content",
                div {
                    class: "message-header",
                    span { class: "sender-name", "{sender_name}" }
                    span { class: "message-time", "{format_timestamp(turn.timestamp)}" }
                }
                div {
                    class: if is_user { "message-bubble user-bubble" } else { "message-bubble assistant-bubble" },
                    "{turn.text}"
                }
            }
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            class: "message-row assistant-row",
            div {
                class: "avatar assistant-avatar",
                "R"
            }
            div {
                class: "message-content",
                div {
                    class: "message-header",
                    span { class: "sender-name", "Analyzing..." }
                }
                div {
                    class: "typing-indicator",
                    span {}
                    span {}
                    span {}
                }
            }
        }
    }
}

#[component]
pub fn Recommendations(view: GateView, on_select: Callback<RecommendedPrompt>) -> Element {
    let gate = use_dashboard().session.gate;

    rsx! {
        div {
            class: "recommendations",
            if let Some(warning) = view.warning() {
                div { class: "recommendations-warning", "{warning}" }
            }
            if let Some(heading) = view.heading() {
                div { class: "recommendations-heading", "{heading}" }
            }
            div {
                class: "recommendations-grid",
                for recommendation in gate.prompts().iter().copied() {
                    button {
                        key: "{recommendation.id}",
                        class: "recommendation-card",
                        onclick: move |_| on_select.call(recommendation),
                        div {
                            class: "recommendation-title",
                            span { "{recommendation.icon}" }
                            span { "{recommendation.title}" }
                            span { class: "recommendation-category", "{recommendation.category}" }
                        }
                        div { class: "recommendation-prompt", "{recommendation.prompt}" }
                    }
                }
            }
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M").to_string()
}

// Chat-specific CSS styles
const CHAT_STYLES: &str = r#"
.chat-container {
    display: flex;
    flex-direction: column;
    height: 100%;
    background: var(--chat-bg, #0f172a);
    border-radius: var(--radius-md, 8px);
    overflow: hidden;
}

.chat-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1rem;
    background: var(--chat-header-bg, #1e293b);
    border-bottom: 1px solid var(--border-color, #334155);
    flex-shrink: 0;
}

.chat-title {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    font-weight: 600;
    color: var(--text-primary, #f8fafc);
}

.chat-icon {
    font-size: 1.25rem;
}

.messages-scroll-area {
    flex: 1;
    overflow-y: auto;
    padding: 1rem;
}

.messages-list {
    display: flex;
    flex-direction: column;
    gap: 1rem;
}

.message-row {
    display: flex;
    gap: 0.75rem;
}

.user-row {
    flex-direction: row-reverse;
}

.avatar {
    width: 32px;
    height: 32px;
    border-radius: 50%;
    display: flex;
    align-items: center;
    justify-content: center;
    font-weight: 600;
    flex-shrink: 0;
}

.user-avatar {
    background: var(--accent-bg, #3b82f6);
}

.assistant-avatar {
    background: var(--success-bg, #10b981);
}

.message-content {
    max-width: 75%;
}

.message-header {
    display: flex;
    gap: 0.5rem;
    font-size: 0.75rem;
    color: var(--text-secondary, #94a3b8);
    margin-bottom: 0.25rem;
}

.message-bubble {
    padding: 0.625rem 0.875rem;
    border-radius: 12px;
    white-space: pre-wrap;
    line-height: 1.5;
}

.user-bubble {
    background: var(--accent-bg, #3b82f6);
}

.assistant-bubble {
    background: var(--chat-header-bg, #1e293b);
}

.typing-indicator span {
    display: inline-block;
    width: 6px;
    height: 6px;
    margin-right: 3px;
    border-radius: 50%;
    background: var(--text-secondary, #94a3b8);
    animation: typing 1.2s infinite ease-in-out;
}

.typing-indicator span:nth-child(2) { animation-delay: 0.2s; }
.typing-indicator span:nth-child(3) { animation-delay: 0.4s; }

@keyframes typing {
    0%, 80%, 100% { opacity: 0.3; }
    40% { opacity: 1; }
}

.recommendations {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
}

.recommendations-warning {
    padding: 0.5rem 0.75rem;
    background: rgba(239, 68, 68, 0.2);
    color: #fca5a5;
    border-radius: var(--radius-sm, 4px);
    font-size: 0.875rem;
}

.recommendations-heading {
    font-weight: 600;
    color: var(--text-secondary, #94a3b8);
}

.recommendations-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
    gap: 0.5rem;
}

.recommendation-card {
    text-align: left;
    padding: 0.625rem;
    background: var(--chat-header-bg, #1e293b);
    color: var(--text-primary, #f8fafc);
    border: 1px solid var(--border-color, #334155);
    border-radius: var(--radius-md, 8px);
    cursor: pointer;
}

.recommendation-title {
    display: flex;
    gap: 0.375rem;
    font-weight: 600;
    margin-bottom: 0.25rem;
}

.recommendation-category {
    margin-left: auto;
    font-size: 0.7rem;
    color: var(--text-secondary, #94a3b8);
}

.recommendation-prompt {
    font-size: 0.8rem;
    color: var(--text-secondary, #94a3b8);
}

.chat-input-area {
    padding: 0.75rem 1rem;
    border-top: 1px solid var(--border-color, #334155);
    flex-shrink: 0;
}

.input-wrapper {
    display: flex;
    gap: 0.5rem;
}

.chat-textarea {
    flex: 1;
    padding: 0.5rem 0.75rem;
    background: var(--input-bg, #1f2937);
    color: var(--text-primary, #f8fafc);
    border: 1px solid var(--border-color, #334155);
    border-radius: var(--radius-md, 8px);
    resize: none;
    font: inherit;
}

.send-button {
    width: 40px;
    background: var(--accent-bg, #3b82f6);
    color: white;
    border: none;
    border-radius: var(--radius-md, 8px);
    cursor: pointer;
}

.send-button:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.input-hint {
    margin-top: 0.25rem;
    font-size: 0.7rem;
    color: var(--text-muted, #64748b);
}
"#;
