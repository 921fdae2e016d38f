//! Chat interface
//!
//! Main chat view: message list, typing indicator, empty-state
//! suggestions, and the send flow through the conversation engine.

pub mod input;
pub mod message;

use dioxus::prelude::*;

use crate::app::AppState;
use input::ChatInput;
use message::MessageBubble;

/// Suggestion prompts shown when no conversation is active
const SUGGESTIONS: &[&str] = &[
    "Sun'iy intellekt haqida qisqa hikoya aytib bering.",
    "Kvant hisoblashni oddiy tilda tushuntiring.",
    "Sizni kim yaratgan?",
];

#[component]
pub fn ChatView() -> Element {
    let app_state = use_context::<AppState>();

    // Dispatch one send: persist the user message through the engine,
    // then run the generation call and reconcile its outcome.
    let handle_send = {
        let mut app_state = app_state.clone();
        move |text: String| {
            let ticket = match app_state.engine.write().send_message(&text) {
                Ok(ticket) => ticket,
                Err(e) => {
                    tracing::warn!("send rejected: {e}");
                    app_state.last_error.set(Some(e.to_string()));
                    return;
                }
            };
            app_state.last_error.set(None);
            app_state.is_generating.set(true);
            app_state.refresh_sessions();

            let mut app_state = app_state.clone();
            spawn(async move {
                let generator = app_state.engine.read().generator();
                match generator.generate(&ticket.prompt).await {
                    Ok(reply) => {
                        if let Err(e) = app_state.engine.write().on_response(&ticket, &reply) {
                            tracing::error!("failed to record assistant reply: {e}");
                            app_state.last_error.set(Some(e.to_string()));
                        }
                    }
                    Err(e) => {
                        app_state.engine.write().on_error(&ticket, &e);
                        app_state.last_error.set(Some(e.to_string()));
                    }
                }
                app_state.is_generating.set(false);
                app_state.refresh_sessions();
            });
        }
    };

    let messages = app_state.engine.read().messages().to_vec();
    let is_generating = *app_state.is_generating.read();
    let last_error = app_state.last_error.read().clone();

    let suggest_send = handle_send.clone();

    rsx! {
        main {
            class: "flex-1 overflow-y-auto p-4 md:p-6",

            if messages.is_empty() {
                div {
                    class: "flex flex-col items-center justify-start text-center space-y-6 pt-8",
                    h1 { class: "text-3xl font-bold gradient-text", "aGPTga xush kelibsiz" }
                    p {
                        class: "max-w-md opacity-70",
                        "Ilg'or AI yordamchi. Mendan xohlagan narsani so'rashingiz mumkin!"
                    }

                    div {
                        class: "max-w-md w-full space-y-2 mt-6",
                        {SUGGESTIONS.iter().map(|suggestion| {
                            let mut send = suggest_send.clone();
                            rsx! {
                                button {
                                    key: "{suggestion}",
                                    class: "w-full px-4 py-3 rounded-lg border text-left suggestion",
                                    onclick: move |_| send(suggestion.to_string()),
                                    "{suggestion}"
                                }
                            }
                        })}
                    }
                }
            } else {
                div {
                    class: "max-w-3xl mx-auto",
                    {messages.into_iter().enumerate().map(|(index, msg)| rsx! {
                        MessageBubble { key: "{index}", message: msg }
                    })}

                    if is_generating {
                        div {
                            class: "flex my-4",
                            div {
                                class: "rounded-2xl py-3 px-4 typing-indicator",
                                span {} span {} span {}
                            }
                        }
                    }
                }
            }
        }

        div {
            class: "border-t p-4",

            {last_error.map(|error| rsx! {
                div {
                    class: "max-w-3xl mx-auto mb-2 px-4 py-2 rounded-lg text-sm error-banner",
                    "Xatolik: {error}"
                }
            })}

            div {
                class: "max-w-3xl mx-auto",
                ChatInput {
                    on_send: handle_send,
                    is_generating,
                }
            }
        }
    }
}
