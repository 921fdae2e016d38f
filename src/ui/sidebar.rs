//! Sidebar with the session list
//!
//! New-chat, select, and delete all go through the conversation engine
//! so the active view and any in-flight generation stay consistent.

use dioxus::prelude::*;

use crate::app::AppState;

#[component]
pub fn Sidebar() -> Element {
    let app_state = use_context::<AppState>();

    let sessions = app_state.sessions.read().clone();
    let selected_id = crate::engine::lock(&app_state.repo)
        .current_session_id()
        .map(str::to_owned);

    let handle_new = {
        let mut app_state = app_state.clone();
        move |_| {
            if let Err(e) = app_state.engine.write().new_conversation() {
                tracing::error!("failed to start a new conversation: {e}");
            }
            app_state.refresh_sessions();
        }
    };

    let handle_dark_toggle = {
        let mut app_state = app_state.clone();
        move |_| {
            let enabled = !*app_state.dark_mode.read();
            app_state.dark_mode.set(enabled);
            if let Err(e) = app_state.prefs.set_dark_mode(enabled) {
                tracing::warn!("failed to persist dark mode: {e}");
            }
        }
    };

    let dark_label = if *app_state.dark_mode.read() {
        "Yorug' rejim"
    } else {
        "Tungi rejim"
    };

    rsx! {
        div {
            class: "flex flex-col w-64 h-full border-r sidebar",

            div {
                class: "p-3",
                button {
                    class: "w-full px-3 py-2 rounded-lg new-chat-button",
                    onclick: handle_new,
                    "+ Yangi suhbat"
                }
            }

            div {
                class: "flex-1 overflow-y-auto p-2 space-y-1",

                if sessions.is_empty() {
                    div {
                        class: "text-center text-sm opacity-50 py-10",
                        "Suhbatlar yo'q"
                    }
                } else {
                    {sessions.into_iter().map(|session| {
                        let is_selected = selected_id.as_deref() == Some(session.id.as_str());
                        let row_class = if is_selected {
                            "group flex items-center gap-2 px-3 py-2 rounded-lg session-row selected"
                        } else {
                            "group flex items-center gap-2 px-3 py-2 rounded-lg session-row"
                        };

                        let select_id = session.id.clone();
                        let delete_id = session.id.clone();
                        let mut select_state = app_state.clone();
                        let mut delete_state = app_state.clone();

                        rsx! {
                            div {
                                key: "{session.id}",
                                class: "{row_class}",
                                onclick: move |_| {
                                    if let Err(e) = select_state.engine.write().select_session(&select_id) {
                                        tracing::error!("failed to select session: {e}");
                                    }
                                    select_state.refresh_sessions();
                                },

                                span {
                                    class: "flex-1 truncate text-sm",
                                    "{session.title}"
                                }
                                button {
                                    class: "opacity-0 group-hover:opacity-100 delete-button",
                                    title: "O'chirish",
                                    onclick: move |evt: MouseEvent| {
                                        evt.stop_propagation();
                                        if let Err(e) = delete_state.engine.write().delete_session(&delete_id) {
                                            tracing::error!("failed to delete session: {e}");
                                        }
                                        delete_state.refresh_sessions();
                                    },
                                    "✕"
                                }
                            }
                        }
                    })}
                }
            }

            div {
                class: "p-3 border-t",
                button {
                    class: "w-full px-3 py-2 rounded-lg text-sm mode-toggle",
                    onclick: handle_dark_toggle,
                    "{dark_label}"
                }
            }
        }
    }
}
