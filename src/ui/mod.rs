//! UI components for aGPT
//!
//! This module contains all user interface components built with Dioxus.

pub mod chat;
pub mod sidebar;
pub mod widgets;

use dioxus::prelude::*;

use crate::app::AppState;

#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();

    let shell_class = if *app_state.dark_mode.read() {
        "flex h-screen overflow-hidden app-shell dark"
    } else {
        "flex h-screen overflow-hidden app-shell light"
    };

    rsx! {
        div {
            class: "{shell_class}",

            widgets::BirthdayOverlay {}
            sidebar::Sidebar {}

            div {
                class: "flex flex-col flex-1 h-full overflow-hidden",

                div {
                    class: "flex items-center justify-between gap-3 p-4 border-b",
                    h1 { class: "text-lg font-bold gradient-text", "aGPT" }
                    div {
                        class: "flex items-center gap-3",
                        widgets::AgeBadge {}
                        widgets::RealTimeClock {}
                    }
                }

                chat::ChatView {}
            }
        }
    }
}
