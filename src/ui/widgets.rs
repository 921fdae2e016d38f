//! Widget components
//!
//! Real-time clock, age badge, and the birthday celebration overlay.
//! The arithmetic lives in `crate::widgets`; these components only
//! render it.

use std::time::Duration;

use chrono::{Local, Utc};
use dioxus::prelude::*;

use crate::app::AppState;
use crate::widgets::age::{calculate_age, is_birthday};
use crate::widgets::clock::{format_date, format_time};

#[component]
pub fn RealTimeClock() -> Element {
    let mut now = use_signal(Local::now);

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            now.set(Local::now());
        }
    });

    let current = now();
    let date = format_date(&current);
    let time = format_time(&current);

    rsx! {
        div {
            class: "flex flex-col items-center gap-1 px-3 py-2 rounded-lg border widget-card",
            div { class: "text-xs opacity-60", "{date}" }
            div { class: "font-mono text-sm font-bold", "{time}" }
        }
    }
}

#[component]
pub fn AgeBadge() -> Element {
    let app_state = use_context::<AppState>();
    let prefs = app_state.prefs.clone();
    let mut show_birthday = app_state.show_birthday;

    let initial_birth = prefs.birth_date();
    let mut birth = use_signal(move || initial_birth);
    let mut now = use_signal(Utc::now);
    let mut draft = use_signal(String::new);
    let mut notified = use_signal(|| false);

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            now.set(Utc::now());
            if let Some(date) = birth() {
                if is_birthday(date, Local::now().date_naive()) && !notified() {
                    notified.set(true);
                    show_birthday.set(true);
                }
            }
        }
    });

    let save_prefs = prefs.clone();
    let remove_prefs = prefs;

    match birth() {
        None => rsx! {
            div {
                class: "flex items-center gap-2 px-3 py-2 rounded-lg border widget-card",
                input {
                    r#type: "date",
                    class: "text-xs bg-transparent outline-none",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                button {
                    class: "text-xs save-button",
                    onclick: move |_| {
                        let Ok(date) = draft().parse::<chrono::NaiveDate>() else {
                            return;
                        };
                        if let Err(e) = save_prefs.set_birth_date(date) {
                            tracing::warn!("failed to persist birth date: {e}");
                        }
                        birth.set(Some(date));
                        notified.set(false);
                    },
                    "Saqlash"
                }
            }
        },
        Some(date) => {
            let age = calculate_age(date, now());
            rsx! {
                div {
                    class: "flex items-center gap-2 px-3 py-2 rounded-lg border widget-card",
                    div {
                        class: "flex flex-col items-center gap-1",
                        div { class: "text-xs opacity-60", "Yashagan vaqt" }
                        div {
                            class: "font-mono text-xs font-bold",
                            "{age.years}y / {age.months}m / {age.days}d / {age.hours}:{age.minutes:02}:{age.seconds:02}"
                        }
                    }
                    button {
                        class: "text-xs remove-button",
                        title: "O'chirish",
                        onclick: move |_| {
                            if let Err(e) = remove_prefs.clear_birth_date() {
                                tracing::warn!("failed to clear birth date: {e}");
                            }
                            birth.set(None);
                            notified.set(false);
                        },
                        "✕"
                    }
                }
            }
        }
    }
}

#[component]
pub fn BirthdayOverlay() -> Element {
    let app_state = use_context::<AppState>();
    let mut show_birthday = app_state.show_birthday;

    if !show_birthday() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center birthday-overlay",
            div {
                class: "rounded-2xl p-8 text-center space-y-4 birthday-card",
                h2 { class: "text-2xl font-bold", "🎉 Tug'ilgan kuningiz muborak!" }
                p { class: "opacity-70", "Sizga baxt va omad tilaymiz!" }
                button {
                    class: "px-4 py-2 rounded-lg close-button",
                    onclick: move |_| show_birthday.set(false),
                    "Yopish"
                }
            }
        }
    }
}
