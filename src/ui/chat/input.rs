//! Chat input component

use dioxus::prelude::*;

#[component]
pub fn ChatInput(on_send: EventHandler<String>, is_generating: bool) -> Element {
    let mut text = use_signal(String::new);

    let handle_keydown = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
            evt.prevent_default();
            if !is_generating && !text().trim().is_empty() {
                on_send.call(text());
                text.set(String::new());
            }
        }
    };

    let can_send = !is_generating && !text().trim().is_empty();
    let send_class = if can_send {
        "flex-shrink-0 w-9 h-9 rounded-full send-button active"
    } else {
        "flex-shrink-0 w-9 h-9 rounded-full send-button"
    };

    rsx! {
        div {
            class: "flex items-center gap-2 input-shell",

            textarea {
                class: "flex-1 bg-transparent outline-none resize-none px-4 py-3",
                placeholder: "Xabar yozing...",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
                onkeydown: handle_keydown,
                disabled: is_generating,
                rows: "1",
            }

            button {
                class: "{send_class}",
                disabled: !can_send,
                title: "Yuborish (Enter)",
                onclick: move |_| {
                    if can_send {
                        on_send.call(text());
                        text.set(String::new());
                    }
                },
                "↑"
            }
        }
    }
}
