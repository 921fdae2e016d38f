//! Message bubble rendering

use chrono::{DateTime, Local, TimeZone, Utc};
use dioxus::prelude::*;

use crate::types::message::{Message, Role};
use crate::widgets::clock::format_time;

/// Bubble timestamp in the viewer's timezone
fn bubble_time<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String {
    format_time(&timestamp.with_timezone(tz))
}

#[component]
pub fn MessageBubble(message: Message) -> Element {
    let (row_class, bubble_class) = match message.role {
        Role::User => (
            "flex justify-end my-4",
            "rounded-2xl rounded-tr-none py-3 px-4 max-w-[85%] bubble-user",
        ),
        Role::Assistant => (
            "flex justify-start my-4",
            "rounded-2xl rounded-tl-none py-3 px-4 max-w-[85%] bubble-assistant",
        ),
    };

    let time = bubble_time(&message.timestamp, &Local);

    rsx! {
        div {
            class: "{row_class}",
            div {
                class: "{bubble_class}",
                p { class: "whitespace-pre-wrap break-words", "{message.content}" }
                span { class: "block text-[10px] opacity-50 mt-1", "{time}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_bubble_time_uses_viewer_timezone() {
        let t = Utc.with_ymd_and_hms(2026, 8, 23, 23, 30, 5).unwrap();
        let tashkent = FixedOffset::east_opt(5 * 3600).unwrap();
        // 23:30 UTC is 04:30 the next day at UTC+5, not the UTC wall time.
        assert_eq!(bubble_time(&t, &tashkent), "04:30:05");
        assert_eq!(bubble_time(&t, &Utc), "23:30:05");
    }
}
