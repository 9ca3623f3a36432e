//! One timetable line per thread.

use std::borrow::Cow;

use crate::domain::Thread;

use super::config::RenderConfig;
use super::layout::Layout;

/// Format one thread: bold departure time, the express marker, and the
/// layout's annotation in parentheses.
///
/// Times are shown in the offset the API reported them in, which is the
/// local time of the departure station.
pub fn format_line(thread: &Thread, layout: &Layout, config: &RenderConfig) -> String {
    let mut line = format!("<b>{}</b>", thread.departure().format("%H:%M"));

    if thread.is_express() {
        line.push_str(&config.express_marker);
    }

    if let Some(note) = layout.annotation(thread) {
        line.push_str(" (");
        line.push_str(&escape_html(&note));
        line.push(')');
    }

    line
}

/// Escape the characters the chat transport's HTML mode treats specially.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
