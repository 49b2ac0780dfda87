// SPDX-License-Identifier: MIT

//!
//! Small helpers shared by the elements when generating markup
//!

/// Escape a value so it can be placed inside a double quoted HTML attribute
pub(crate) fn escape_html_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text placed between HTML tags
pub(crate) fn escape_html_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Quote a string as a JavaScript string literal which is safe to embed in a
/// `<script>` block
pub fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string().replace("</", "<\\/")
}
