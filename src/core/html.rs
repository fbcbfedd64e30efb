//! Small HTML helpers shared by the popup builder and the renderer.

use chrono::Utc;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape for a single-quoted JavaScript string literal.
pub fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            '>' => out.push_str("\\x3E"),
            '&' => out.push_str("\\x26"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON text that can sit inside an inline `<script>` element.
pub fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
        .replace("<!--", "<\\!--")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Strip everything but `A-Z a-z 0-9 _ -` from a CSS class name.
pub fn sanitize_html_class(class: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"%[a-fA-F0-9]{2}|[^A-Za-z0-9_-]").expect("static pattern"));
    re.replace_all(class, "").into_owned()
}

/// Normalize a category filter to the slug form directories store.
pub fn sanitize_slug(value: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9_]+").expect("static pattern"));
    let lowered = value.trim().to_lowercase();
    re.replace_all(&lowered, "-").trim_matches('-').to_string()
}

static MAP_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique container id: time based hex plus a process-wide counter.
pub fn unique_map_id(prefix: &str) -> String {
    let micros = Utc::now().timestamp_micros();
    let seq = MAP_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{:x}{:x}", prefix, micros, seq)
}
