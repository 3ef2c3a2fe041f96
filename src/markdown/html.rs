//! HTML assembly helpers.
//!
//!     The grammar's reduction actions produce the document body; this
//!     module wraps it in the fixed page skeleton and provides the escape
//!     used for code spans. Plain text outside code spans is deliberately
//!     emitted verbatim.

/// Escape the five HTML-significant characters. Ampersands first so later
/// replacements do not double-escape.
pub fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap a rendered body in the full document skeleton.
pub fn assemble(body: &str) -> String {
    format!("<!DOCTYPE html><html><body>{body}</body></html>")
}
