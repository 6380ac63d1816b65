//! Helpers for putting user-typed text (world names, environment tokens,
//! generator specs) into single-line log records.

use std::fmt::Write;

/// Longest preview kept in a log line, in characters.
const MAX_PREVIEW: usize = 96;

/// Escape a user-supplied value for logging inside single quotes.
///
/// Backslashes, quotes and control characters are escaped (`\n`, `\t`,
/// `\r`, otherwise `\xNN`) and values longer than the preview limit are cut
/// with an ellipsis.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
