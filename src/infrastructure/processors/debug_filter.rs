//! Removal of `;;;` debug annotations.
//!
//! Anything from the marker to the end of its line is dropped: a whole line
//! when the marker starts it, the tail of the line otherwise. Line terminators
//! stay in place. The match is purely textual, so a marker inside a string
//! literal or comment is stripped too.

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::borrow::Cow;

pub const DEBUG_MARKER: &str = ";;;";

// Byte mode (`-u`) so non-UTF-8 content passes through and `.` is any byte but `\n`.
static DEBUG_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?m-u){}.+$", regex::escape(DEBUG_MARKER)))
        .expect("debug marker pattern is valid")
});

/// Strip every debug fragment. Borrows the input when nothing matched.
pub fn strip_debug_lines(source: &[u8]) -> Cow<'_, [u8]> {
    DEBUG_LINE_REGEX.replace_all(source, &b""[..])
}

pub fn count_debug_fragments(source: &[u8]) -> usize {
    DEBUG_LINE_REGEX.find_iter(source).count()
}
