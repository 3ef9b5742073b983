//! Doubled-quote escaping.
//!
//! Inside a quoted identifier a literal closing character is written twice.
//! These functions convert between the raw (doubled) text and its logical
//! value. When there is nothing to convert the input slice is returned as is,
//! sharing its buffer.

use common_framework::TextSlice;

/// Doubles every occurrence of `ch` in `span`.
pub fn escape(span: &TextSlice, ch: char) -> TextSlice {
    let occurrences = span.matches(ch).count();
    if occurrences == 0 {
        return span.clone();
    }

    let mut escaped = String::with_capacity(span.len() + occurrences * ch.len_utf8());
    for c in span.chars() {
        if c == ch {
            escaped.push(c);
        }
        escaped.push(c);
    }

    TextSlice::from_string(escaped)
}

/// Collapses every doubled occurrence of `ch` in `span` to a single one.
pub fn unescape(span: &TextSlice, ch: char) -> TextSlice {
    let has_pair = span
        .chars()
        .zip(span.chars().skip(1))
        .any(|(a, b)| a == ch && b == ch);
    if !has_pair {
        return span.clone();
    }

    let mut unescaped = String::with_capacity(span.len());
    let mut chars = span.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ch && chars.peek() == Some(&ch) {
            chars.next();
        }
        unescaped.push(c);
    }

    TextSlice::from_string(unescaped)
}
