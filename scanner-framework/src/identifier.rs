//! Predicate-driven identifiers and the expected-start-character set.

use std::sync::Arc;

use common_framework::TextSlice;
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::ScanResult;
use crate::strategy::{commit, CompiledScanner, Compile, Scan};

/// Highest character value probed when building an [`ExpectedChars`] set from
/// a predicate.
pub const PROBED_CHARS: u32 = 255;

/// The set of characters that can start a match.
///
/// Values `0..=255` live in a bitmap for O(1) lookup; anything above is kept
/// in a small sorted list (only quote configurations put characters there).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedChars {
    low: [u64; 4],
    high: Vec<char>,
}

impl ExpectedChars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes every character in `0..=255` once.
    pub fn from_predicate<F>(predicate: F) -> Self
    where
        F: Fn(char) -> bool,
    {
        let mut set = Self::new();
        for ch in (0..=PROBED_CHARS).filter_map(char::from_u32) {
            if predicate(ch) {
                set.insert(ch);
            }
        }
        set
    }

    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut set = Self::new();
        for ch in chars {
            set.insert(ch);
        }
        set
    }

    pub fn insert(&mut self, ch: char) {
        let value = ch as u32;
        if value <= PROBED_CHARS {
            self.low[(value / 64) as usize] |= 1 << (value % 64);
        } else if let Err(index) = self.high.binary_search(&ch) {
            self.high.insert(index, ch);
        }
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        let value = ch as u32;
        if value <= PROBED_CHARS {
            self.low[(value / 64) as usize] & (1 << (value % 64)) != 0
        } else {
            self.high.binary_search(&ch).is_ok()
        }
    }

    /// Byte-level lookup used by compiled scanners; only meaningful for
    /// single-byte characters.
    #[inline]
    pub(crate) fn contains_byte(&self, byte: u8) -> bool {
        self.low[(byte / 64) as usize] & (1 << (byte % 64)) != 0
    }

    /// Iterates the set in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (0..=PROBED_CHARS)
            .filter_map(char::from_u32)
            .filter(|ch| self.contains(*ch))
            .chain(self.high.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.low.iter().map(|word| word.count_ones() as usize).sum::<usize>() + self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Character predicate shared between a scanner and its compiled form.
pub type CharPredicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// `[A-Za-z_]`
pub fn is_simple_sql_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// `[A-Za-z0-9_]`
pub fn is_simple_sql_identifier_part(ch: char) -> bool {
    is_simple_sql_identifier_start(ch) || ch.is_ascii_digit()
}

/// Matches one character accepted by `is_start` followed by any number of
/// characters accepted by `is_part`.
#[derive(Clone)]
pub struct CustomIdentifier {
    is_start: CharPredicate,
    is_part: CharPredicate,
    expected: ExpectedChars,
}

impl CustomIdentifier {
    pub fn new<S, P>(is_start: S, is_part: P) -> Self
    where
        S: Fn(char) -> bool + Send + Sync + 'static,
        P: Fn(char) -> bool + Send + Sync + 'static,
    {
        let expected = ExpectedChars::from_predicate(&is_start);
        Self {
            is_start: Arc::new(is_start),
            is_part: Arc::new(is_part),
            expected,
        }
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`
    pub fn simple_sql() -> Self {
        Self::new(is_simple_sql_identifier_start, is_simple_sql_identifier_part)
    }
}

impl std::fmt::Debug for CustomIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomIdentifier")
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

impl Scan for CustomIdentifier {
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        match cursor.peek() {
            Some(first) if (self.is_start)(first) => {}
            _ => return Ok(None),
        }

        let start = cursor.offset();
        cursor.advance();
        cursor.consume_while(|ch| (self.is_part)(ch));

        let span = cursor.slice_from(start);
        trace!(start, len = span.len(), "custom identifier");
        Ok(Some(span))
    }

    fn expected_chars(&self) -> Option<&ExpectedChars> {
        Some(&self.expected)
    }
}

impl Compile for CustomIdentifier {
    fn compile(&self) -> CompiledScanner {
        let start_table = self.expected.clone();
        let part_table = ExpectedChars::from_predicate(&*self.is_part);
        let is_start = Arc::clone(&self.is_start);
        let is_part = Arc::clone(&self.is_part);

        // ASCII is answered from the tables, everything else decodes the
        // character and asks the predicate.
        let accepts =
            move |text: &str, offset: usize, table: &ExpectedChars, predicate: &CharPredicate| {
                let byte = text.as_bytes()[offset];
                if byte.is_ascii() {
                    table.contains_byte(byte).then_some(1)
                } else {
                    text[offset..]
                        .chars()
                        .next()
                        .filter(|ch| predicate(*ch))
                        .map(char::len_utf8)
                }
            };

        CompiledScanner::new(Some(self.expected.clone()), move |cursor| {
            let buffer = cursor.buffer().clone();
            let text: &str = &buffer;
            let start = cursor.offset();
            if start >= text.len() {
                return Ok(None);
            }

            let Some(width) = accepts(text, start, &start_table, &is_start) else {
                return Ok(None);
            };

            let mut offset = start + width;
            while offset < text.len() {
                match accepts(text, offset, &part_table, &is_part) {
                    Some(width) => offset += width,
                    None => break,
                }
            }

            Ok(Some(commit(cursor, start, offset)))
        })
    }
}
