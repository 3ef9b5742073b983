//! Quoted identifiers.
//!
//! A quoted identifier is enclosed in a start/end character pair. The end
//! character is embedded by doubling it; the start character needs no
//! escaping unless it is also the end character.

use common_framework::TextSlice;
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::{ConfigError, ScanError, ScanResult};
use crate::escape::unescape;
use crate::identifier::ExpectedChars;
use crate::strategy::{commit, fail_at, CompiledScanner, Compile, Scan};

/// A start/end quoting pair. Both characters may be equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuoteSpec {
    pub start: char,
    pub end: char,
}

impl QuoteSpec {
    pub const SINGLE_QUOTATION_MARKS: QuoteSpec = QuoteSpec::new('\'', '\'');
    pub const DOUBLE_QUOTATION_MARKS: QuoteSpec = QuoteSpec::new('"', '"');
    pub const SQUARE_BRACKETS: QuoteSpec = QuoteSpec::new('[', ']');
    pub const CURLY_BRACKETS: QuoteSpec = QuoteSpec::new('{', '}');
    pub const PARENTHESES: QuoteSpec = QuoteSpec::new('(', ')');
    pub const BACK_TICKS: QuoteSpec = QuoteSpec::new('`', '`');
    pub const ANGLE_BRACKETS: QuoteSpec = QuoteSpec::new('<', '>');

    pub const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    /// A pair using the same character on both sides.
    pub const fn symmetric(quote: char) -> Self {
        Self::new(quote, quote)
    }

    pub fn is_symmetric(&self) -> bool {
        self.start == self.end
    }
}

impl From<(char, char)> for QuoteSpec {
    fn from((start, end): (char, char)) -> Self {
        Self::new(start, end)
    }
}

/// Reads identifiers quoted with any of a set of [`QuoteSpec`]s, selected by
/// the start character found at the cursor.
#[derive(Debug, Clone)]
pub struct QuotedIdentifier {
    specs: Vec<QuoteSpec>,
    expected: ExpectedChars,
}

impl QuotedIdentifier {
    /// Accepts any of `specs`. When two specs share a start character the
    /// first one wins.
    pub fn new<I, Q>(specs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<QuoteSpec>,
    {
        let specs: Vec<QuoteSpec> = specs.into_iter().map(Into::into).collect();
        if specs.is_empty() {
            return Err(ConfigError::EmptyQuoteSet);
        }
        let expected = ExpectedChars::from_chars(specs.iter().map(|spec| spec.start));
        Ok(Self { specs, expected })
    }

    /// Accepts a single fixed pair.
    pub fn with_spec(spec: QuoteSpec) -> Self {
        Self {
            expected: ExpectedChars::from_chars([spec.start]),
            specs: vec![spec],
        }
    }

    /// `'name'`
    pub fn single() -> Self {
        Self::with_spec(QuoteSpec::SINGLE_QUOTATION_MARKS)
    }

    /// `"name"`
    pub fn double() -> Self {
        Self::with_spec(QuoteSpec::DOUBLE_QUOTATION_MARKS)
    }

    /// `[name]`
    pub fn square_brackets() -> Self {
        Self::with_spec(QuoteSpec::SQUARE_BRACKETS)
    }

    /// `"name"`, `[name]` and `` `name` ``.
    pub fn sql() -> Self {
        Self::from_known([
            QuoteSpec::DOUBLE_QUOTATION_MARKS,
            QuoteSpec::SQUARE_BRACKETS,
            QuoteSpec::BACK_TICKS,
        ])
    }

    /// Like [`QuotedIdentifier::sql`], also accepting `'name'`.
    pub fn sql_literal() -> Self {
        Self::from_known([
            QuoteSpec::SINGLE_QUOTATION_MARKS,
            QuoteSpec::DOUBLE_QUOTATION_MARKS,
            QuoteSpec::SQUARE_BRACKETS,
            QuoteSpec::BACK_TICKS,
        ])
    }

    fn from_known<const N: usize>(specs: [QuoteSpec; N]) -> Self {
        Self {
            expected: ExpectedChars::from_chars(specs.iter().map(|spec| spec.start)),
            specs: specs.to_vec(),
        }
    }

    pub fn specs(&self) -> &[QuoteSpec] {
        &self.specs
    }

    /// The end character paired with `start`, if `start` opens a quote.
    pub fn end_for(&self, start: char) -> Option<char> {
        self.specs
            .iter()
            .find(|spec| spec.start == start)
            .map(|spec| spec.end)
    }

    /// Reads a quoted identifier and returns its raw text, delimiters and
    /// doubled end characters included.
    pub fn read(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        let Some(first) = cursor.peek() else {
            return Ok(None);
        };
        let Some(end) = self.end_for(first) else {
            return Ok(None);
        };

        let start = cursor.offset();
        cursor.advance();

        let mut closed = false;
        while let Some(ch) = cursor.peek() {
            if ch == end {
                if cursor.peek_nth(1) == Some(end) {
                    cursor.advance_by(2);
                    continue;
                }
                cursor.advance();
                closed = true;
                break;
            }
            cursor.advance();
        }

        if !closed {
            trace!(start, quote = %end, "unclosed quoted identifier");
            return Err(ScanError::UnclosedQuote {
                quote: end,
                position: cursor.position(),
            });
        }

        if cursor.offset() - start == first.len_utf8() + end.len_utf8() {
            return Err(ScanError::ZeroLengthIdentifier {
                position: cursor.position(),
            });
        }

        Ok(Some(cursor.slice_from(start)))
    }

    /// Compiles the raw-text form of [`QuotedIdentifier::read`].
    pub fn compile_read(&self) -> CompiledScanner {
        self.compile_with(false)
    }

    fn compile_with(&self, unescaped: bool) -> CompiledScanner {
        let mut ascii_ends = [None; 128];
        let mut other_ends = Vec::new();
        for spec in self.specs.iter().rev() {
            if spec.start.is_ascii() {
                ascii_ends[spec.start as usize] = Some(spec.end);
            } else {
                other_ends.insert(0, *spec);
            }
        }

        CompiledScanner::new(Some(self.expected.clone()), move |cursor| {
            let buffer = cursor.buffer().clone();
            let text: &str = &buffer;
            let bytes = text.as_bytes();
            let start = cursor.offset();
            if start >= bytes.len() {
                return Ok(None);
            }

            let lead = bytes[start];
            let (first_len, end) = if lead.is_ascii() {
                match ascii_ends[lead as usize] {
                    Some(end) => (1, end),
                    None => return Ok(None),
                }
            } else {
                let first = text[start..].chars().next();
                match other_ends.iter().find(|spec| Some(spec.start) == first) {
                    Some(spec) => (spec.start.len_utf8(), spec.end),
                    None => return Ok(None),
                }
            };

            let mut encoded = [0u8; 4];
            let end_bytes = end.encode_utf8(&mut encoded).as_bytes();
            let end_len = end_bytes.len();

            let mut offset = start + first_len;
            loop {
                match text[offset..].find(end) {
                    None => {
                        return Err(fail_at(cursor, bytes.len(), |position| {
                            ScanError::UnclosedQuote {
                                quote: end,
                                position,
                            }
                        }))
                    }
                    Some(found) => offset += found + end_len,
                }
                if bytes[offset..].starts_with(end_bytes) {
                    offset += end_len;
                    continue;
                }
                break;
            }

            if offset - start == first_len + end_len {
                return Err(fail_at(cursor, offset, |position| {
                    ScanError::ZeroLengthIdentifier { position }
                }));
            }

            let raw = commit(cursor, start, offset);
            if unescaped {
                Ok(Some(unescape(&raw.slice(first_len, raw.len() - end_len), end)))
            } else {
                Ok(Some(raw))
            }
        })
    }
}

impl Scan for QuotedIdentifier {
    /// Reads a quoted identifier and returns its logical value: delimiters
    /// stripped and doubled end characters collapsed.
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        let Some(raw) = self.read(cursor)? else {
            return Ok(None);
        };

        let mut chars = raw.chars();
        let (Some(first), Some(end)) = (chars.next(), chars.next_back()) else {
            return Ok(None);
        };
        let interior = raw.slice(first.len_utf8(), raw.len() - end.len_utf8());
        Ok(Some(unescape(&interior, end)))
    }

    fn expected_chars(&self) -> Option<&ExpectedChars> {
        Some(&self.expected)
    }
}

impl Compile for QuotedIdentifier {
    fn compile(&self) -> CompiledScanner {
        self.compile_with(true)
    }
}

