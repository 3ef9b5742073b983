//! Line and block comments.
//!
//! Block comments come in two flavours. With nesting allowed every inner
//! start mark must be balanced by an end mark. Without nesting a second start
//! mark before the first end mark means the first comment was never closed,
//! and the error is reported where the scan of that first comment stopped.

use std::sync::Arc;

use common_framework::{Position, TextSlice};
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::{ConfigError, ScanError, ScanResult};
use crate::strategy::{commit, fail_at, utf8_len, CompiledScanner, Compile, Scan};

/// Returns true for the characters that terminate a line comment.
#[inline]
pub fn is_new_line(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{b}')
}

/// Predicate deciding whether a line comment starts at the cursor.
pub type StartPredicate = Arc<dyn Fn(&Cursor) -> bool + Send + Sync>;

/// How the start of a line comment is recognised.
#[derive(Clone)]
pub enum CommentStart {
    Char(char),
    Str(String),
    Predicate(StartPredicate),
}

impl CommentStart {
    fn matches(&self, cursor: &Cursor) -> bool {
        match self {
            CommentStart::Char(ch) => cursor.peek() == Some(*ch),
            CommentStart::Str(mark) => cursor.starts_with(mark),
            CommentStart::Predicate(predicate) => predicate(cursor),
        }
    }
}

impl std::fmt::Debug for CommentStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentStart::Char(ch) => f.debug_tuple("Char").field(ch).finish(),
            CommentStart::Str(mark) => f.debug_tuple("Str").field(mark).finish(),
            CommentStart::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A comment running to the end of the line. End of input closes it too.
#[derive(Debug, Clone)]
pub struct LineComment {
    start: CommentStart,
}

impl LineComment {
    /// A comment introduced by `mark`, e.g. `--` or `//`.
    pub fn new(mark: impl Into<String>) -> Self {
        Self {
            start: CommentStart::Str(mark.into()),
        }
    }

    /// A comment introduced by a single character, e.g. `#`.
    pub fn with_char(mark: char) -> Self {
        Self {
            start: CommentStart::Char(mark),
        }
    }

    /// A comment whose start is decided by a predicate over the cursor.
    pub fn with_predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Cursor) -> bool + Send + Sync + 'static,
    {
        Self {
            start: CommentStart::Predicate(Arc::new(predicate)),
        }
    }

    /// `-- comment`
    pub fn sql() -> Self {
        Self::new("--")
    }

    /// Reads the comment and its line terminator.
    pub fn read(&self, cursor: &mut Cursor) -> Option<TextSlice> {
        if cursor.is_eof() || !self.start.matches(cursor) {
            return None;
        }

        let start = cursor.offset();
        cursor.consume_while(|ch| !is_new_line(ch));
        cursor.advance();

        Some(cursor.slice_from(start))
    }

    pub fn skip(&self, cursor: &mut Cursor) -> bool {
        self.read(cursor).is_some()
    }
}

impl Scan for LineComment {
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        Ok(self.read(cursor))
    }
}

impl Compile for LineComment {
    fn compile(&self) -> CompiledScanner {
        let start_mark = self.start.clone();

        CompiledScanner::new(None, move |cursor| {
            let buffer = cursor.buffer().clone();
            let bytes = buffer.as_bytes();
            let start = cursor.offset();
            if start >= bytes.len() {
                return Ok(None);
            }

            let opened = match &start_mark {
                CommentStart::Char(ch) if ch.is_ascii() => bytes[start] == *ch as u8,
                CommentStart::Str(mark) => bytes[start..].starts_with(mark.as_bytes()),
                other => other.matches(cursor),
            };
            if !opened {
                return Ok(None);
            }

            let end = bytes[start..]
                .iter()
                .position(|b| matches!(b, b'\n' | b'\r' | 0x0b))
                .map_or(bytes.len(), |at| start + at + 1);

            Ok(Some(commit(cursor, start, end)))
        })
    }
}

/// A comment delimited by start and end marks, e.g. `/* ... */`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockComment {
    start: String,
    end: String,
    nesting: bool,
}

impl BlockComment {
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        nesting: bool,
    ) -> Result<Self, ConfigError> {
        let (start, end) = (start.into(), end.into());
        if start.is_empty() || end.is_empty() {
            return Err(ConfigError::EmptyCommentMark);
        }
        Ok(Self {
            start,
            end,
            nesting,
        })
    }

    /// `/* ... */`, nesting allowed.
    pub fn sql() -> Self {
        Self {
            start: "/*".to_string(),
            end: "*/".to_string(),
            nesting: true,
        }
    }

    /// `/* ... */` without nesting, as in C.
    pub fn c_style() -> Self {
        Self {
            start: "/*".to_string(),
            end: "*/".to_string(),
            nesting: false,
        }
    }

    pub fn start_mark(&self) -> &str {
        &self.start
    }

    pub fn end_mark(&self) -> &str {
        &self.end
    }

    pub fn is_nesting_allowed(&self) -> bool {
        self.nesting
    }

    fn missing_end(&self, position: Position) -> ScanError {
        trace!(%position, mark = %self.end, "unterminated block comment");
        ScanError::MissingEndComment {
            marker: self.end.clone(),
            position,
        }
    }

    /// Reads a block comment, start and end marks included.
    pub fn read(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        if cursor.is_eof() || !cursor.starts_with(&self.start) {
            return Ok(None);
        }

        let start = cursor.offset();
        cursor.advance_by(self.start.chars().count());

        if cursor.is_eof() {
            return Err(self.missing_end(cursor.position()));
        }

        if self.nesting {
            self.close_nested(cursor)?;
        } else {
            self.close_flat(cursor)?;
        }

        Ok(Some(cursor.slice_from(start)))
    }

    pub fn skip(&self, cursor: &mut Cursor) -> Result<bool, ScanError> {
        Ok(self.read(cursor)?.is_some())
    }

    /// Scans to the end mark that balances the already consumed start mark.
    fn close_nested(&self, cursor: &mut Cursor) -> Result<(), ScanError> {
        let start_len = self.start.chars().count();
        let end_len = self.end.chars().count();
        let mut opened = 1usize;
        let mut closed = 0usize;

        while !cursor.is_eof() {
            if cursor.starts_with(&self.start) {
                opened += 1;
                cursor.advance_by(start_len);
            } else if cursor.starts_with(&self.end) {
                closed += 1;
                cursor.advance_by(end_len);
                if closed >= opened {
                    return Ok(());
                }
            } else {
                cursor.advance();
            }
        }

        Err(self.missing_end(cursor.position()))
    }

    /// Scans to the first end mark. A start mark found first is an error,
    /// raised at the last position scanned inside the comment.
    fn close_flat(&self, cursor: &mut Cursor) -> Result<(), ScanError> {
        let mut last_safe = cursor.checkpoint();

        while !cursor.is_eof() {
            if cursor.starts_with(&self.start) {
                cursor.restore(last_safe);
                return Err(self.missing_end(cursor.position()));
            }
            if cursor.starts_with(&self.end) {
                cursor.advance_by(self.end.chars().count());
                return Ok(());
            }
            cursor.advance();
            last_safe = cursor.checkpoint();
        }

        Err(self.missing_end(cursor.position()))
    }
}

impl Scan for BlockComment {
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        self.read(cursor)
    }
}

impl Compile for BlockComment {
    fn compile(&self) -> CompiledScanner {
        let start_mark = self.start.clone().into_bytes();
        let end_mark = self.end.clone().into_bytes();
        let marker = self.end.clone();
        let nesting = self.nesting;
        // Only positions holding the first character of a mark can change
        // the state, everything in between is skipped in one search.
        let (start_lead, end_lead) = match (self.start.chars().next(), self.end.chars().next()) {
            (Some(s), Some(e)) => (s, e),
            _ => ('\0', '\0'),
        };

        CompiledScanner::new(None, move |cursor| {
            let buffer = cursor.buffer().clone();
            let text: &str = &buffer;
            let bytes = text.as_bytes();
            let start = cursor.offset();
            if start >= bytes.len() || !bytes[start..].starts_with(&start_mark) {
                return Ok(None);
            }

            let missing = |position| ScanError::MissingEndComment {
                marker: marker.clone(),
                position,
            };
            let next_lead = |from: usize| {
                text[from..]
                    .find(|ch: char| ch == start_lead || ch == end_lead)
                    .map(|at| from + at)
            };

            let mut offset = start + start_mark.len();
            let mut opened = 1usize;
            let mut closed = 0usize;

            loop {
                let Some(at) = next_lead(offset) else {
                    return Err(fail_at(cursor, bytes.len(), missing));
                };
                offset = at;

                if bytes[offset..].starts_with(&start_mark) {
                    if !nesting {
                        return Err(fail_at(cursor, offset, missing));
                    }
                    opened += 1;
                    offset += start_mark.len();
                } else if bytes[offset..].starts_with(&end_mark) {
                    offset += end_mark.len();
                    closed += 1;
                    if !nesting || closed >= opened {
                        return Ok(Some(commit(cursor, start, offset)));
                    }
                } else {
                    offset += utf8_len(bytes[offset]);
                }
            }
        })
    }
}
