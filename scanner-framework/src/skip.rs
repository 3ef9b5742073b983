//! Extended whitespace: runs of whitespace and comments skipped as one.
//!
//! An [`ExtendedWhitespace`] holds an ordered list of skip units. It keeps
//! making passes over the whole list until a pass skips nothing, which makes
//! it `(u1 | u2 | ... | un)*` reporting whether anything was skipped at all.

use std::sync::Arc;

use common_framework::TextSlice;

use crate::comment::{BlockComment, LineComment};
use crate::cursor::Cursor;
use crate::error::{ScanError, ScanResult};
use crate::identifier::ExpectedChars;
use crate::strategy::{commit, utf8_len, CompiledScanner, Compile, Scan};

/// A caller supplied rule that skips one unit of input.
///
/// Implementations must advance the cursor whenever they return `true`; a
/// rule that matches without consuming anything makes the engine loop
/// forever.
pub trait SkipRule: Send + Sync {
    fn skip(&self, cursor: &mut Cursor) -> Result<bool, ScanError>;
}

impl<F> SkipRule for F
where
    F: Fn(&mut Cursor) -> Result<bool, ScanError> + Send + Sync,
{
    fn skip(&self, cursor: &mut Cursor) -> Result<bool, ScanError> {
        self(cursor)
    }
}

/// One kind of unit the engine can skip.
#[derive(Clone)]
pub enum SkipUnit {
    /// A maximal run of whitespace, newlines included.
    Whitespace,
    LineComment(LineComment),
    BlockComment(BlockComment),
    Custom(Arc<dyn SkipRule>),
}

impl SkipUnit {
    pub fn skip(&self, cursor: &mut Cursor) -> Result<bool, ScanError> {
        match self {
            SkipUnit::Whitespace => Ok(!cursor.consume_while(char::is_whitespace).is_empty()),
            SkipUnit::LineComment(comment) => Ok(comment.skip(cursor)),
            SkipUnit::BlockComment(comment) => comment.skip(cursor),
            SkipUnit::Custom(rule) => rule.skip(cursor),
        }
    }

    fn compile(&self) -> CompiledSkip {
        match self {
            SkipUnit::Whitespace => Box::new(skip_whitespace_bytes),
            SkipUnit::LineComment(comment) => from_scanner(comment.compile()),
            SkipUnit::BlockComment(comment) => from_scanner(comment.compile()),
            SkipUnit::Custom(rule) => {
                let rule = Arc::clone(rule);
                Box::new(move |cursor: &mut Cursor| rule.skip(cursor))
            }
        }
    }
}

impl std::fmt::Debug for SkipUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipUnit::Whitespace => f.write_str("Whitespace"),
            SkipUnit::LineComment(comment) => f.debug_tuple("LineComment").field(comment).finish(),
            SkipUnit::BlockComment(comment) => {
                f.debug_tuple("BlockComment").field(comment).finish()
            }
            SkipUnit::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

type CompiledSkip = Box<dyn Fn(&mut Cursor) -> Result<bool, ScanError> + Send + Sync>;

fn from_scanner(scanner: CompiledScanner) -> CompiledSkip {
    Box::new(move |cursor: &mut Cursor| -> Result<bool, ScanError> {
        Ok(scanner.scan(cursor)?.is_some())
    })
}

fn skip_whitespace_bytes(cursor: &mut Cursor) -> Result<bool, ScanError> {
    let buffer = cursor.buffer().clone();
    let text: &str = &buffer;
    let bytes = text.as_bytes();
    let start = cursor.offset();

    let mut offset = start;
    while offset < bytes.len() {
        let byte = bytes[offset];
        if byte.is_ascii() {
            // Same set as `char::is_whitespace` restricted to ASCII.
            if !matches!(byte, b' ' | b'\t'..=b'\r') {
                break;
            }
            offset += 1;
        } else {
            match text[offset..].chars().next() {
                Some(ch) if ch.is_whitespace() => offset += utf8_len(byte),
                _ => break,
            }
        }
    }

    if offset == start {
        return Ok(false);
    }
    cursor.seek(offset);
    Ok(true)
}

/// Skips whitespace and comments according to an ordered list of units.
#[derive(Debug, Clone, Default)]
pub struct ExtendedWhitespace {
    units: Vec<SkipUnit>,
}

impl ExtendedWhitespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whitespace, `--` line comments and nested `/* */` comments.
    pub fn sql() -> Self {
        Self::new()
            .with_whitespace()
            .with_line_comment(LineComment::sql())
            .with_block_comment(BlockComment::sql())
    }

    pub fn with_unit(mut self, unit: SkipUnit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn with_whitespace(self) -> Self {
        self.with_unit(SkipUnit::Whitespace)
    }

    pub fn with_line_comment(self, comment: LineComment) -> Self {
        self.with_unit(SkipUnit::LineComment(comment))
    }

    pub fn with_block_comment(self, comment: BlockComment) -> Self {
        self.with_unit(SkipUnit::BlockComment(comment))
    }

    pub fn with_rule<R: SkipRule + 'static>(self, rule: R) -> Self {
        self.with_unit(SkipUnit::Custom(Arc::new(rule)))
    }

    pub fn units(&self) -> &[SkipUnit] {
        &self.units
    }

    /// Skips as much as possible. Returns whether anything was skipped.
    ///
    /// A malformed comment stops the run; the cursor stays where the error
    /// was detected.
    pub fn skip(&self, cursor: &mut Cursor) -> Result<bool, ScanError> {
        let mut skipped = false;
        loop {
            let mut pass = false;
            for unit in &self.units {
                if unit.skip(cursor)? {
                    pass = true;
                }
            }
            if !pass {
                return Ok(skipped);
            }
            skipped = true;
        }
    }

    /// Skips as much as possible and returns the skipped text.
    pub fn read(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        let start = cursor.offset();
        if self.skip(cursor)? {
            Ok(Some(cursor.slice_from(start)))
        } else {
            Ok(None)
        }
    }

    /// Compiles the skip loop alone, for callers that only need to move the
    /// cursor.
    pub fn compile_skip(&self) -> impl Fn(&mut Cursor) -> Result<bool, ScanError> + Send + Sync {
        let units: Vec<CompiledSkip> = self.units.iter().map(SkipUnit::compile).collect();
        move |cursor: &mut Cursor| -> Result<bool, ScanError> {
            let mut skipped = false;
            loop {
                let mut pass = false;
                for unit in &units {
                    if unit(cursor)? {
                        pass = true;
                    }
                }
                if !pass {
                    return Ok(skipped);
                }
                skipped = true;
            }
        }
    }
}

impl Scan for ExtendedWhitespace {
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        self.read(cursor)
    }
}

impl Compile for ExtendedWhitespace {
    fn compile(&self) -> CompiledScanner {
        let skip = self.compile_skip();
        CompiledScanner::new(None, move |cursor| {
            let start = cursor.offset();
            if skip(cursor)? {
                let end = cursor.offset();
                Ok(Some(commit(cursor, start, end)))
            } else {
                Ok(None)
            }
        })
    }
}

/// Skips extended whitespace, then runs `inner`. When `inner` does not match
/// the whitespace is given back too.
///
/// Has no expected-start set: a match may begin with whitespace or a comment,
/// neither of which the inner set knows about.
#[derive(Debug, Clone)]
pub struct SkipThen<S> {
    skipper: ExtendedWhitespace,
    inner: S,
}

impl<S> SkipThen<S> {
    pub fn new(skipper: ExtendedWhitespace, inner: S) -> Self {
        Self { skipper, inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Scan> Scan for SkipThen<S> {
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        let checkpoint = cursor.checkpoint();
        self.skipper.skip(cursor)?;

        match self.inner.scan(cursor)? {
            Some(span) => Ok(Some(span)),
            None => {
                cursor.restore(checkpoint);
                Ok(None)
            }
        }
    }

    fn expected_chars(&self) -> Option<&ExpectedChars> {
        None
    }
}

impl<S: Scan + Compile> Compile for SkipThen<S> {
    fn compile(&self) -> CompiledScanner {
        let skip = self.skipper.compile_skip();
        let inner = self.inner.compile();

        CompiledScanner::new(None, move |cursor| {
            let checkpoint = cursor.checkpoint();
            skip(cursor)?;

            match inner.scan(cursor)? {
                Some(span) => Ok(Some(span)),
                None => {
                    cursor.restore(checkpoint);
                    Ok(None)
                }
            }
        })
    }
}
