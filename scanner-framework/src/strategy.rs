//! The two interchangeable execution strategies.
//!
//! Every scanner implements [`Scan`], which walks the cursor one character at
//! a time, and [`Compile`], which bakes the same decision procedure into a
//! closure over raw bytes. Both must produce identical outcomes.

use common_framework::TextSlice;

use crate::cursor::Cursor;
use crate::error::{ScanError, ScanOutcome, ScanResult};
use crate::identifier::ExpectedChars;

/// Selects how a scanner is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Step-by-step interpretation through the cursor API.
    #[default]
    Interpreted,
    /// Pre-compiled closure scanning the buffer directly.
    Compiled,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interpreted" => Ok(Strategy::Interpreted),
            "compiled" => Ok(Strategy::Compiled),
            other => Err(format!("unknown strategy `{other}`")),
        }
    }
}

/// A configured scanner that can be interpreted against a cursor.
pub trait Scan {
    /// Attempts to scan at the cursor.
    ///
    /// On `Ok(None)` the cursor is left exactly where it was.
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice>;

    /// Characters that can start a match, if the scanner knows them.
    ///
    /// `None` means any character might start a match.
    fn expected_chars(&self) -> Option<&ExpectedChars> {
        None
    }
}

impl<S: Scan + ?Sized> Scan for Box<S> {
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        (**self).scan(cursor)
    }

    fn expected_chars(&self) -> Option<&ExpectedChars> {
        (**self).expected_chars()
    }
}

type ScanFn = dyn Fn(&mut Cursor) -> ScanResult<TextSlice> + Send + Sync;

/// The fast-path form of a scanner: its decision logic specialised for a
/// fixed configuration.
pub struct CompiledScanner {
    run: Box<ScanFn>,
    expected: Option<ExpectedChars>,
}

impl CompiledScanner {
    pub fn new<F>(expected: Option<ExpectedChars>, run: F) -> Self
    where
        F: Fn(&mut Cursor) -> ScanResult<TextSlice> + Send + Sync + 'static,
    {
        Self {
            run: Box::new(run),
            expected,
        }
    }
}

impl Scan for CompiledScanner {
    #[inline]
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        (self.run)(cursor)
    }

    fn expected_chars(&self) -> Option<&ExpectedChars> {
        self.expected.as_ref()
    }
}

impl std::fmt::Debug for CompiledScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledScanner")
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

/// Scanners that can produce a fast-path equivalent of themselves.
pub trait Compile {
    fn compile(&self) -> CompiledScanner;
}

/// Runs a scanner with the requested strategy.
///
/// Compiling on every call is only meant for one-off use and tests; long
/// lived callers should compile once and keep the [`CompiledScanner`].
pub fn run<S>(scanner: &S, strategy: Strategy, cursor: &mut Cursor) -> ScanResult<TextSlice>
where
    S: Scan + Compile + ?Sized,
{
    match strategy {
        Strategy::Interpreted => scanner.scan(cursor),
        Strategy::Compiled => scanner.compile().scan(cursor),
    }
}

/// Runs a scanner with both strategies on fresh cursors over `input` and
/// returns both outcomes.
pub fn outcomes<S>(scanner: &S, input: &str) -> (ScanOutcome, ScanOutcome)
where
    S: Scan + Compile + ?Sized,
{
    let compiled = scanner.compile();
    let interpreted = ScanOutcome::capture(&mut Cursor::new(input), |c| scanner.scan(c));
    let fast = ScanOutcome::capture(&mut Cursor::new(input), |c| compiled.scan(c));
    (interpreted, fast)
}

// Shared byte-level helpers for compiled closures.

/// Moves the cursor to `offset` and returns the consumed span from `start`.
#[inline]
pub(crate) fn commit(cursor: &mut Cursor, start: usize, offset: usize) -> TextSlice {
    cursor.seek(offset);
    cursor.slice_from(start)
}

/// Byte length of the UTF-8 sequence starting with `lead`.
#[inline]
pub(crate) fn utf8_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

/// Builds a malformed-input error positioned at a byte offset ahead of the
/// cursor, leaving the cursor there as the interpreter would.
#[inline]
pub(crate) fn fail_at<F>(cursor: &mut Cursor, offset: usize, make: F) -> ScanError
where
    F: FnOnce(common_framework::Position) -> ScanError,
{
    cursor.seek(offset);
    make(cursor.position())
}
