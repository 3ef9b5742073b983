//! Error taxonomy for scanning.
//!
//! A scan either matches, does not match (`Ok(None)`, cursor untouched), or
//! fails on malformed input ([`ScanError`]) once an opening marker committed
//! it to a construct.

use common_framework::{Position, TextSlice};
use thiserror::Error;

use crate::cursor::Cursor;

/// Malformed input: a construct was opened but could not be completed.
///
/// The `Display` text is part of the public contract and must not change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Missing end comment mark '{marker}'.")]
    MissingEndComment { marker: String, position: Position },

    #[error("Unclosed quotation mark '{quote}'.")]
    UnclosedQuote { quote: char, position: Position },

    #[error("Invalid zero length identifier.")]
    ZeroLengthIdentifier { position: Position },
}

impl ScanError {
    /// Where the error was detected.
    pub fn position(&self) -> Position {
        match self {
            ScanError::MissingEndComment { position, .. }
            | ScanError::UnclosedQuote { position, .. }
            | ScanError::ZeroLengthIdentifier { position } => *position,
        }
    }

    /// The literal message text.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Errors raised while configuring a scanner.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("At least one start/end symbol pair must be provided!")]
    EmptyQuoteSet,

    #[error("Comment start and end marks must not be empty.")]
    EmptyCommentMark,

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result of a single scan attempt.
///
/// `Ok(Some(_))` means matched with the cursor advanced, `Ok(None)` means not
/// present with the cursor unchanged, and `Err(_)` reports malformed input.
pub type ScanResult<T> = Result<Option<T>, ScanError>;

/// Fully materialised outcome of a scan, comparable across strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Success { span: TextSlice, end: Position },
    NoMatch,
    Malformed(ScanError),
}

impl ScanOutcome {
    /// Runs `scan` against the cursor and records what happened, including
    /// where the cursor ended up.
    pub fn capture<F>(cursor: &mut Cursor, scan: F) -> Self
    where
        F: FnOnce(&mut Cursor) -> ScanResult<TextSlice>,
    {
        match scan(cursor) {
            Ok(Some(span)) => ScanOutcome::Success {
                span,
                end: cursor.position(),
            },
            Ok(None) => ScanOutcome::NoMatch,
            Err(err) => ScanOutcome::Malformed(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScanOutcome::Success { .. })
    }
}

impl From<ScanOutcome> for ScanResult<TextSlice> {
    fn from(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Success { span, .. } => Ok(Some(span)),
            ScanOutcome::NoMatch => Ok(None),
            ScanOutcome::Malformed(err) => Err(err),
        }
    }
}
