//! Lexical scanning primitives for SQL-like languages.
//!
//! Scanners recognise extended whitespace (whitespace and comments, nested or
//! not), quoted identifiers with doubled-quote escaping, and identifiers
//! described by character predicates. Each one can be run directly through
//! the cursor ([`Strategy::Interpreted`]) or compiled once into a closure over
//! the raw buffer ([`Strategy::Compiled`]); both produce the same outcomes.
//!
//! The [`Lexer`] host drives scanners as prioritised rules over a shared
//! context.

pub mod comment;
pub mod context;
pub mod cursor;
pub mod error;
pub mod escape;
pub mod identifier;
pub mod lexer;
pub mod pattern;
pub mod quoted;
pub mod rule;
pub mod skip;
pub mod strategy;
pub mod trace;
pub mod traits;

pub use comment::{is_new_line, BlockComment, CommentStart, LineComment};
pub use common_framework::{Checkpoint, Position, TextSlice};
pub use context::{DefaultContext, LexContext};
pub use cursor::Cursor;
pub use error::{ConfigError, ScanError, ScanOutcome, ScanResult};
pub use escape::{escape, unescape};
pub use identifier::{
    is_simple_sql_identifier_part, is_simple_sql_identifier_start, CustomIdentifier,
    ExpectedChars,
};
pub use lexer::Lexer;
pub use pattern::PatternScanner;
pub use quoted::{QuoteSpec, QuotedIdentifier};
pub use rule::ScannerRule;
pub use skip::{ExtendedWhitespace, SkipRule, SkipThen, SkipUnit};
pub use strategy::{outcomes, run, CompiledScanner, Compile, Scan, Strategy};
pub use trace::Traced;
pub use traits::{LexToken, LexingRule};
