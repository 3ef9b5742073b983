//! SQL tokenizer built from the scanning primitives.
//!
//! Used by the `sql-tokens` binary; kept as a library so the token stream can
//! be tested directly.

use scanner_framework::{
    BlockComment, Compile, ConfigError, CustomIdentifier, DefaultContext, ExtendedWhitespace,
    LexContext, LexToken, Lexer, LexingRule, LineComment, PatternScanner, Position,
    QuotedIdentifier, Scan, ScanError, ScanResult, ScannerRule, Strategy, TextSlice,
};
use thiserror::Error;
use tracing::debug;

/// SQL token with its start position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlToken {
    /// Whitespace and comments.
    Trivia { text: String, position: Position },
    Identifier { name: String, position: Position },
    /// A quoted identifier, delimiters removed and escapes collapsed.
    Quoted { name: String, position: Position },
    Number { text: String, position: Position },
    Symbol { symbol: char, position: Position },
}

impl LexToken for SqlToken {
    fn position(&self) -> Option<Position> {
        Some(match self {
            SqlToken::Trivia { position, .. }
            | SqlToken::Identifier { position, .. }
            | SqlToken::Quoted { position, .. }
            | SqlToken::Number { position, .. }
            | SqlToken::Symbol { position, .. } => *position,
        })
    }

    fn is_eof(&self) -> bool {
        false
    }

    fn is_trivia(&self) -> bool {
        matches!(self, SqlToken::Trivia { .. })
    }
}

impl std::fmt::Display for SqlToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (kind, text) = match self {
            SqlToken::Trivia { text, .. } => ("trivia", format!("{text:?}")),
            SqlToken::Identifier { name, .. } => ("identifier", name.clone()),
            SqlToken::Quoted { name, .. } => ("quoted", name.clone()),
            SqlToken::Number { text, .. } => ("number", text.clone()),
            SqlToken::Symbol { symbol, .. } => ("symbol", symbol.to_string()),
        };
        let position = self.position().map(|p| p.to_string()).unwrap_or_default();
        write!(f, "{position:<24} {kind:<10} {text}")
    }
}

/// How the tokenizer is put together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub strategy: Strategy,
    /// Reject `/* /* */ */` instead of treating it as one comment.
    pub flat_comments: bool,
}

const SYMBOLS: &str = ",;.()*=<>+-/";

/// Matches a single punctuation or operator character.
pub struct SymbolRule;

impl<Ctx> LexingRule<Ctx, SqlToken> for SymbolRule
where
    Ctx: LexContext,
{
    fn try_match(&mut self, ctx: &mut Ctx) -> ScanResult<SqlToken> {
        match ctx.peek() {
            Some(symbol) if SYMBOLS.contains(symbol) => {
                let position = ctx.position();
                ctx.advance();
                Ok(Some(SqlToken::Symbol { symbol, position }))
            }
            _ => Ok(None),
        }
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        Some(first_char.is_some_and(|c| SYMBOLS.contains(c)))
    }
}

type Rule = Box<dyn LexingRule<DefaultContext, SqlToken>>;

fn rule<S>(
    scanner: S,
    strategy: Strategy,
    priority: i32,
    make: fn(TextSlice, Position) -> SqlToken,
) -> Rule
where
    S: Scan + Compile + 'static,
{
    match strategy {
        Strategy::Interpreted => Box::new(ScannerRule::new(scanner, make).with_priority(priority)),
        Strategy::Compiled => {
            Box::new(ScannerRule::new(scanner.compile(), make).with_priority(priority))
        }
    }
}

fn whitespace(options: Options) -> ExtendedWhitespace {
    let block = if options.flat_comments {
        BlockComment::c_style()
    } else {
        BlockComment::sql()
    };
    ExtendedWhitespace::new()
        .with_whitespace()
        .with_line_comment(LineComment::sql())
        .with_block_comment(block)
}

/// The rule set for `options`.
///
/// Fails only if the number pattern does not compile.
pub fn sql_rules(options: Options) -> Result<Vec<Rule>, ConfigError> {
    let strategy = options.strategy;
    let number = PatternScanner::new(r"[0-9]+(\.[0-9]+)?")?;

    Ok(vec![
        rule(whitespace(options), strategy, 40, |text, position| SqlToken::Trivia {
            text: text.to_string(),
            position,
        }),
        rule(QuotedIdentifier::sql(), strategy, 30, |name, position| {
            SqlToken::Quoted {
                name: name.to_string(),
                position,
            }
        }),
        rule(number, strategy, 20, |text, position| SqlToken::Number {
            text: text.to_string(),
            position,
        }),
        rule(
            CustomIdentifier::simple_sql(),
            strategy,
            10,
            |name, position| SqlToken::Identifier {
                name: name.to_string(),
                position,
            },
        ),
        Box::new(SymbolRule),
    ])
}

/// Everything the tokenizer produced before it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub tokens: Vec<SqlToken>,
    /// Set when lexing stopped on a character no rule accepts.
    pub stuck_at: Option<Position>,
}

/// Tokenizes `source`, stopping at the first malformed construct.
pub fn tokenize(source: &str, options: Options) -> Result<Tokenized, TokenizeError> {
    let rules = sql_rules(options)?;
    let mut lexer = Lexer::from_str(source, rules);
    let tokens = lexer.tokenize()?;

    let context = lexer.context();
    let stuck_at = (!context.is_eof()).then(|| context.position());
    debug!(count = tokens.len(), ?stuck_at, ?options, "tokenized");

    Ok(Tokenized { tokens, stuck_at })
}

/// Why tokenizing failed.
#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0} at {pos}", pos = .0.position())]
    Scan(#[from] ScanError),
}
