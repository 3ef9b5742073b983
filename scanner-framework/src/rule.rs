use common_framework::{Position, TextSlice};

use crate::context::LexContext;
use crate::error::ScanResult;
use crate::identifier::PROBED_CHARS;
use crate::strategy::Scan;
use crate::traits::LexingRule;

/// Turns any scanner into a lexing rule.
///
/// `make` builds the token from the matched text and the position where the
/// match started.
pub struct ScannerRule<S, F> {
    scanner: S,
    make: F,
    priority: i32,
}

impl<S, F> ScannerRule<S, F> {
    pub fn new(scanner: S, make: F) -> Self {
        Self {
            scanner,
            make,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }
}

impl<Ctx, Tok, S, F> LexingRule<Ctx, Tok> for ScannerRule<S, F>
where
    Ctx: LexContext,
    S: Scan,
    F: FnMut(TextSlice, Position) -> Tok,
{
    fn try_match(&mut self, ctx: &mut Ctx) -> ScanResult<Tok> {
        let position = ctx.position();
        Ok(ctx
            .scan_with(&self.scanner)?
            .map(|span| (self.make)(span, position)))
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        let expected = self.scanner.expected_chars()?;
        match first_char {
            None => Some(false),
            // Predicate-built sets only know the probed range.
            Some(ch) if ch as u32 > PROBED_CHARS => None,
            Some(ch) => Some(expected.contains(ch)),
        }
    }
}
