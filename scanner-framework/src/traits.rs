use crate::context::LexContext;
use crate::error::ScanResult;
use common_framework::Position;

/// A token produced by the lexer.
pub trait LexToken: Clone + std::fmt::Debug {
    /// Returns the position of this token in the source.
    fn position(&self) -> Option<Position>;

    /// Returns true if this token represents end-of-file.
    fn is_eof(&self) -> bool;

    /// Returns true for whitespace and comments.
    fn is_trivia(&self) -> bool {
        false
    }
}

/// A lexing rule that operates on a context.
/// Rules are generic over the context so they work with any lexer that
/// provides one.
pub trait LexingRule<Ctx, Tok>
where
    Ctx: LexContext,
{
    /// Attempts to match and consume a token from the context.
    ///
    /// `Ok(None)` means the rule does not apply here; the lexer restores the
    /// cursor and tries the next rule. An error means the input is malformed
    /// and lexing stops.
    fn try_match(&mut self, ctx: &mut Ctx) -> ScanResult<Tok>;

    /// Returns the priority of this rule. Higher priority rules are tried first.
    /// Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Quick check: returns whether this rule might match based on the first character.
    ///
    /// - `Some(true)`  - This rule might match
    /// - `Some(false)` - This rule definitely won't match
    /// - `None`        - Unknown, need to try full match
    #[inline]
    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        let _ = first_char;
        None
    }
}
